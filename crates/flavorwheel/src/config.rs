use crate::wheel::{Category, Label, WheelConfiguration, WheelError};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_WHEEL: &str = include_str!("default_wheel.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid wheel: {0}")]
    Wheel(#[from] WheelError),
    #[error("Invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

/// `#RRGGBB` (or `#RGB`) category color as written in the wheel file.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(pub Srgb<u8>);

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Srgb<u8>>()
            .map(HexColor)
            .map_err(|_| ConfigError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    pub name: Label,
    pub color: HexColor,
    #[serde(default)]
    pub sub_labels: Vec<Label>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WheelFile {
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl TryFrom<WheelFile> for WheelConfiguration {
    type Error = WheelError;

    fn try_from(file: WheelFile) -> Result<Self, Self::Error> {
        WheelConfiguration::new(
            file.categories
                .into_iter()
                .map(|c| Category::new(c.name, c.color.0, c.sub_labels))
                .collect(),
        )
    }
}

pub fn parse_wheel(toml: &str) -> Result<WheelConfiguration, ConfigError> {
    let file: WheelFile = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    Ok(file.try_into()?)
}

pub fn default_wheel() -> Result<WheelConfiguration, ConfigError> {
    parse_wheel(DEFAULT_WHEEL)
}

/// Reads a wheel file on its own; unlike [`load_wheel`] the file must exist.
pub fn read_wheel(path: &Path) -> Result<WheelConfiguration, ConfigError> {
    let file: WheelFile = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).required(true))
        .build()?
        .try_deserialize()?;
    Ok(file.try_into()?)
}

/// Layers the embedded default, the file at `path` (if it exists) and environment
/// variables with `env_prefix`. Later sources replace the whole `categories` list.
pub fn load_wheel(
    path: Option<&Path>,
    env_prefix: Option<&str>,
) -> Result<WheelConfiguration, ConfigError> {
    let mut builder = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_WHEEL, config::FileFormat::Toml));

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path.to_path_buf()).required(false));
    }
    if let Some(prefix) = env_prefix {
        builder = builder.add_source(config::Environment::with_prefix(prefix));
    }

    let file: WheelFile = builder.build()?.try_deserialize()?;
    let wheel = WheelConfiguration::try_from(file)?;
    log::info!("Loaded wheel with {} categories", wheel.len());
    Ok(wheel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wheel_is_valid() {
        let wheel = default_wheel().unwrap();
        assert_eq!(wheel.len(), 8);
        assert!(wheel.categories().iter().all(|c| c.sub_labels.len() == 5));
        assert_eq!(wheel.categories()[0].name.as_str(), "花香");
        assert_eq!(wheel.categories()[0].color, Srgb::new(0xFF, 0x6B, 0x9D));
        assert_eq!(wheel.categories()[7].sub_labels[4].as_str(), "金屬");
    }

    #[test]
    fn test_color_deserialization() {
        let cases = vec![
            ("\"#FF6B9D\"", Srgb::new(0xFF, 0x6B, 0x9D)),
            ("\"ff9f40\"", Srgb::new(0xFF, 0x9F, 0x40)),
            ("\"#fff\"", Srgb::new(0xFF, 0xFF, 0xFF)),
        ];

        for (json, expected) in cases {
            let color: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(color.0, expected);
        }

        assert!(serde_json::from_str::<HexColor>("\"teal\"").is_err());
        assert_eq!(
            serde_json::to_string(&HexColor(Srgb::new(0x46, 0x82, 0xB4))).unwrap(),
            "\"#4682B4\""
        );
    }

    #[test]
    fn test_parse_custom_wheel() {
        let wheel = parse_wheel(
            r##"
            [[categories]]
            name = "floral"
            color = "#FF6B9D"
            sub_labels = ["jasmine", "osmanthus"]

            [[categories]]
            name = "roasted"
            color = "#D2691E"
            sub_labels = ["charcoal"]
            "##,
        )
        .unwrap();

        assert_eq!(wheel.len(), 2);
        assert_eq!(wheel.categories()[1].sub_labels, vec![Label::from("charcoal")]);
    }

    #[test]
    fn test_parse_rejects_invalid_wheels() {
        let missing_subs = parse_wheel(
            r##"
            [[categories]]
            name = "floral"
            color = "#FF6B9D"
            "##,
        );
        assert!(matches!(
            missing_subs,
            Err(ConfigError::Wheel(WheelError::EmptyCategory(_)))
        ));

        let empty = parse_wheel("");
        assert!(matches!(
            empty,
            Err(ConfigError::Wheel(WheelError::NoCategories))
        ));

        let bad_color = parse_wheel(
            r##"
            [[categories]]
            name = "floral"
            color = "pinkish"
            sub_labels = ["rose"]
            "##,
        );
        assert!(bad_color.is_err());
    }

    #[test]
    fn test_read_requires_file() {
        assert!(matches!(
            read_wheel(Path::new("/nonexistent/teawise/wheel.toml")),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_load_without_file_falls_back_to_default() {
        let wheel = load_wheel(Some(Path::new("/nonexistent/teawise/wheel.toml")), None).unwrap();
        assert_eq!(wheel, default_wheel().unwrap());
    }
}
