use super::TeaName;
use crate::wheel::{Label, Selection};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const WEIGHT_RANGE: RangeInclusive<f64> = 3.0..=15.0; // grams
pub const WATER_TEMP_RANGE: RangeInclusive<u32> = 70..=100; // celsius
pub const STEEP_TIME_RANGE: RangeInclusive<u32> = 10..=300; // seconds
pub const ROUNDS_RANGE: RangeInclusive<u32> = 1..=20;
pub const RATING_RANGE: RangeInclusive<f64> = 1.0..=5.0;

/// Choices offered by the record form.
pub const TEA_TYPES: &[&str] = &[
    "綠茶",
    "白茶",
    "黃茶",
    "青茶(烏龍)",
    "紅茶",
    "黑茶(普洱)",
    "花茶",
    "其他",
];

pub const BREWING_METHODS: &[&str] = &[
    "蓋碗",
    "紫砂壺",
    "玻璃壺",
    "飄逸杯",
    "茶濾杯",
    "工夫茶",
    "其他",
];

/// Quick tags offered next to the wheel; several are not wheel labels.
pub const COMMON_FLAVORS: &[&str] = &[
    "甘甜", "回甘", "生津", "苦澀", "醇厚", "清香", "花香", "果香", "蜜香", "煙熏", "陳香", "木香",
    "草本", "礦物質", "海苔", "焙火",
];

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Tea name is required")]
    MissingName,
    #[error("Tea type is required")]
    MissingType,
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrewParams {
    pub weight: f64,
    pub water_temp: u32,
    pub steep_time: u32,
    pub rounds: u32,
}

impl Default for BrewParams {
    fn default() -> Self {
        Self {
            weight: 7.0,
            water_temp: 95,
            steep_time: 30,
            rounds: 1,
        }
    }
}

/// One brewing session as entered in the journal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeaRecord {
    pub name: TeaName,
    pub tea_type: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub brewing_method: String,
    #[serde(default)]
    pub params: BrewParams,
    pub rating: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub flavor_tags: Selection,
}

impl Default for TeaRecord {
    fn default() -> Self {
        Self {
            name: TeaName::default(),
            tea_type: String::new(),
            origin: String::new(),
            year: String::new(),
            grade: String::new(),
            brewing_method: String::new(),
            params: BrewParams::default(),
            rating: 4.0,
            notes: String::new(),
            flavor_tags: Selection::new(),
        }
    }
}

impl TeaRecord {
    pub fn new(name: impl Into<TeaName>, tea_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tea_type: tea_type.into(),
            ..Self::default()
        }
    }

    pub fn toggle_flavor(&mut self, label: &Label) {
        self.flavor_tags = self.flavor_tags.toggled(label);
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::MissingName);
        }
        if self.tea_type.trim().is_empty() {
            return Err(RecordError::MissingType);
        }

        let params = &self.params;
        check("weight", params.weight, &WEIGHT_RANGE)?;
        check_whole("water_temp", params.water_temp, &WATER_TEMP_RANGE)?;
        check_whole("steep_time", params.steep_time, &STEEP_TIME_RANGE)?;
        check_whole("rounds", params.rounds, &ROUNDS_RANGE)?;
        check("rating", self.rating, &RATING_RANGE)
    }
}

fn check(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> Result<(), RecordError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(RecordError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn check_whole(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), RecordError> {
    let widened = f64::from(*range.start())..=f64::from(*range.end());
    check(field, f64::from(value), &widened)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let record = TeaRecord::default();
        assert_eq!(record.params.weight, 7.0);
        assert_eq!(record.params.water_temp, 95);
        assert_eq!(record.params.steep_time, 30);
        assert_eq!(record.params.rounds, 1);
        assert_eq!(record.rating, 4.0);
    }

    #[test]
    fn test_name_and_type_required() {
        assert_eq!(TeaRecord::default().validate(), Err(RecordError::MissingName));
        assert_eq!(
            TeaRecord::new("  ", "綠茶").validate(),
            Err(RecordError::MissingName)
        );
        assert_eq!(
            TeaRecord::new("西湖龍井", "").validate(),
            Err(RecordError::MissingType)
        );
        assert_eq!(TeaRecord::new("西湖龍井", "綠茶").validate(), Ok(()));
    }

    #[test]
    fn test_form_types_validate() {
        for tea_type in TEA_TYPES {
            assert_eq!(TeaRecord::new("試飲", *tea_type).validate(), Ok(()));
        }
    }

    #[test]
    fn test_parameter_bounds() {
        let mut record = TeaRecord::new("大益7542", "黑茶(普洱)");
        record.params.water_temp = 100;
        record.params.weight = 15.0;
        assert_eq!(record.validate(), Ok(()));

        record.params.water_temp = 105;
        assert!(matches!(
            record.validate(),
            Err(RecordError::OutOfRange {
                field: "water_temp",
                ..
            })
        ));

        record.params.water_temp = 90;
        record.rating = 0.5;
        assert!(matches!(
            record.validate(),
            Err(RecordError::OutOfRange { field: "rating", .. })
        ));
    }

    #[test]
    fn test_custom_params_survive_serialization() {
        let mut record = TeaRecord::new("凍頂烏龍", "青茶(烏龍)");
        record.origin = "南投鹿谷".to_string();
        record.year = "2021".to_string();
        record.grade = "特等".to_string();
        record.brewing_method = BREWING_METHODS[1].to_string();
        record.params = BrewParams {
            weight: 8.5,
            water_temp: 90,
            steep_time: 45,
            rounds: 6,
        };
        record.rating = 4.5;
        record.notes = "焙火香沉穩".to_string();
        record.toggle_flavor(&Label::from("焙火"));
        assert_eq!(record.validate(), Ok(()));

        let json = serde_json::to_string(&record).unwrap();
        let back: TeaRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_ne!(back.params, BrewParams::default());
    }

    #[test]
    fn test_toggle_flavor_uses_set_semantics() {
        let mut record = TeaRecord::new("鐵觀音", "青茶(烏龍)");
        let orchid = Label::from("蘭花");

        record.toggle_flavor(&orchid);
        assert!(record.flavor_tags.contains("蘭花"));
        record.toggle_flavor(&orchid);
        assert!(record.flavor_tags.is_empty());
    }
}
