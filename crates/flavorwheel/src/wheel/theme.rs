use palette::{Srgb, Srgba, WithAlpha};

/// Colors that are not tied to a category. Hosts may override them from their
/// toolkit theme; `Default` is the paper-and-ink look of the journal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelTheme {
    pub border: Srgba<f64>,
    pub text: Srgba<f64>,
    pub hub_fill: Srgba<f64>,
    pub hub_border: Srgba<f64>,
    pub hub_text: Srgba<f64>,
}

impl Default for WheelTheme {
    fn default() -> Self {
        Self {
            border: opaque(0xFF, 0xFF, 0xFF),
            text: opaque(0x2D, 0x1B, 0x14),
            hub_fill: opaque(0xFF, 0xF8, 0xDC),
            hub_border: opaque(0xD2, 0xB4, 0x8C),
            hub_text: opaque(0x8B, 0x45, 0x13),
        }
    }
}

fn opaque(r: u8, g: u8, b: u8) -> Srgba<f64> {
    Srgb::new(r, g, b).into_format::<f64>().with_alpha(1.0)
}

/// Category base color at the given opacity.
pub fn tint(color: Srgb<u8>, alpha: f64) -> Srgba<f64> {
    color.into_format::<f64>().with_alpha(alpha)
}
