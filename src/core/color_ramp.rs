use serde::{Deserialize, Serialize};

/// Semantic coloring for a metric: revenue-like metrics read as growth,
/// spend-like metrics read as cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RampMode {
    #[default]
    Growth,
    Cost,
}

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb8 {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// `#rrggbb` notation.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

const FIXED_CHANNEL: u8 = 100;

fn intensity(normalized: f64) -> u8 {
    let clamped = if normalized.is_nan() {
        0.0
    } else {
        normalized.clamp(0.0, 1.0)
    };
    (clamped * 255.0).floor() as u8
}

/// Red falls and green rises with `normalized`; blue stays at 100.
#[must_use]
pub fn growth_color(normalized: f64) -> Rgb8 {
    let level = intensity(normalized);
    Rgb8::new(
        u8::MAX - level,
        level.saturating_add(FIXED_CHANNEL),
        FIXED_CHANNEL,
    )
}

/// Blue rises with `normalized`; red and green stay at 100.
#[must_use]
pub fn cost_color(normalized: f64) -> Rgb8 {
    let level = intensity(normalized);
    Rgb8::new(
        FIXED_CHANNEL,
        FIXED_CHANNEL,
        level.saturating_add(FIXED_CHANNEL),
    )
}

#[must_use]
pub fn ramp_color(mode: RampMode, normalized: f64) -> Rgb8 {
    match mode {
        RampMode::Growth => growth_color(normalized),
        RampMode::Cost => cost_color(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::{Rgb8, cost_color, growth_color};

    #[test]
    fn growth_endpoints() {
        assert_eq!(growth_color(0.0), Rgb8::new(255, 100, 100));
        assert_eq!(growth_color(1.0), Rgb8::new(0, 255, 100));
        assert_eq!(growth_color(0.5), Rgb8::new(128, 227, 100));
    }

    #[test]
    fn cost_endpoints() {
        assert_eq!(cost_color(0.0), Rgb8::new(100, 100, 100));
        assert_eq!(cost_color(1.0), Rgb8::new(100, 100, 255));
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(growth_color(-3.0), growth_color(0.0));
        assert_eq!(cost_color(7.5), cost_color(1.0));
        assert_eq!(growth_color(f64::NAN), growth_color(0.0));
    }

    #[test]
    fn hex_notation() {
        assert_eq!(Rgb8::new(59, 130, 246).to_hex(), "#3b82f6");
    }
}
