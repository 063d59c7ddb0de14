use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Caller-supplied value formatter; overrides the configured `ValueFormat`.
pub type ValueFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Fraction digits kept before trailing zeros are trimmed.
pub const MAX_FRACTION_DIGITS: usize = 3;

/// Locale preset for grouped number output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NumberLocale {
    /// `1,234.5`
    #[default]
    EnUs,
    /// `1.234,5`
    EsEs,
}

impl NumberLocale {
    #[must_use]
    pub fn group_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }

    #[must_use]
    pub fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    #[default]
    Number,
    /// Dollar-prefixed grouped number.
    Currency,
}

impl ValueFormat {
    #[must_use]
    pub fn format(self, value: f64, locale: NumberLocale) -> String {
        match self {
            Self::Number => format_number(value, locale),
            Self::Currency => format_currency(value, locale),
        }
    }
}

/// Formats `value` with grouped thousands and at most three fraction digits.
#[must_use]
pub fn format_number(value: f64, locale: NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let fixed = format!("{:.precision$}", value.abs(), precision = MAX_FRACTION_DIGITS);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut text = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let is_zero = integer.bytes().all(|digit| digit == b'0') && fraction.is_empty();
    if value < 0.0 && !is_zero {
        text.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            text.push(locale.group_separator());
        }
        text.push(digit);
    }
    if !fraction.is_empty() {
        text.push(locale.decimal_separator());
        text.push_str(fraction);
    }
    text
}

#[must_use]
pub fn format_currency(value: f64, locale: NumberLocale) -> String {
    format!("${}", format_number(value, locale))
}

/// Resolved formatter used while building a frame.
#[derive(Clone)]
pub(crate) enum LabelFormatter {
    Configured {
        format: ValueFormat,
        locale: NumberLocale,
    },
    Custom(ValueFormatterFn),
}

impl LabelFormatter {
    pub(crate) fn format(&self, value: f64) -> String {
        match self {
            Self::Configured { format, locale } => format.format(value, *locale),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured { format, locale } => f
                .debug_struct("Configured")
                .field("format", format)
                .field("locale", locale)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NumberLocale, ValueFormat, format_number};

    #[test]
    fn groups_thousands_per_locale() {
        assert_eq!(format_number(1234.5, NumberLocale::EnUs), "1,234.5");
        assert_eq!(format_number(1234.5, NumberLocale::EsEs), "1.234,5");
        assert_eq!(format_number(1_000_000.0, NumberLocale::EnUs), "1,000,000");
    }

    #[test]
    fn rounds_to_three_fraction_digits() {
        assert_eq!(format_number(0.12345, NumberLocale::EnUs), "0.123");
        assert_eq!(format_number(2.0004, NumberLocale::EnUs), "2");
        assert_eq!(format_number(-0.0001, NumberLocale::EnUs), "0");
        assert_eq!(format_number(-1500.25, NumberLocale::EnUs), "-1,500.25");
    }

    #[test]
    fn currency_prefixes_dollar_sign() {
        assert_eq!(ValueFormat::Currency.format(1800.0, NumberLocale::EnUs), "$1,800");
    }
}
