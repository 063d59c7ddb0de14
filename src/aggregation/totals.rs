use std::fmt;
use std::hash::Hash;
use std::ops::Add;

use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

use crate::core::series::{ChartSeries, SeriesPoint};

/// Summable field of a [`CategoryTotal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Impressions,
    Clicks,
    Conversions,
    Spend,
    Revenue,
}

/// Grouped sums for one category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl CategoryTotal {
    pub const ZERO: Self = Self {
        impressions: 0,
        clicks: 0,
        conversions: 0,
        spend: 0.0,
        revenue: 0.0,
    };

    /// Returns the sum of both totals; counts saturate instead of wrapping.
    #[must_use]
    pub fn absorb(self, other: Self) -> Self {
        Self {
            impressions: self.impressions.saturating_add(other.impressions),
            clicks: self.clicks.saturating_add(other.clicks),
            conversions: self.conversions.saturating_add(other.conversions),
            spend: self.spend + other.spend,
            revenue: self.revenue + other.revenue,
        }
    }

    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Impressions => self.impressions as f64,
            Metric::Clicks => self.clicks as f64,
            Metric::Conversions => self.conversions as f64,
            Metric::Spend => self.spend,
            Metric::Revenue => self.revenue,
        }
    }

    #[must_use]
    pub fn derived(&self) -> DerivedMetrics {
        DerivedMetrics {
            ctr: Rate::percentage(self.clicks as f64, self.impressions as f64),
            conversion_rate: Rate::percentage(self.conversions as f64, self.clicks as f64),
            roas: Rate::ratio(self.revenue, self.spend),
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for CategoryTotal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.absorb(rhs)
    }
}

/// Ratio rounded half away from zero to two decimals.
///
/// Zero denominators and NaN yield `0.00`; ratios beyond `Decimal`'s range
/// saturate at its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Self::ZERO;
        }
        Self::from_f64(numerator / denominator)
    }

    #[must_use]
    pub fn percentage(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Self::ZERO;
        }
        Self::from_f64(numerator / denominator * 100.0)
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let Some(exact) = Decimal::from_f64_retain(value) else {
            return if value.is_sign_negative() {
                Self(Decimal::MIN)
            } else {
                Self(Decimal::MAX)
            };
        };
        let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Self(rounded)
    }

    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ratios computed once from finished totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DerivedMetrics {
    /// Clicks per impression, in percent.
    pub ctr: Rate,
    /// Conversions per click, in percent.
    pub conversion_rate: Rate,
    /// Revenue per unit of spend.
    pub roas: Rate,
}

/// Finished totals for one key together with its derived ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow<K> {
    pub key: K,
    #[serde(flatten)]
    pub totals: CategoryTotal,
    #[serde(flatten)]
    pub derived: DerivedMetrics,
}

/// Totals keyed by category in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals<K: Hash + Eq> {
    entries: IndexMap<K, CategoryTotal>,
}

impl<K: Hash + Eq> Default for CategoryTotals<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> CategoryTotals<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `contribution` to `key`, starting unseen keys from zero.
    #[must_use]
    pub fn fold_in(mut self, key: K, contribution: CategoryTotal) -> Self {
        let slot = self.entries.entry(key).or_default();
        *slot = slot.absorb(contribution);
        self
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&CategoryTotal> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &CategoryTotal)> + '_ {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    #[must_use]
    pub fn grand_total(&self) -> CategoryTotal {
        self.entries
            .values()
            .fold(CategoryTotal::ZERO, |acc, total| acc.absorb(*total))
    }
}

impl<K: Hash + Eq + Clone> CategoryTotals<K> {
    /// Final mapping pass attaching derived ratios to each bucket.
    #[must_use]
    pub fn rows(&self) -> Vec<CategoryRow<K>> {
        self.entries
            .iter()
            .map(|(key, totals)| CategoryRow {
                key: key.clone(),
                totals: *totals,
                derived: totals.derived(),
            })
            .collect()
    }
}

impl<K: Hash + Eq + AsRef<str>> CategoryTotals<K> {
    #[must_use]
    pub fn series(&self, metric: Metric) -> ChartSeries {
        self.entries
            .iter()
            .map(|(key, totals)| SeriesPoint::new(key.as_ref(), totals.metric(metric)))
            .collect()
    }
}

impl<K: Hash + Eq> IntoIterator for CategoryTotals<K> {
    type Item = (K, CategoryTotal);
    type IntoIter = indexmap::map::IntoIter<K, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryTotal, CategoryTotals, Rate};

    #[test]
    fn rate_formats_two_decimals() {
        assert_eq!(Rate::percentage(10.0, 100.0).to_string(), "10.00");
        assert_eq!(Rate::percentage(1.0, 3.0).to_string(), "33.33");
        assert_eq!(Rate::ratio(2.0, 3.0).to_string(), "0.67");
        assert_eq!(Rate::ratio(5.0, 0.0).to_string(), "0.00");
        assert_eq!(Rate::from_f64(f64::NAN).to_string(), "0.00");
    }

    #[test]
    fn out_of_range_ratios_saturate_instead_of_reading_as_zero() {
        use rust_decimal::Decimal;

        assert_eq!(Rate::ratio(1e30, 1.0).as_decimal(), Decimal::MAX);
        assert_eq!(Rate::ratio(-1e30, 1.0).as_decimal(), Decimal::MIN);
        assert_eq!(Rate::from_f64(f64::INFINITY).as_decimal(), Decimal::MAX);
        assert!(Rate::ratio(1e30, 1.0) > Rate::ZERO);
    }

    #[test]
    fn rate_rounds_on_exact_binary_value() {
        assert_eq!(Rate::from_f64(0.125).to_string(), "0.13");
        assert_eq!(Rate::from_f64(1.005).to_string(), "1.00");
    }

    #[test]
    fn fold_keeps_first_seen_order() {
        let one = CategoryTotal {
            clicks: 1,
            ..CategoryTotal::ZERO
        };
        let totals = CategoryTotals::new()
            .fold_in("b".to_owned(), one)
            .fold_in("a".to_owned(), one)
            .fold_in("b".to_owned(), one);
        let keys: Vec<&String> = totals.keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(totals.get(&"b".to_owned()).map(|t| t.clicks), Some(2));
        assert_eq!(totals.grand_total().clicks, 3);
    }
}
