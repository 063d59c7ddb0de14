use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// Input document: the campaign list plus anything else, which is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketingDataset {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub campaigns: Vec<CampaignRecord>,
}

impl MarketingDataset {
    #[must_use]
    pub fn new(campaigns: Vec<CampaignRecord>) -> Self {
        Self { campaigns }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let dataset: Self = serde_json::from_str(input)?;
        debug!(campaigns = dataset.campaigns.len(), "loaded marketing dataset");
        Ok(dataset)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

/// One advertising campaign with its optional breakdown collections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignRecord {
    pub id: Option<Value>,
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub spend: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient_entries")]
    pub demographic_breakdown: Vec<DemographicEntry>,
    #[serde(deserialize_with = "lenient_entries")]
    pub device_performance: Vec<DeviceEntry>,
    #[serde(deserialize_with = "lenient_entries")]
    pub regional_performance: Vec<RegionalEntry>,
    #[serde(deserialize_with = "lenient_entries")]
    pub weekly_performance: Vec<WeeklyEntry>,
}

impl CampaignRecord {
    #[must_use]
    pub fn new(spend: f64, revenue: f64) -> Self {
        Self {
            spend,
            revenue,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_demographic(mut self, entry: DemographicEntry) -> Self {
        self.demographic_breakdown.push(entry);
        self
    }

    #[must_use]
    pub fn with_device(mut self, entry: DeviceEntry) -> Self {
        self.device_performance.push(entry);
        self
    }

    #[must_use]
    pub fn with_region(mut self, entry: RegionalEntry) -> Self {
        self.regional_performance.push(entry);
        self
    }

    #[must_use]
    pub fn with_week(mut self, entry: WeeklyEntry) -> Self {
        self.weekly_performance.push(entry);
        self
    }
}

/// Absolute engagement counts carried by a breakdown row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementCounts {
    #[serde(deserialize_with = "lenient_count")]
    pub impressions: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub clicks: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub conversions: u64,
}

impl EngagementCounts {
    #[must_use]
    pub const fn new(impressions: u64, clicks: u64, conversions: u64) -> Self {
        Self {
            impressions,
            clicks,
            conversions,
        }
    }
}

/// Audience slice by age group and gender. Carries no spend or revenue of
/// its own; those are pro-rated from the parent campaign.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicEntry {
    pub age_group: String,
    pub gender: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub percentage_of_audience: f64,
    pub performance: EngagementCounts,
}

impl DemographicEntry {
    #[must_use]
    pub fn new(
        age_group: impl Into<String>,
        gender: impl Into<String>,
        percentage_of_audience: f64,
        performance: EngagementCounts,
    ) -> Self {
        Self {
            age_group: age_group.into(),
            gender: gender.into(),
            percentage_of_audience,
            performance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceEntry {
    pub device: String,
    #[serde(flatten)]
    pub counts: EngagementCounts,
    #[serde(deserialize_with = "lenient_amount")]
    pub spend: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub revenue: f64,
}

impl DeviceEntry {
    #[must_use]
    pub fn new(
        device: impl Into<String>,
        counts: EngagementCounts,
        spend: f64,
        revenue: f64,
    ) -> Self {
        Self {
            device: device.into(),
            counts,
            spend,
            revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalEntry {
    pub region: String,
    pub country: String,
    #[serde(flatten)]
    pub counts: EngagementCounts,
    #[serde(deserialize_with = "lenient_amount")]
    pub spend: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub revenue: f64,
    #[serde(alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(alias = "longitude")]
    pub lon: Option<f64>,
}

impl RegionalEntry {
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        country: impl Into<String>,
        spend: f64,
        revenue: f64,
    ) -> Self {
        Self {
            region: region.into(),
            country: country.into(),
            spend,
            revenue,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyEntry {
    pub week_start: String,
    pub week_end: Option<String>,
    #[serde(flatten)]
    pub counts: EngagementCounts,
    #[serde(deserialize_with = "lenient_amount")]
    pub spend: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub revenue: f64,
}

impl WeeklyEntry {
    #[must_use]
    pub fn new(week_start: impl Into<String>, spend: f64, revenue: f64) -> Self {
        Self {
            week_start: week_start.into(),
            spend,
            revenue,
            ..Self::default()
        }
    }
}

/// Accepts any JSON for a collection field. Non-arrays become empty and
/// entries that fail to parse are dropped individually.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(collect_entries(raw))
}

pub(crate) fn collect_entries<T: DeserializeOwned>(raw: Value) -> Vec<T> {
    let kind = std::any::type_name::<T>();
    let items = match raw {
        Value::Array(items) => items,
        Value::Null => return Vec::new(),
        _ => {
            warn!(kind, "ignoring non-array breakdown collection");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(kind, index, error = %err, "dropping malformed entry");
                None
            }
        })
        .collect()
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(number) => number.as_u64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite() && *value > 0.0)
                .map_or(0, |value| value.round() as u64)
        }),
        _ => 0,
    })
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::{CampaignRecord, DeviceEntry, MarketingDataset};

    #[test]
    fn missing_collections_default_to_empty() {
        let campaign: CampaignRecord =
            serde_json::from_str(r#"{"spend": 10, "revenue": 20}"#).expect("campaign");
        assert!(campaign.demographic_breakdown.is_empty());
        assert!(campaign.weekly_performance.is_empty());
        assert_eq!(campaign.spend, 10.0);
    }

    #[test]
    fn malformed_entries_are_dropped_individually() {
        let campaign: CampaignRecord = serde_json::from_str(
            r#"{
                "spend": 1,
                "revenue": 2,
                "device_performance": [
                    {"device": "Desktop", "impressions": 10, "clicks": 1, "conversions": 0, "spend": 5, "revenue": 7},
                    {"device": 42},
                    "garbage"
                ],
                "weekly_performance": {"not": "an array"}
            }"#,
        )
        .expect("campaign");
        assert_eq!(campaign.device_performance.len(), 1);
        let device: &DeviceEntry = &campaign.device_performance[0];
        assert_eq!(device.counts.impressions, 10);
        assert!(campaign.weekly_performance.is_empty());
    }

    #[test]
    fn non_numeric_amounts_fall_back_to_zero() {
        let campaign: CampaignRecord =
            serde_json::from_str(r#"{"spend": "lots", "revenue": null}"#).expect("campaign");
        assert_eq!(campaign.spend, 0.0);
        assert_eq!(campaign.revenue, 0.0);
    }

    #[test]
    fn top_level_garbage_is_an_error() {
        assert!(MarketingDataset::from_json_str("not json").is_err());
    }
}
