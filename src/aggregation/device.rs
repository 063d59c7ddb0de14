use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::record::{CampaignRecord, DeviceEntry};
use crate::aggregation::totals::{CategoryRow, CategoryTotal, Metric};
use crate::core::series::{ChartSeries, SeriesPoint};

const DESKTOP_MARKERS: [&str; 2] = ["desktop", "pc"];
const MOBILE_MARKERS: [&str; 3] = ["mobile", "phone", "smartphone"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub const ALL: [Self; 2] = [Self::Desktop, Self::Mobile];

    /// Case-insensitive substring match against the fixed vocabulary.
    /// Desktop markers are checked first; unmatched devices are dropped.
    #[must_use]
    pub fn resolve(raw: &str) -> Option<Self> {
        let lowered = raw.to_lowercase();
        if DESKTOP_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            Some(Self::Desktop)
        } else if MOBILE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            Some(Self::Mobile)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Mobile => "Mobile",
        }
    }
}

impl AsRef<str> for DeviceClass {
    fn as_ref(&self) -> &str {
        self.label()
    }
}

/// Desktop and mobile buckets. Both are always present, zero or not.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub desktop: CategoryTotal,
    pub mobile: CategoryTotal,
}

impl DeviceSummary {
    #[must_use]
    fn absorb(self, class: DeviceClass, contribution: CategoryTotal) -> Self {
        match class {
            DeviceClass::Desktop => Self {
                desktop: self.desktop.absorb(contribution),
                ..self
            },
            DeviceClass::Mobile => Self {
                mobile: self.mobile.absorb(contribution),
                ..self
            },
        }
    }

    #[must_use]
    pub fn total(&self, class: DeviceClass) -> CategoryTotal {
        match class {
            DeviceClass::Desktop => self.desktop,
            DeviceClass::Mobile => self.mobile,
        }
    }

    /// Desktop plus mobile.
    #[must_use]
    pub fn combined(&self) -> CategoryTotal {
        self.desktop.absorb(self.mobile)
    }

    #[must_use]
    pub fn rows(&self) -> Vec<CategoryRow<DeviceClass>> {
        DeviceClass::ALL
            .into_iter()
            .map(|class| {
                let totals = self.total(class);
                CategoryRow {
                    key: class,
                    totals,
                    derived: totals.derived(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn series(&self, metric: Metric) -> ChartSeries {
        DeviceClass::ALL
            .into_iter()
            .map(|class| SeriesPoint::new(class.label(), self.total(class).metric(metric)))
            .collect()
    }

    #[must_use]
    pub fn spend_series(&self) -> ChartSeries {
        self.series(Metric::Spend)
    }

    #[must_use]
    pub fn revenue_series(&self) -> ChartSeries {
        self.series(Metric::Revenue)
    }
}

#[must_use]
pub fn device_contribution(entry: &DeviceEntry) -> CategoryTotal {
    CategoryTotal {
        impressions: entry.counts.impressions,
        clicks: entry.counts.clicks,
        conversions: entry.counts.conversions,
        spend: entry.spend,
        revenue: entry.revenue,
    }
}

#[must_use]
pub fn aggregate_devices(campaigns: &[CampaignRecord]) -> DeviceSummary {
    let (summary, dropped) = campaigns
        .iter()
        .flat_map(|campaign| campaign.device_performance.iter())
        .fold((DeviceSummary::default(), 0_usize), |(summary, dropped), entry| {
            match DeviceClass::resolve(&entry.device) {
                Some(class) => (summary.absorb(class, device_contribution(entry)), dropped),
                None => (summary, dropped + 1),
            }
        });

    debug!(
        campaigns = campaigns.len(),
        dropped_entries = dropped,
        "aggregated device performance"
    );
    summary
}
