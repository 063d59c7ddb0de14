//! Pure folds turning campaign records into per-category totals.
//!
//! Each view has its own reducer. All of them walk the campaigns in order,
//! move an owned accumulator through `Iterator::fold` and only derive ratio
//! metrics once folding is finished. None of them can fail: missing
//! collections contribute nothing and unrecognized categories are dropped.

pub mod demographic;
pub mod device;
pub mod record;
pub mod regional;
pub mod totals;
pub mod weekly;

pub use demographic::{DemographicSummary, Gender, GenderTotals, aggregate_demographics};
pub use device::{DeviceClass, DeviceSummary, aggregate_devices};
pub use record::{
    CampaignRecord, DemographicEntry, DeviceEntry, EngagementCounts, MarketingDataset,
    RegionalEntry, WeeklyEntry,
};
pub use regional::{RegionTotal, RegionalSummary, aggregate_regions};
pub use totals::{CategoryRow, CategoryTotal, CategoryTotals, DerivedMetrics, Metric, Rate};
pub use weekly::{WeekTotal, WeeklySummary, aggregate_weekly, parse_week_start};

impl MarketingDataset {
    #[must_use]
    pub fn demographics(&self) -> DemographicSummary {
        aggregate_demographics(&self.campaigns)
    }

    #[must_use]
    pub fn devices(&self) -> DeviceSummary {
        aggregate_devices(&self.campaigns)
    }

    #[must_use]
    pub fn regions(&self) -> RegionalSummary {
        aggregate_regions(&self.campaigns)
    }

    #[must_use]
    pub fn weekly(&self) -> WeeklySummary {
        aggregate_weekly(&self.campaigns)
    }
}
