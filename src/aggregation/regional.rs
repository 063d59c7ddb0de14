use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::aggregation::record::{CampaignRecord, RegionalEntry};
use crate::aggregation::totals::{CategoryTotal, Metric};
use crate::core::bubble_series::BubblePoint;
use crate::core::geo::GeoCoordinate;
use crate::core::series::{ChartSeries, SeriesPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    /// Country of the first entry seen for the region.
    pub country: String,
    /// First coordinates seen for the region, if any entry carried them.
    pub coordinate: Option<GeoCoordinate>,
    pub totals: CategoryTotal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RegionalSummary {
    regions: IndexMap<String, RegionTotal>,
}

impl RegionalSummary {
    #[must_use]
    fn absorb(mut self, entry: &RegionalEntry) -> Self {
        let contribution = regional_contribution(entry);
        let coordinate = GeoCoordinate::from_parts(entry.lat, entry.lon);
        let region = self
            .regions
            .entry(entry.region.clone())
            .or_insert_with(|| RegionTotal {
                country: entry.country.clone(),
                coordinate,
                totals: CategoryTotal::ZERO,
            });
        region.totals = region.totals.absorb(contribution);
        if region.coordinate.is_none() {
            region.coordinate = coordinate;
        }
        self
    }

    #[must_use]
    pub fn get(&self, region: &str) -> Option<&RegionTotal> {
        self.regions.get(region)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionTotal)> + '_ {
        self.regions
            .iter()
            .map(|(name, region)| (name.as_str(), region))
    }

    /// Bubble-map input in first-seen order.
    #[must_use]
    pub fn bubble_points(&self) -> Vec<BubblePoint> {
        self.regions
            .iter()
            .map(|(name, region)| {
                let point =
                    BubblePoint::new(name.clone(), region.totals.revenue, region.totals.spend);
                match region.coordinate {
                    Some(coordinate) => point.with_coordinates(coordinate.lat, coordinate.lon),
                    None => point,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn series(&self, metric: Metric) -> ChartSeries {
        self.regions
            .iter()
            .map(|(name, region)| SeriesPoint::new(name.as_str(), region.totals.metric(metric)))
            .collect()
    }
}

#[must_use]
pub fn regional_contribution(entry: &RegionalEntry) -> CategoryTotal {
    CategoryTotal {
        impressions: entry.counts.impressions,
        clicks: entry.counts.clicks,
        conversions: entry.counts.conversions,
        spend: entry.spend,
        revenue: entry.revenue,
    }
}

#[must_use]
pub fn aggregate_regions(campaigns: &[CampaignRecord]) -> RegionalSummary {
    let summary = campaigns
        .iter()
        .flat_map(|campaign| campaign.regional_performance.iter())
        .fold(RegionalSummary::default(), RegionalSummary::absorb);

    debug!(
        campaigns = campaigns.len(),
        regions = summary.len(),
        "aggregated regional performance"
    );
    summary
}
