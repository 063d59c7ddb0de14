use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::record::{CampaignRecord, DemographicEntry};
use crate::aggregation::totals::{CategoryRow, CategoryTotal, CategoryTotals, Metric};
use crate::core::series::ChartSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive exact match; anything else is unrecognized.
    #[must_use]
    pub fn resolve(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("male") {
            Some(Self::Male)
        } else if raw.eq_ignore_ascii_case("female") {
            Some(Self::Female)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

/// Flat per-gender totals for the headline cards.
///
/// Only clicks, spend and revenue are tracked here; impressions and
/// conversions live in the per-age-group breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenderTotals {
    pub clicks: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl GenderTotals {
    #[must_use]
    fn absorb(self, contribution: CategoryTotal) -> Self {
        Self {
            clicks: self.clicks.saturating_add(contribution.clicks),
            spend: self.spend + contribution.spend,
            revenue: self.revenue + contribution.revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DemographicSummary {
    pub male: GenderTotals,
    pub female: GenderTotals,
    pub male_age_groups: CategoryTotals<String>,
    pub female_age_groups: CategoryTotals<String>,
    /// Every entry by age group, including unrecognized genders.
    pub all_age_groups: CategoryTotals<String>,
}

impl DemographicSummary {
    #[must_use]
    fn absorb(self, age_group: &str, gender: Option<Gender>, contribution: CategoryTotal) -> Self {
        let Self {
            mut male,
            mut female,
            mut male_age_groups,
            mut female_age_groups,
            all_age_groups,
        } = self;

        match gender {
            Some(Gender::Male) => {
                male = male.absorb(contribution);
                male_age_groups = male_age_groups.fold_in(age_group.to_owned(), contribution);
            }
            Some(Gender::Female) => {
                female = female.absorb(contribution);
                female_age_groups = female_age_groups.fold_in(age_group.to_owned(), contribution);
            }
            None => {}
        }

        Self {
            male,
            female,
            male_age_groups,
            female_age_groups,
            all_age_groups: all_age_groups.fold_in(age_group.to_owned(), contribution),
        }
    }

    #[must_use]
    pub fn gender_totals(&self, gender: Gender) -> GenderTotals {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    #[must_use]
    pub fn age_groups(&self, gender: Gender) -> &CategoryTotals<String> {
        match gender {
            Gender::Male => &self.male_age_groups,
            Gender::Female => &self.female_age_groups,
        }
    }

    /// Age-group rows for one gender with CTR and conversion rate attached.
    #[must_use]
    pub fn age_group_rows(&self, gender: Gender) -> Vec<CategoryRow<String>> {
        self.age_groups(gender).rows()
    }

    #[must_use]
    pub fn age_group_spend(&self) -> ChartSeries {
        self.all_age_groups.series(Metric::Spend)
    }

    #[must_use]
    pub fn age_group_revenue(&self) -> ChartSeries {
        self.all_age_groups.series(Metric::Revenue)
    }
}

/// Spend and revenue pro-rated from the parent campaign by audience share.
#[must_use]
pub fn demographic_contribution(
    campaign: &CampaignRecord,
    entry: &DemographicEntry,
) -> CategoryTotal {
    CategoryTotal {
        impressions: entry.performance.impressions,
        clicks: entry.performance.clicks,
        conversions: entry.performance.conversions,
        spend: campaign.spend * entry.percentage_of_audience / 100.0,
        revenue: campaign.revenue * entry.percentage_of_audience / 100.0,
    }
}

#[must_use]
pub fn aggregate_demographics(campaigns: &[CampaignRecord]) -> DemographicSummary {
    let summary = campaigns
        .iter()
        .flat_map(|campaign| {
            campaign
                .demographic_breakdown
                .iter()
                .map(move |entry| (campaign, entry))
        })
        .fold(DemographicSummary::default(), |summary, (campaign, entry)| {
            summary.absorb(
                &entry.age_group,
                Gender::resolve(&entry.gender),
                demographic_contribution(campaign, entry),
            )
        });

    debug!(
        campaigns = campaigns.len(),
        male_age_groups = summary.male_age_groups.len(),
        female_age_groups = summary.female_age_groups.len(),
        "aggregated demographic breakdowns"
    );
    summary
}
