use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregation::record::{CampaignRecord, WeeklyEntry};
use crate::aggregation::totals::{CategoryTotal, CategoryTotals, Metric};
use crate::core::series::{ChartSeries, SeriesPoint};

/// Short month and day, e.g. `Jan 6`.
pub const WEEK_LABEL_FORMAT: &str = "%b %-d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekTotal {
    pub week_start: String,
    pub date: Option<NaiveDate>,
    pub label: String,
    pub totals: CategoryTotal,
}

/// Weekly totals in ascending calendar order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct WeeklySummary {
    weeks: Vec<WeekTotal>,
}

impl WeeklySummary {
    #[must_use]
    pub fn weeks(&self) -> &[WeekTotal] {
        &self.weeks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    #[must_use]
    pub fn series(&self, metric: Metric) -> ChartSeries {
        self.weeks
            .iter()
            .map(|week| SeriesPoint::new(week.label.as_str(), week.totals.metric(metric)))
            .collect()
    }

    #[must_use]
    pub fn revenue_series(&self) -> ChartSeries {
        self.series(Metric::Revenue)
    }

    #[must_use]
    pub fn spend_series(&self) -> ChartSeries {
        self.series(Metric::Spend)
    }
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp or US-style `MM/DD/YYYY`, keeping the
/// date part.
#[must_use]
pub fn parse_week_start(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|value| value.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|value| value.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
}

#[must_use]
pub fn week_label(week_start: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(WEEK_LABEL_FORMAT).to_string(),
        None => week_start.to_owned(),
    }
}

/// Dated weeks first in ascending order, undated ones after them.
fn chronological(left: Option<NaiveDate>, right: Option<NaiveDate>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[must_use]
pub fn weekly_contribution(entry: &WeeklyEntry) -> CategoryTotal {
    CategoryTotal {
        impressions: entry.counts.impressions,
        clicks: entry.counts.clicks,
        conversions: entry.counts.conversions,
        spend: entry.spend,
        revenue: entry.revenue,
    }
}

#[must_use]
pub fn aggregate_weekly(campaigns: &[CampaignRecord]) -> WeeklySummary {
    let grouped = campaigns
        .iter()
        .flat_map(|campaign| campaign.weekly_performance.iter())
        .fold(CategoryTotals::new(), |grouped, entry| {
            grouped.fold_in(entry.week_start.clone(), weekly_contribution(entry))
        });

    let mut weeks: Vec<WeekTotal> = grouped
        .into_iter()
        .map(|(week_start, totals)| {
            let date = parse_week_start(&week_start);
            if date.is_none() {
                warn!(
                    week_start = %week_start,
                    "unparseable week start; ordering after dated weeks"
                );
            }
            WeekTotal {
                label: week_label(&week_start, date),
                week_start,
                date,
                totals,
            }
        })
        .collect();
    // `sort_by` is stable, so equal dates keep first-seen order.
    weeks.sort_by(|left, right| chronological(left.date, right.date));

    debug!(
        campaigns = campaigns.len(),
        weeks = weeks.len(),
        "aggregated weekly performance"
    );
    WeeklySummary { weeks }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{aggregate_weekly, parse_week_start, week_label};
    use crate::aggregation::record::{CampaignRecord, WeeklyEntry};

    fn campaign_with_weeks(keys: &[&str]) -> CampaignRecord {
        keys.iter().fold(CampaignRecord::new(0.0, 0.0), |record, key| {
            record.with_week(WeeklyEntry::new(*key, 10.0, 20.0))
        })
    }

    #[test]
    fn parses_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 8);
        assert_eq!(parse_week_start("2024-01-08"), expected);
        assert_eq!(parse_week_start("2024-01-08T00:00:00Z"), expected);
        assert_eq!(parse_week_start("2024-01-08T09:30:00"), expected);
        assert_eq!(parse_week_start("week one"), None);
        assert_eq!(
            parse_week_start("01/15/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn undated_weeks_trail_and_equal_dates_keep_first_seen_order() {
        let campaign = campaign_with_weeks(&[
            "week two",
            "2024-03-04",
            "week one",
            "2024-01-08T00:00:00Z",
            "2024-01-08",
        ]);
        let summary = aggregate_weekly(&[campaign]);
        let keys: Vec<&str> = summary
            .weeks()
            .iter()
            .map(|week| week.week_start.as_str())
            .collect();
        assert_eq!(
            keys,
            [
                "2024-01-08T00:00:00Z",
                "2024-01-08",
                "2024-03-04",
                "week two",
                "week one"
            ]
        );
        let labels: Vec<&str> = summary.weeks().iter().map(|week| week.label.as_str()).collect();
        assert_eq!(labels, ["Jan 8", "Jan 8", "Mar 4", "week two", "week one"]);
    }

    #[test]
    fn us_style_keys_sort_among_dated_weeks() {
        let summary = aggregate_weekly(&[campaign_with_weeks(&["2024-02-05", "01/15/2024"])]);
        let labels: Vec<&str> = summary.weeks().iter().map(|week| week.label.as_str()).collect();
        assert_eq!(labels, ["Jan 15", "Feb 5"]);
    }

    #[test]
    fn summary_serializes_dates_as_iso_strings() {
        let summary = aggregate_weekly(&[campaign_with_weeks(&["2024-01-08", "week one"])]);
        let json = serde_json::to_string(&summary).expect("serialize weekly summary");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value[0]["week_start"], "2024-01-08");
        assert_eq!(value[0]["date"], "2024-01-08");
        assert_eq!(value[0]["label"], "Jan 8");
        assert!(value[1]["date"].is_null());
    }

    #[test]
    fn labels_use_short_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8);
        assert_eq!(week_label("2024-01-08", date), "Jan 8");
        assert_eq!(week_label("week one", None), "week one");
    }
}
