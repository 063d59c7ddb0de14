use campaign_charts::aggregation::{
    CampaignRecord, DemographicEntry, DeviceEntry, EngagementCounts, MarketingDataset, Rate,
    WeeklyEntry,
};
use campaign_charts::core::{PlotArea, PlotInsets, ValueScale, Viewport, growth_color};
use proptest::prelude::*;

const DEVICE_NAMES: [&str; 6] = ["Desktop", "PC-1", "mobile-app", "SmartPhone", "Tablet", "tv"];
const GENDERS: [&str; 3] = ["Male", "female", "unknown"];

fn device_entry() -> impl Strategy<Value = DeviceEntry> {
    (0..DEVICE_NAMES.len(), 0u64..10_000, 0u64..1_000, 0.0f64..5_000.0).prop_map(
        |(name, impressions, clicks, spend)| {
            DeviceEntry::new(
                DEVICE_NAMES[name],
                EngagementCounts::new(impressions, clicks, clicks / 2),
                spend,
                spend * 1.5,
            )
        },
    )
}

fn demographic_entry() -> impl Strategy<Value = DemographicEntry> {
    (0..GENDERS.len(), 0..4usize, 0u64..1_000, 0.0f64..100.0).prop_map(
        |(gender, age, clicks, share)| {
            DemographicEntry::new(
                ["18-24", "25-34", "35-44", "45+"][age],
                GENDERS[gender],
                share,
                EngagementCounts::new(clicks * 10, clicks, clicks / 3),
            )
        },
    )
}

proptest! {
    #[test]
    fn device_buckets_never_invent_clicks(
        entries in prop::collection::vec(device_entry(), 0..40)
    ) {
        let input_clicks: u64 = entries.iter().map(|entry| entry.counts.clicks).sum();
        let all_known = entries
            .iter()
            .all(|entry| !matches!(entry.device.as_str(), "Tablet" | "tv"));
        let dataset = MarketingDataset::new(vec![
            entries
                .into_iter()
                .fold(CampaignRecord::new(0.0, 0.0), CampaignRecord::with_device),
        ]);

        let bucketed = dataset.devices().combined().clicks;
        prop_assert!(bucketed <= input_clicks);
        if all_known {
            prop_assert_eq!(bucketed, input_clicks);
        }
    }

    #[test]
    fn demographic_buckets_never_invent_clicks(
        entries in prop::collection::vec(demographic_entry(), 0..40)
    ) {
        let input_clicks: u64 = entries.iter().map(|entry| entry.performance.clicks).sum();
        let dataset = MarketingDataset::new(vec![
            entries
                .into_iter()
                .fold(CampaignRecord::new(1_000.0, 2_000.0), CampaignRecord::with_demographic),
        ]);

        let summary = dataset.demographics();
        prop_assert!(summary.male.clicks + summary.female.clicks <= input_clicks);
        prop_assert_eq!(summary.all_age_groups.grand_total().clicks, input_clicks);
    }

    #[test]
    fn single_entry_share_is_exact(
        spend in 0.0f64..1_000_000.0,
        share in 0.0f64..100.0
    ) {
        let dataset = MarketingDataset::new(vec![
            CampaignRecord::new(spend, 0.0).with_demographic(DemographicEntry::new(
                "25-34",
                "Male",
                share,
                EngagementCounts::default(),
            )),
        ]);

        prop_assert_eq!(dataset.demographics().male.spend, spend * share / 100.0);
    }

    #[test]
    fn ctr_is_zero_without_impressions(clicks in 0u64..1_000_000) {
        prop_assert_eq!(Rate::percentage(clicks as f64, 0.0), Rate::ZERO);
        prop_assert_eq!(Rate::percentage(clicks as f64, 0.0).to_string(), "0.00");
    }

    #[test]
    fn weekly_order_ignores_input_order(
        mut days in prop::collection::vec(0i64..700, 1..20)
    ) {
        let base = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).expect("base date");
        let entries: Vec<WeeklyEntry> = days
            .iter()
            .map(|offset| {
                let date = base + chrono::Duration::days(*offset);
                WeeklyEntry::new(date.format("%Y-%m-%d").to_string(), 1.0, 1.0)
            })
            .collect();
        let dataset = MarketingDataset::new(vec![
            entries
                .into_iter()
                .fold(CampaignRecord::new(0.0, 0.0), CampaignRecord::with_week),
        ]);

        days.sort_unstable();
        days.dedup();
        let summary = dataset.weekly();
        let dates: Vec<_> = summary.weeks().iter().map(|week| week.date).collect();
        let expected: Vec<_> = days
            .iter()
            .map(|offset| Some(base + chrono::Duration::days(*offset)))
            .collect();
        prop_assert_eq!(dates, expected);
    }

    #[test]
    fn value_scale_is_deterministic(
        min in -1_000_000.0f64..1_000_000.0,
        span in 0.0f64..1_000_000.0,
        factor in 0.0f64..1.0
    ) {
        let area = PlotArea::inside(
            Viewport::new(600, 300),
            PlotInsets::new(20.0, 40.0, 40.0, 60.0),
        );
        let value = min + span * factor;
        let first = ValueScale::vertical(min, min + span, area).to_pixel(value);
        let second = ValueScale::vertical(min, min + span, area).to_pixel(value);
        prop_assert!(first.is_finite());
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn growth_ramp_greens_with_value(low in 0.0f64..1.0, high in 0.0f64..1.0) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        prop_assert!(growth_color(high).green >= growth_color(low).green);
        prop_assert!(growth_color(high).red <= growth_color(low).red);
    }
}
