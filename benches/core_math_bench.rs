use campaign_charts::aggregation::{
    CampaignRecord, DemographicEntry, DeviceEntry, EngagementCounts, MarketingDataset,
    RegionalEntry, WeeklyEntry,
};
use campaign_charts::api::{BubbleMap, BubbleMapOptions, ChartOptions, LineChart};
use campaign_charts::core::{ChartSeries, PlotArea, PlotInsets, Viewport, project_line};
use campaign_charts::dashboard::{DashboardConfig, all_views};
use campaign_charts::render::SvgRenderer;
use chrono::{Duration, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const AGE_GROUPS: [&str; 5] = ["18-24", "25-34", "35-44", "45-54", "55+"];
const REGIONS: [&str; 6] = [
    "Europe",
    "North America",
    "South America",
    "Asia",
    "Africa",
    "Oceania",
];

fn generated_dataset(campaigns: usize) -> MarketingDataset {
    let first_week = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let records = (0..campaigns)
        .map(|i| {
            let spend = 500.0 + (i % 37) as f64 * 20.0;
            let record = CampaignRecord::new(spend, spend * 1.8);
            let record = AGE_GROUPS.iter().enumerate().fold(record, |record, (age, group)| {
                let counts = EngagementCounts::new(1_000 + age as u64 * 10, 50, 5);
                record
                    .with_demographic(DemographicEntry::new(*group, "Male", 10.0, counts))
                    .with_demographic(DemographicEntry::new(*group, "Female", 10.0, counts))
            });
            let record = record
                .with_device(DeviceEntry::new(
                    "Desktop",
                    EngagementCounts::new(4_000, 120, 12),
                    spend * 0.4,
                    spend * 0.7,
                ))
                .with_device(DeviceEntry::new(
                    "Mobile",
                    EngagementCounts::new(6_000, 180, 15),
                    spend * 0.6,
                    spend * 1.1,
                ))
                .with_region(RegionalEntry::new(
                    REGIONS[i % REGIONS.len()],
                    "XX",
                    spend,
                    spend * 1.8,
                ));
            (0..12).fold(record, |record, week| {
                let start = first_week + Duration::weeks(week);
                record.with_week(WeeklyEntry::new(
                    start.format("%Y-%m-%d").to_string(),
                    spend / 12.0,
                    spend * 0.15,
                ))
            })
        })
        .collect();
    MarketingDataset::new(records)
}

fn bench_aggregate_views_1k(c: &mut Criterion) {
    let dataset = generated_dataset(1_000);
    let config = DashboardConfig::default();

    c.bench_function("aggregate_views_1k", |b| {
        b.iter(|| {
            let _ = all_views(black_box(&dataset), black_box(&config));
        })
    });
}

fn bench_line_projection_10k(c: &mut Criterion) {
    let area = PlotArea::inside(Viewport::new(1920, 1080), PlotInsets::new(20.0, 40.0, 40.0, 60.0));
    let series: ChartSeries = (0..10_000)
        .map(|i| (format!("W{i}"), 100.0 + (i % 250) as f64 * 3.5))
        .collect();

    c.bench_function("line_projection_10k", |b| {
        b.iter(|| {
            let _ = project_line(black_box(&series), black_box(area));
        })
    });
}

fn bench_svg_render(c: &mut Criterion) {
    let dataset = generated_dataset(200);
    let weekly = LineChart::new(
        dataset.weekly().revenue_series(),
        ChartOptions::titled("Revenue by Week").with_height(400),
    );
    let regions = BubbleMap::new(dataset.regions().bubble_points(), BubbleMapOptions::default());

    c.bench_function("svg_render_line_and_bubbles", |b| {
        b.iter(|| {
            let _ = SvgRenderer::render_to_string(black_box(&weekly.frame()))
                .expect("line chart renders");
            let _ = SvgRenderer::render_to_string(black_box(&regions.frame()))
                .expect("bubble map renders");
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate_views_1k,
    bench_line_projection_10k,
    bench_svg_render
);
criterion_main!(benches);
