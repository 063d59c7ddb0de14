use campaign_charts::aggregation::{
    CampaignRecord, DemographicEntry, DeviceEntry, EngagementCounts, MarketingDataset,
    RegionalEntry, WeeklyEntry,
};
use campaign_charts::api::NumberLocale;
use campaign_charts::dashboard::{
    DashboardChart, DashboardConfig, ViewKind, all_views, demographic_view, device_view,
    region_view, weekly_view,
};
use campaign_charts::render::SvgRenderer;

fn sample_dataset() -> MarketingDataset {
    MarketingDataset::new(vec![
        CampaignRecord::new(1000.0, 2000.0)
            .with_demographic(DemographicEntry::new(
                "18-24",
                "Male",
                50.0,
                EngagementCounts::new(100, 10, 2),
            ))
            .with_demographic(DemographicEntry::new(
                "25-34",
                "Female",
                50.0,
                EngagementCounts::new(4000, 120, 12),
            ))
            .with_device(DeviceEntry::new(
                "Desktop",
                EngagementCounts::new(3000, 90, 9),
                400.0,
                700.0,
            ))
            .with_device(DeviceEntry::new(
                "iPhone",
                EngagementCounts::new(1100, 40, 5),
                600.0,
                1300.0,
            ))
            .with_region(
                RegionalEntry::new("Europe", "DE", 600.0, 1200.0).with_coordinates(50.1, 8.7),
            )
            .with_region(RegionalEntry::new("North America", "US", 400.0, 800.0))
            .with_week(WeeklyEntry::new("2024-01-08", 500.0, 900.0))
            .with_week(WeeklyEntry::new("2024-01-01", 500.0, 1100.0)),
    ])
}

#[test]
fn demographic_view_has_gender_cards_age_charts_and_tables() {
    let view = demographic_view(&sample_dataset(), &DashboardConfig::default());
    assert_eq!(view.kind, ViewKind::Demographic);
    assert_eq!(view.title, "Demographic View");
    assert_eq!(view.cards.len(), 6);
    assert_eq!(
        view.card("Total Clicks by Males").map(|card| card.value.as_str()),
        Some("10")
    );
    assert_eq!(
        view.card("Total Spend by Females").map(|card| card.value.as_str()),
        Some("$500")
    );
    assert_eq!(
        view.card("Total Revenue by Males").map(|card| card.value.as_str()),
        Some("$1,000")
    );

    let slugs: Vec<&str> = view.charts.iter().map(|panel| panel.slug.as_str()).collect();
    assert_eq!(slugs, ["total-spend-by-age-group", "total-revenue-by-age-group"]);

    assert_eq!(view.tables.len(), 2);
    let male = &view.tables[0];
    assert_eq!(male.title, "Campaign Performance by Male Age Groups");
    assert_eq!(male.rows.len(), 1);
    assert_eq!(male.cell(0, "age_group"), Some("18-24"));
    assert_eq!(male.cell(0, "ctr"), Some("10.00"));
    assert_eq!(male.cell(0, "conversion_rate"), Some("20.00"));
    let female = &view.tables[1];
    assert_eq!(female.cell(0, "impressions"), Some("4,000"));
    assert_eq!(female.cell(0, "ctr"), Some("3.00"));
}

#[test]
fn device_view_sorts_table_by_revenue() {
    let view = device_view(&sample_dataset(), &DashboardConfig::default());
    assert_eq!(
        view.subtitle,
        Some("Analyze marketing performance across different devices")
    );
    let cards: Vec<(&str, &str)> = view
        .cards
        .iter()
        .map(|card| (card.title.as_str(), card.value.as_str()))
        .collect();
    assert_eq!(
        cards,
        [
            ("Total Impressions", "4,100"),
            ("Total Clicks", "130"),
            ("Total Spend", "$1,000"),
            ("Total Revenue", "$2,000"),
        ]
    );

    let table = &view.tables[0];
    assert_eq!(table.columns.len(), 9);
    assert_eq!(table.cell(0, "device"), Some("Mobile"));
    assert_eq!(table.cell(0, "revenue"), Some("$1,300"));
    assert_eq!(table.cell(0, "roas"), Some("2.17"));
    assert_eq!(table.cell(1, "device"), Some("Desktop"));
    assert!(table.rows.iter().all(|row| row.len() == table.columns.len()));
}

#[test]
fn region_view_holds_revenue_and_spend_maps() {
    let mut view = region_view(&sample_dataset(), &DashboardConfig::default());
    let titles: Vec<&str> = view.charts.iter().map(|panel| panel.title.as_str()).collect();
    assert_eq!(titles, ["Revenue by Region", "Spend by Region"]);

    let panel = view.chart_mut("spend-by-region").expect("spend map");
    let DashboardChart::Bubble(map) = &panel.chart else {
        panic!("expected a bubble map");
    };
    let europe = map.bubbles()[0];
    let tooltip = panel
        .chart
        .pointer_move(europe.cx, europe.cy)
        .cloned()
        .expect("hover europe");
    assert_eq!(tooltip.label, "Europe");
    assert_eq!(tooltip.value, 600.0);
    panel.chart.pointer_leave();
    assert!(panel.chart.tooltip().is_none());
}

#[test]
fn weekly_view_uses_tall_currency_line_charts() {
    let view = weekly_view(&sample_dataset(), &DashboardConfig::default());
    assert_eq!(view.charts.len(), 2);
    for panel in &view.charts {
        let frame = panel.chart.frame();
        assert_eq!(frame.viewport.height, 400);
        assert!(frame.texts().any(|text| text.text == "Jan 1"));
        assert!(frame.texts().any(|text| text.text.starts_with('$')));
    }
}

#[test]
fn configured_locale_reaches_cards_and_axes() {
    let config = DashboardConfig::from_json_str(r#"{ "locale": "es_es", "chart_width": 800 }"#)
        .expect("config");
    assert_eq!(config.locale, NumberLocale::EsEs);
    let view = device_view(&sample_dataset(), &config);
    assert_eq!(
        view.card("Total Impressions").map(|card| card.value.as_str()),
        Some("4.100")
    );
    assert_eq!(view.charts[0].chart.frame().viewport.width, 800);
}

#[test]
fn empty_dataset_renders_placeholders_except_device_charts() {
    let views = all_views(&MarketingDataset::default(), &DashboardConfig::default());
    let kinds: Vec<ViewKind> = views.iter().map(|view| view.kind).collect();
    assert_eq!(kinds, ViewKind::ALL);

    for view in &views {
        for panel in &view.charts {
            let frame = panel.chart.frame();
            let markup = SvgRenderer::render_to_string(&frame).expect("render");
            assert!(markup.starts_with("<svg"));
            let expect_placeholder = view.kind != ViewKind::Device;
            assert_eq!(frame.is_placeholder(), expect_placeholder, "{}", panel.slug);
        }
    }

    let device = &views[1];
    assert_eq!(device.tables[0].rows.len(), 2);
    assert_eq!(device.tables[0].cell(0, "ctr"), Some("0.00"));
}

#[test]
fn summary_serializes_without_chart_state() {
    let views = all_views(&sample_dataset(), &DashboardConfig::default());
    let json = serde_json::to_value(&views).expect("serialize");
    let first_panel = &json[0]["charts"][0];
    assert_eq!(first_panel["slug"], "total-spend-by-age-group");
    assert!(first_panel.get("chart").is_none());
    assert_eq!(json[1]["kind"], "device");
}
