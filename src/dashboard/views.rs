use tracing::debug;

use crate::aggregation::{CategoryRow, DemographicSummary, Gender, MarketingDataset};
use crate::api::{
    BarChart, BubbleMap, BubbleMapOptions, ChartOptions, LineChart, NumberLocale, ValueFormat,
    format_currency, format_number,
};
use crate::core::{BubbleMode, ChartSeries};

use super::{
    ChartPanel, DashboardChart, DashboardConfig, DataTable, MetricCard, TableColumn, ViewKind,
    ViewModel,
};

const AGE_GROUP_COLUMNS: [TableColumn; 6] = [
    TableColumn::left("age_group", "Age Group"),
    TableColumn::right("impressions", "Impressions"),
    TableColumn::right("clicks", "Clicks"),
    TableColumn::right("conversions", "Conversions"),
    TableColumn::right("ctr", "CTR (%)"),
    TableColumn::right("conversion_rate", "Conversion Rate (%)"),
];

const DEVICE_COLUMNS: [TableColumn; 9] = [
    TableColumn::left("device", "Device"),
    TableColumn::right("impressions", "Impressions"),
    TableColumn::right("clicks", "Clicks"),
    TableColumn::right("conversions", "Conversions"),
    TableColumn::right("spend", "Spend ($)"),
    TableColumn::right("revenue", "Revenue ($)"),
    TableColumn::right("ctr", "CTR (%)"),
    TableColumn::right("conversion_rate", "Conv. Rate (%)"),
    TableColumn::right("roas", "ROAS"),
];

/// Every view in navigation order.
#[must_use]
pub fn all_views(dataset: &MarketingDataset, config: &DashboardConfig) -> Vec<ViewModel> {
    ViewKind::ALL
        .into_iter()
        .map(|kind| match kind {
            ViewKind::Demographic => demographic_view(dataset, config),
            ViewKind::Device => device_view(dataset, config),
            ViewKind::Region => region_view(dataset, config),
            ViewKind::Weekly => weekly_view(dataset, config),
        })
        .collect()
}

#[must_use]
pub fn demographic_view(dataset: &MarketingDataset, config: &DashboardConfig) -> ViewModel {
    let summary = dataset.demographics();
    let locale = config.locale;
    let mut view = ViewModel::new(ViewKind::Demographic);

    for gender in [Gender::Male, Gender::Female] {
        let totals = summary.gender_totals(gender);
        let plural = gender_plural(gender);
        view.cards.extend([
            MetricCard::new(
                format!("Total Clicks by {plural}"),
                format_number(totals.clicks as f64, locale),
            ),
            MetricCard::new(
                format!("Total Spend by {plural}"),
                format_currency(totals.spend, locale),
            ),
            MetricCard::new(
                format!("Total Revenue by {plural}"),
                format_currency(totals.revenue, locale),
            ),
        ]);
    }

    view.charts.push(bar_panel(
        "Total Spend by Age Group",
        summary.age_group_spend(),
        config,
    ));
    view.charts.push(bar_panel(
        "Total Revenue by Age Group",
        summary.age_group_revenue(),
        config,
    ));

    view.tables.push(age_group_table(&summary, Gender::Male, locale));
    view.tables.push(age_group_table(&summary, Gender::Female, locale));
    debug!(
        age_groups = summary.all_age_groups.len(),
        "built demographic view"
    );
    view
}

#[must_use]
pub fn device_view(dataset: &MarketingDataset, config: &DashboardConfig) -> ViewModel {
    let summary = dataset.devices();
    let locale = config.locale;
    let combined = summary.combined();
    let mut view = ViewModel::new(ViewKind::Device);

    view.cards.extend([
        MetricCard::new("Total Impressions", format_number(combined.impressions as f64, locale)),
        MetricCard::new("Total Clicks", format_number(combined.clicks as f64, locale)),
        MetricCard::new("Total Spend", format_currency(combined.spend, locale)),
        MetricCard::new("Total Revenue", format_currency(combined.revenue, locale)),
    ]);

    view.charts
        .push(bar_panel("Spend by Device", summary.spend_series(), config));
    view.charts
        .push(bar_panel("Revenue by Device", summary.revenue_series(), config));

    let mut rows = summary.rows();
    // sort_by is stable, ties keep Desktop before Mobile.
    rows.sort_by(|a, b| b.totals.revenue.total_cmp(&a.totals.revenue));
    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.key.label().to_owned()];
            cells.extend(count_cells(row, locale));
            cells.extend([
                format_currency(row.totals.spend, locale),
                format_currency(row.totals.revenue, locale),
                row.derived.ctr.to_string(),
                row.derived.conversion_rate.to_string(),
                row.derived.roas.to_string(),
            ]);
            cells
        })
        .collect();
    view.tables.push(DataTable {
        title: "Device Performance Details".to_owned(),
        columns: DEVICE_COLUMNS.to_vec(),
        rows,
    });
    debug!(
        impressions = combined.impressions,
        revenue = combined.revenue,
        "built device view"
    );
    view
}

#[must_use]
pub fn region_view(dataset: &MarketingDataset, config: &DashboardConfig) -> ViewModel {
    let summary = dataset.regions();
    let points = summary.bubble_points();
    let mut view = ViewModel::new(ViewKind::Region);

    for (title, mode) in [
        ("Revenue by Region", BubbleMode::Revenue),
        ("Spend by Region", BubbleMode::Spend),
    ] {
        let mut options = BubbleMapOptions::for_mode(mode)
            .with_title(title)
            .with_size(config.chart_width, config.bubble_map_height)
            .with_locale(config.locale);
        options.padding = config.bubble_map_padding;
        view.charts.push(ChartPanel {
            title: title.to_owned(),
            slug: slugify(title),
            chart: DashboardChart::Bubble(BubbleMap::new(points.clone(), options)),
        });
    }
    debug!(regions = summary.len(), "built region view");
    view
}

#[must_use]
pub fn weekly_view(dataset: &MarketingDataset, config: &DashboardConfig) -> ViewModel {
    let summary = dataset.weekly();
    let mut view = ViewModel::new(ViewKind::Weekly);

    for (title, series) in [
        ("Revenue by Week", summary.revenue_series()),
        ("Spend by Week", summary.spend_series()),
    ] {
        let options = currency_options(title, config, config.weekly_chart_height);
        view.charts.push(ChartPanel {
            title: title.to_owned(),
            slug: slugify(title),
            chart: DashboardChart::Line(LineChart::new(series, options)),
        });
    }
    debug!(weeks = summary.len(), "built weekly view");
    view
}

fn bar_panel(title: &str, series: ChartSeries, config: &DashboardConfig) -> ChartPanel {
    let options = currency_options(title, config, config.bar_chart_height);
    ChartPanel {
        title: title.to_owned(),
        slug: slugify(title),
        chart: DashboardChart::Bar(BarChart::new(series, options)),
    }
}

fn currency_options(title: &str, config: &DashboardConfig, height: u32) -> ChartOptions {
    ChartOptions::titled(title)
        .with_size(config.chart_width, height)
        .with_value_format(ValueFormat::Currency)
        .with_locale(config.locale)
}

fn age_group_table(
    summary: &DemographicSummary,
    gender: Gender,
    locale: NumberLocale,
) -> DataTable {
    let rows = summary
        .age_group_rows(gender)
        .iter()
        .map(|row| {
            let mut cells = vec![row.key.clone()];
            cells.extend(count_cells(row, locale));
            cells.extend([
                row.derived.ctr.to_string(),
                row.derived.conversion_rate.to_string(),
            ]);
            cells
        })
        .collect();
    DataTable {
        title: format!("Campaign Performance by {} Age Groups", gender.label()),
        columns: AGE_GROUP_COLUMNS.to_vec(),
        rows,
    }
}

fn count_cells<K>(row: &CategoryRow<K>, locale: NumberLocale) -> [String; 3] {
    [
        format_number(row.totals.impressions as f64, locale),
        format_number(row.totals.clicks as f64, locale),
        format_number(row.totals.conversions as f64, locale),
    ]
}

fn gender_plural(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Males",
        Gender::Female => "Females",
    }
}

/// `"Spend by Device"` becomes `"spend-by-device"`.
fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugs_are_lowercase_and_dashed() {
        assert_eq!(slugify("Total Spend by Age Group"), "total-spend-by-age-group");
        assert_eq!(slugify("Revenue ($) by Week"), "revenue-by-week");
    }
}
