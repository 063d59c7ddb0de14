//! View models for the four dashboard pages.
//!
//! Each builder reads a dataset, runs the matching fold and wires the result
//! into metric cards, interactive charts and table rows. Layout beyond that
//! belongs to the host.

mod config;
mod views;

pub use config::DashboardConfig;
pub use views::{all_views, demographic_view, device_view, region_view, weekly_view};

use serde::Serialize;

use crate::api::{BarChart, BubbleMap, LineChart};
use crate::interaction::Tooltip;
use crate::render::RenderFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Demographic,
    Device,
    Region,
    Weekly,
}

impl ViewKind {
    pub const ALL: [Self; 4] = [Self::Demographic, Self::Device, Self::Region, Self::Weekly];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Demographic => "Demographic View",
            Self::Device => "Device View",
            Self::Region => "Region View",
            Self::Weekly => "Weekly View",
        }
    }

    #[must_use]
    pub fn subtitle(self) -> Option<&'static str> {
        match self {
            Self::Demographic => None,
            Self::Device => Some("Analyze marketing performance across different devices"),
            Self::Region => Some("Explore marketing performance across different regions"),
            Self::Weekly => Some("Track marketing performance over time"),
        }
    }

    /// Stable identifier used for output file names.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Demographic => "demographic-view",
            Self::Device => "device-view",
            Self::Region => "region-view",
            Self::Weekly => "weekly-view",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
}

impl MetricCard {
    #[must_use]
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// One of the chart types a view can hold.
#[derive(Debug, Clone)]
pub enum DashboardChart {
    Bar(BarChart),
    Line(LineChart),
    Bubble(BubbleMap),
}

impl DashboardChart {
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        match self {
            Self::Bar(chart) => chart.frame(),
            Self::Line(chart) => chart.frame(),
            Self::Bubble(chart) => chart.frame(),
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&Tooltip> {
        match self {
            Self::Bar(chart) => chart.pointer_move(x, y),
            Self::Line(chart) => chart.pointer_move(x, y),
            Self::Bubble(chart) => chart.pointer_move(x, y),
        }
    }

    pub fn pointer_leave(&mut self) {
        match self {
            Self::Bar(chart) => chart.pointer_leave(),
            Self::Line(chart) => chart.pointer_leave(),
            Self::Bubble(chart) => chart.pointer_leave(),
        }
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        match self {
            Self::Bar(chart) => chart.tooltip(),
            Self::Line(chart) => chart.tooltip(),
            Self::Bubble(chart) => chart.tooltip(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPanel {
    pub title: String,
    /// File-name friendly identifier, unique within a view.
    pub slug: String,
    #[serde(skip)]
    pub chart: DashboardChart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub key: &'static str,
    pub header: &'static str,
    pub align: ColumnAlign,
}

impl TableColumn {
    #[must_use]
    pub const fn left(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            align: ColumnAlign::Left,
        }
    }

    #[must_use]
    pub const fn right(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            align: ColumnAlign::Right,
        }
    }
}

/// Display-ready table; every row has one cell per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Cell text by row index and column key.
    #[must_use]
    pub fn cell(&self, row: usize, key: &str) -> Option<&str> {
        let column = self.columns.iter().position(|column| column.key == key)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub kind: ViewKind,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub cards: Vec<MetricCard>,
    pub charts: Vec<ChartPanel>,
    pub tables: Vec<DataTable>,
}

impl ViewModel {
    #[must_use]
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            title: kind.title(),
            subtitle: kind.subtitle(),
            cards: Vec::new(),
            charts: Vec::new(),
            tables: Vec::new(),
        }
    }

    #[must_use]
    pub fn chart(&self, slug: &str) -> Option<&ChartPanel> {
        self.charts.iter().find(|panel| panel.slug == slug)
    }

    pub fn chart_mut(&mut self, slug: &str) -> Option<&mut ChartPanel> {
        self.charts.iter_mut().find(|panel| panel.slug == slug)
    }

    #[must_use]
    pub fn card(&self, title: &str) -> Option<&MetricCard> {
        self.cards.iter().find(|card| card.title == title)
    }
}
