//! campaign-charts: campaign analytics folds and headless chart rendering.
//!
//! Raw campaign records are folded into per-category totals
//! ([`aggregation`]), projected into plot geometry ([`core`]) and painted
//! into backend-neutral [`render::RenderFrame`]s by the chart types in
//! [`api`]. The [`dashboard`] module wires all of it into the four
//! dashboard views.

pub mod aggregation;
pub mod api;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use aggregation::MarketingDataset;
pub use api::{BarChart, BubbleMap, BubbleMapOptions, ChartOptions, LineChart};
pub use dashboard::{DashboardConfig, ViewKind, ViewModel};
pub use error::{ChartError, ChartResult};
