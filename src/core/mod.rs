pub mod bar_series;
pub mod bubble_series;
pub mod color_ramp;
pub mod geo;
pub mod line_series;
pub mod scale;
pub mod series;
pub mod types;

pub use bar_series::{BarGeometry, BarLayout, DEFAULT_BAR_WIDTH_RATIO, project_bars};
pub use bubble_series::{
    BubbleGeometry, BubbleMode, BubblePoint, BubbleSample, project_bubbles, topmost_bubble_at,
};
pub use color_ramp::{RampMode, Rgb8, cost_color, growth_color, ramp_color};
pub use geo::{GeoCoordinate, locate_point, project_equirectangular, seeded_jitter};
pub use line_series::{
    CubicSegment, LineLayout, ProjectedPoint, nearest_index_by_x, project_line, smooth_segments,
};
pub use scale::{IndexScale, SizeScale, ValueScale, value_extent};
pub use series::{ChartSeries, SeriesPoint};
pub use types::{PlotArea, PlotInsets, Viewport};
