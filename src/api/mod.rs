//! Chart types that own projected geometry and tooltip state and build
//! `RenderFrame`s on demand.

mod bar_chart;
mod bubble_map;
mod chart_frame;
mod chart_style;
mod line_chart;
mod options;
mod value_format;

pub use bar_chart::BarChart;
pub use bubble_map::{
    BUBBLE_LABEL_MAX_CHARS, BUBBLE_LABEL_MIN_FONT_PX, BubbleMap, label_font_size, truncate_label,
};
pub use chart_frame::{
    BUBBLE_PLACEHOLDER_HEIGHT_PX, CARTESIAN_PLACEHOLDER_HEIGHT_PX, NO_DATA_LABEL,
    VALUE_AXIS_INTERVALS,
};
pub use chart_style::{ChartStyle, GRID_CELL_PX};
pub use line_chart::LineChart;
pub use options::{
    BubbleMapOptions, CARTESIAN_INSETS, ChartOptions, DEFAULT_BUBBLE_MAP_HEIGHT,
    DEFAULT_BUBBLE_MAP_PADDING, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
};
pub use value_format::{
    MAX_FRACTION_DIGITS, NumberLocale, ValueFormat, ValueFormatterFn, format_currency,
    format_number,
};
