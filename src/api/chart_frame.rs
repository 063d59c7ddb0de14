//! Frame pieces shared by the chart types.

use tracing::warn;

use crate::core::{ChartSeries, PlotArea, SeriesPoint, ValueScale, Viewport};
use crate::render::{
    LayerKind, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::chart_style::{ChartStyle, GRID_CELL_PX};
use super::value_format::LabelFormatter;

pub const NO_DATA_LABEL: &str = "No data available";

/// Placeholder height for empty bar and line charts.
pub const CARTESIAN_PLACEHOLDER_HEIGHT_PX: u32 = 192;
/// Placeholder height for an empty bubble map.
pub const BUBBLE_PLACEHOLDER_HEIGHT_PX: u32 = 256;

/// Intervals between value-axis labels; six labels in total.
pub const VALUE_AXIS_INTERVALS: usize = 5;

const PLACEHOLDER_FONT_SIZE_PX: f64 = 14.0;
const VALUE_LABEL_GAP_PX: f64 = 10.0;
const CATEGORY_LABEL_OFFSET_PX: f64 = 20.0;
const LABEL_BASELINE_SHIFT_PX: f64 = 4.0;

/// Background fill plus the square grid.
pub(crate) fn base_frame(
    viewport: Viewport,
    title: Option<String>,
    style: &ChartStyle,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport).with_title(title);
    paint_background(&mut frame, viewport, style);
    frame
}

pub(crate) fn placeholder_frame(
    width: u32,
    height: u32,
    title: Option<String>,
    style: &ChartStyle,
) -> RenderFrame {
    let viewport = Viewport::new(width, height);
    let mut frame = RenderFrame::placeholder(viewport).with_title(title);
    frame.push_rect(
        LayerKind::Background,
        RectPrimitive::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
            style.background_color,
        ),
    );
    frame.push_text(
        LayerKind::Labels,
        TextPrimitive::new(
            NO_DATA_LABEL,
            f64::from(width) / 2.0,
            f64::from(height) / 2.0 + PLACEHOLDER_FONT_SIZE_PX / 3.0,
            PLACEHOLDER_FONT_SIZE_PX,
            style.placeholder_text_color,
            TextHAlign::Center,
        ),
    );
    frame
}

fn paint_background(frame: &mut RenderFrame, viewport: Viewport, style: &ChartStyle) {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    frame.push_rect(
        LayerKind::Background,
        RectPrimitive::new(0.0, 0.0, width, height, style.background_color),
    );

    let mut x = 0.0;
    while x < width {
        frame.push_line(
            LayerKind::Grid,
            LinePrimitive::new(x, 0.0, x, height, style.grid_line_width, style.grid_line_color),
        );
        x += GRID_CELL_PX;
    }
    let mut y = 0.0;
    while y < height {
        frame.push_line(
            LayerKind::Grid,
            LinePrimitive::new(0.0, y, width, y, style.grid_line_width, style.grid_line_color),
        );
        y += GRID_CELL_PX;
    }
}

/// Horizontal guide lines with formatted value labels left of the plot.
pub(crate) fn paint_value_axis(
    frame: &mut RenderFrame,
    scale: ValueScale,
    area: PlotArea,
    formatter: &LabelFormatter,
    style: &ChartStyle,
) {
    for value in scale.ticks(VALUE_AXIS_INTERVALS) {
        let y = scale.to_pixel(value);
        frame.push_line(
            LayerKind::Axis,
            LinePrimitive::new(area.left, y, area.right(), y, 0.5, style.axis_line_color),
        );
        let label = formatter.format(value);
        if label.is_empty() {
            continue;
        }
        frame.push_text(
            LayerKind::Labels,
            TextPrimitive::new(
                label,
                area.left - VALUE_LABEL_GAP_PX,
                y + LABEL_BASELINE_SHIFT_PX,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Right,
            ),
        );
    }
}

/// Raw category label centered under `x`.
pub(crate) fn paint_category_label(
    frame: &mut RenderFrame,
    label: &str,
    x: f64,
    area: PlotArea,
    style: &ChartStyle,
) {
    if label.is_empty() {
        return;
    }
    frame.push_text(
        LayerKind::Labels,
        TextPrimitive::new(
            label,
            x,
            area.bottom() + CATEGORY_LABEL_OFFSET_PX,
            style.axis_label_font_size_px,
            style.axis_label_color,
            TextHAlign::Center,
        ),
    );
}

/// Two-line tooltip box: bold primary line above a secondary line.
pub(crate) struct TooltipBox<'a> {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub center_x: f64,
    pub primary: &'a str,
    pub primary_baseline: f64,
    pub secondary: &'a str,
    pub secondary_baseline: f64,
}

pub(crate) fn paint_tooltip_box(
    frame: &mut RenderFrame,
    tooltip: &TooltipBox<'_>,
    style: &ChartStyle,
) {
    frame.push_rect(
        LayerKind::Tooltip,
        RectPrimitive::new(
            tooltip.left,
            tooltip.top,
            tooltip.width,
            tooltip.height,
            style.tooltip_fill_color,
        )
        .with_border(1.0, style.tooltip_border_color)
        .with_corner_radius(tooltip.corner_radius),
    );
    for (text, baseline, color) in [
        (tooltip.primary, tooltip.primary_baseline, style.tooltip_primary_text_color),
        (tooltip.secondary, tooltip.secondary_baseline, style.tooltip_secondary_text_color),
    ] {
        if text.is_empty() {
            continue;
        }
        frame.push_text(
            LayerKind::Tooltip,
            TextPrimitive::new(
                text,
                tooltip.center_x,
                baseline,
                style.axis_label_font_size_px,
                color,
                TextHAlign::Center,
            ),
        );
    }
}

/// Replaces non-finite values with zero so projected geometry stays drawable.
pub(crate) fn finite_series(series: ChartSeries) -> ChartSeries {
    if series.values().all(f64::is_finite) {
        return series;
    }
    warn!(points = series.len(), "non-finite series values drawn as zero");
    series
        .points()
        .iter()
        .map(|point| {
            let value = if point.value.is_finite() { point.value } else { 0.0 };
            SeriesPoint::new(point.label.as_str(), value)
        })
        .collect()
}

/// Rough width of `text` for sizing tooltip boxes without font metrics.
#[must_use]
pub(crate) fn estimate_text_width(text: &str, font_size_px: f64) -> f64 {
    text.chars().count() as f64 * font_size_px * 0.6
}

#[cfg(test)]
mod tests {
    use super::{NO_DATA_LABEL, base_frame, placeholder_frame};
    use crate::api::ChartStyle;
    use crate::core::Viewport;
    use crate::render::LayerKind;

    #[test]
    fn grid_uses_forty_pixel_cells() {
        let frame = base_frame(Viewport::new(600, 300), None, &ChartStyle::default());
        let grid = frame.layer(LayerKind::Grid).expect("grid layer");
        // 15 vertical (0..600 step 40) and 8 horizontal (0..300 step 40).
        assert_eq!(grid.lines.len(), 23);
    }

    #[test]
    fn placeholder_centers_no_data_label() {
        let frame = placeholder_frame(600, 192, None, &ChartStyle::default());
        assert!(frame.is_placeholder());
        let label = frame.texts().next().expect("placeholder label");
        assert_eq!(label.text, NO_DATA_LABEL);
        assert_eq!(label.x, 300.0);
    }
}
