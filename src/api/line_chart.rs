use tracing::trace;

use crate::core::{ChartSeries, LineLayout, PlotArea, project_line};
use crate::interaction::{InteractionState, Tooltip};
use crate::render::{
    CirclePrimitive, LayerKind, LinePrimitive, LineStrokeStyle, PathCommand, PathPrimitive,
    RenderFrame,
};

use super::chart_frame::{
    CARTESIAN_PLACEHOLDER_HEIGHT_PX, TooltipBox, base_frame, finite_series, paint_category_label,
    paint_tooltip_box, paint_value_axis, placeholder_frame,
};
use super::options::CARTESIAN_INSETS;
use super::value_format::LabelFormatter;
use super::{ChartOptions, ChartStyle, ValueFormatterFn};

const TOOLTIP_WIDTH_PX: f64 = 60.0;
const TOOLTIP_HEIGHT_PX: f64 = 30.0;
const TOOLTIP_OFFSET_PX: f64 = 40.0;
const GUIDE_DASH_PX: u8 = 2;

/// Smoothed single-series line chart over an ordered categorical axis.
#[derive(Debug, Clone)]
pub struct LineChart {
    series: ChartSeries,
    options: ChartOptions,
    style: ChartStyle,
    formatter: LabelFormatter,
    layout: LineLayout,
    interaction: InteractionState,
}

impl LineChart {
    #[must_use]
    pub fn new(series: ChartSeries, options: ChartOptions) -> Self {
        let series = finite_series(series);
        let layout = project_line(&series, plot_area(&options));
        let formatter = LabelFormatter::Configured {
            format: options.value_format,
            locale: options.locale,
        };
        Self {
            series,
            options,
            style: ChartStyle::default(),
            formatter,
            layout,
            interaction: InteractionState::default(),
        }
    }

    /// Overrides the configured value format for axis and tooltip labels.
    #[must_use]
    pub fn with_value_formatter(mut self, formatter: ValueFormatterFn) -> Self {
        self.formatter = LabelFormatter::Custom(formatter);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn layout(&self) -> &LineLayout {
        &self.layout
    }

    /// Replaces the data, re-projects and clears any tooltip.
    pub fn set_series(&mut self, series: ChartSeries) {
        self.series = finite_series(series);
        self.layout = project_line(&self.series, plot_area(&self.options));
        self.interaction.on_pointer_leave();
    }

    /// Snaps the tooltip to the point nearest to `x`; `y` is ignored.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&Tooltip> {
        let hit = self.layout.nearest_index(x).and_then(|index| {
            let point = self.layout.points.get(index)?;
            let sample = self.series.get(index)?;
            Some(Tooltip {
                index,
                anchor_x: point.x,
                anchor_y: point.y,
                label: sample.label.clone(),
                value: sample.value,
            })
        });
        trace!(x, y, hit = ?hit.as_ref().map(|tooltip| tooltip.index), "line chart pointer move");
        self.interaction.on_pointer_move(x, y, hit);
        self.interaction.tooltip()
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        if self.series.is_empty() {
            return placeholder_frame(
                self.options.width,
                CARTESIAN_PLACEHOLDER_HEIGHT_PX,
                self.options.title.clone(),
                &self.style,
            );
        }

        let area = self.layout.area;
        let style = &self.style;
        let mut frame = base_frame(self.options.viewport(), self.options.title.clone(), style);
        paint_value_axis(&mut frame, self.layout.value_scale, area, &self.formatter, style);

        for (point, sample) in self.layout.points.iter().zip(self.series.points()) {
            paint_category_label(&mut frame, &sample.label, point.x, area, style);
        }

        if let Some(first) = self.layout.points.first() {
            let commands = std::iter::once(PathCommand::MoveTo {
                x: first.x,
                y: first.y,
            })
            .chain(self.layout.smooth_path().into_iter().map(|segment| {
                PathCommand::CubicTo {
                    c1x: segment.c1x,
                    c1y: segment.c1y,
                    c2x: segment.c2x,
                    c2y: segment.c2y,
                    x: segment.x,
                    y: segment.y,
                }
            }))
            .collect();
            frame.push_path(
                LayerKind::Series,
                PathPrimitive::new(commands, style.series_line_width, style.series_color),
            );
        }

        for point in &self.layout.points {
            frame.push_circle(
                LayerKind::Series,
                CirclePrimitive::new(point.x, point.y, style.marker_radius, style.series_color)
                    .with_stroke(style.marker_stroke_width, style.marker_stroke_color),
            );
        }

        if let Some(tooltip) = self.interaction.tooltip() {
            self.paint_tooltip(&mut frame, tooltip, area);
        }
        frame
    }

    fn paint_tooltip(&self, frame: &mut RenderFrame, tooltip: &Tooltip, area: PlotArea) {
        let (x, y) = (tooltip.anchor_x, tooltip.anchor_y);
        let value = self.formatter.format(tooltip.value);
        paint_tooltip_box(
            frame,
            &TooltipBox {
                left: x - TOOLTIP_WIDTH_PX / 2.0,
                top: y - TOOLTIP_OFFSET_PX,
                width: TOOLTIP_WIDTH_PX,
                height: TOOLTIP_HEIGHT_PX,
                corner_radius: 4.0,
                center_x: x,
                primary: &value,
                primary_baseline: y - 25.0,
                secondary: &tooltip.label,
                secondary_baseline: y - 10.0,
            },
            &self.style,
        );
        frame.push_line(
            LayerKind::Tooltip,
            LinePrimitive::new(x, area.top, x, area.bottom(), 1.0, self.style.guide_line_color)
                .with_stroke_style(LineStrokeStyle::Dashed {
                    dash_px: GUIDE_DASH_PX,
                }),
        );
    }
}

fn plot_area(options: &ChartOptions) -> PlotArea {
    PlotArea::inside(options.viewport(), CARTESIAN_INSETS)
}

#[cfg(test)]
mod tests {
    use super::LineChart;
    use crate::api::ChartOptions;
    use crate::core::ChartSeries;

    #[test]
    fn single_point_sits_at_horizontal_center() {
        let chart = LineChart::new(
            [("Jan 1", 10.0)].into_iter().collect::<ChartSeries>(),
            ChartOptions::default(),
        );
        let point = chart.layout().points[0];
        assert_eq!(point.x, chart.layout().area.center_x());
        assert!(chart.frame().validate().is_ok());
    }
}
