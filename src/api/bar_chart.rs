use tracing::trace;

use crate::core::{BarLayout, ChartSeries, DEFAULT_BAR_WIDTH_RATIO, PlotArea, project_bars};
use crate::interaction::{InteractionState, Tooltip};
use crate::render::{LayerKind, LinePrimitive, RectPrimitive, RenderFrame};

use super::chart_frame::{
    CARTESIAN_PLACEHOLDER_HEIGHT_PX, TooltipBox, base_frame, estimate_text_width, finite_series,
    paint_category_label, paint_tooltip_box, paint_value_axis, placeholder_frame,
};
use super::options::CARTESIAN_INSETS;
use super::value_format::LabelFormatter;
use super::{ChartOptions, ChartStyle, ValueFormatterFn};

const TOOLTIP_MIN_WIDTH_PX: f64 = 60.0;
const TOOLTIP_HEIGHT_PX: f64 = 30.0;
const TOOLTIP_GAP_PX: f64 = 8.0;
const TOOLTIP_TEXT_PADDING_PX: f64 = 16.0;

/// Vertical bar chart with one bar per category, rising from zero.
#[derive(Debug, Clone)]
pub struct BarChart {
    series: ChartSeries,
    options: ChartOptions,
    style: ChartStyle,
    formatter: LabelFormatter,
    bar_width_ratio: f64,
    layout: BarLayout,
    interaction: InteractionState,
}

impl BarChart {
    #[must_use]
    pub fn new(series: ChartSeries, options: ChartOptions) -> Self {
        let series = finite_series(series);
        let layout = project_bars(&series, plot_area(&options), DEFAULT_BAR_WIDTH_RATIO);
        let formatter = LabelFormatter::Configured {
            format: options.value_format,
            locale: options.locale,
        };
        Self {
            series,
            options,
            style: ChartStyle::default(),
            formatter,
            bar_width_ratio: DEFAULT_BAR_WIDTH_RATIO,
            layout,
            interaction: InteractionState::default(),
        }
    }

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

    /// Fraction of each band covered by its bar, clamped to `[0.05, 1]`.
    #[must_use]
    pub fn with_bar_width_ratio(mut self, ratio: f64) -> Self {
        self.bar_width_ratio = ratio;
        self.layout = project_bars(&self.series, plot_area(&self.options), ratio);
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
    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    pub fn set_series(&mut self, series: ChartSeries) {
        self.series = finite_series(series);
        self.layout = project_bars(&self.series, plot_area(&self.options), self.bar_width_ratio);
        self.interaction.on_pointer_leave();
    }

    /// Shows the tooltip for the band column under the pointer.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&Tooltip> {
        let hit = self.layout.bar_at(x, y).and_then(|index| {
            let bar = self.layout.bars.get(index)?;
            let sample = self.series.get(index)?;
            Some(Tooltip {
                index,
                anchor_x: bar.center_x(),
                anchor_y: bar.y_top,
                label: sample.label.clone(),
                value: sample.value,
            })
        });
        trace!(x, y, hit = ?hit.as_ref().map(|tooltip| tooltip.index), "bar chart pointer move");
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
        frame.push_line(
            LayerKind::Axis,
            LinePrimitive::new(
                area.left,
                self.layout.baseline_y,
                area.right(),
                self.layout.baseline_y,
                1.0,
                style.axis_line_color,
            ),
        );

        for (bar, sample) in self.layout.bars.iter().zip(self.series.points()) {
            frame.push_rect(
                LayerKind::Series,
                RectPrimitive::new(
                    bar.x_left,
                    bar.y_top,
                    bar.width(),
                    bar.height(),
                    style.series_color,
                )
                .with_corner_radius(style.bar_corner_radius),
            );
            paint_category_label(&mut frame, &sample.label, bar.center_x(), area, style);
        }

        if let Some(tooltip) = self.interaction.tooltip() {
            self.paint_tooltip(&mut frame, tooltip);
        }
        frame
    }

    fn paint_tooltip(&self, frame: &mut RenderFrame, tooltip: &Tooltip) {
        let value = self.formatter.format(tooltip.value);
        let text_width = estimate_text_width(&value, self.style.axis_label_font_size_px)
            .max(estimate_text_width(&tooltip.label, self.style.axis_label_font_size_px));
        let width = (text_width + TOOLTIP_TEXT_PADDING_PX).max(TOOLTIP_MIN_WIDTH_PX);
        let top = tooltip.anchor_y - TOOLTIP_GAP_PX - TOOLTIP_HEIGHT_PX;
        paint_tooltip_box(
            frame,
            &TooltipBox {
                left: tooltip.anchor_x - width / 2.0,
                top,
                width,
                height: TOOLTIP_HEIGHT_PX,
                corner_radius: 4.0,
                center_x: tooltip.anchor_x,
                primary: &value,
                primary_baseline: top + 13.0,
                secondary: &tooltip.label,
                secondary_baseline: top + 26.0,
            },
            &self.style,
        );
    }
}

fn plot_area(options: &ChartOptions) -> PlotArea {
    PlotArea::inside(options.viewport(), CARTESIAN_INSETS)
}

#[cfg(test)]
mod tests {
    use super::BarChart;
    use crate::api::ChartOptions;
    use crate::core::ChartSeries;

    #[test]
    fn bars_cover_sixty_percent_of_their_band() {
        let chart = BarChart::new(
            [("Desktop", 10.0), ("Mobile", 20.0)].into_iter().collect::<ChartSeries>(),
            ChartOptions::default(),
        );
        let bar = chart.layout().bars[0];
        let band = bar.band_right - bar.band_left;
        assert!((bar.width() - band * 0.6).abs() < 1e-9);
    }
}
