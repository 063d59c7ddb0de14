use tracing::{trace, warn};

use crate::core::{
    BubbleGeometry, BubblePoint, BubbleSample, PlotArea, project_bubbles, topmost_bubble_at,
};
use crate::interaction::{InteractionState, Tooltip};
use crate::render::{CirclePrimitive, Color, LayerKind, RenderFrame, TextHAlign, TextPrimitive};

use super::chart_frame::{
    BUBBLE_PLACEHOLDER_HEIGHT_PX, TooltipBox, base_frame, paint_tooltip_box, placeholder_frame,
};
use super::value_format::format_currency;
use super::{BubbleMapOptions, ChartStyle};

/// Labels longer than this many characters are cut and suffixed with `...`.
pub const BUBBLE_LABEL_MAX_CHARS: usize = 8;
pub const BUBBLE_LABEL_MIN_FONT_PX: f64 = 10.0;

const TOOLTIP_WIDTH_PX: f64 = 120.0;
const TOOLTIP_HEIGHT_PX: f64 = 40.0;
const TOOLTIP_OFFSET_PX: f64 = 50.0;

/// Regional bubble map sized and colored by revenue or spend.
#[derive(Debug, Clone)]
pub struct BubbleMap {
    points: Vec<BubblePoint>,
    options: BubbleMapOptions,
    style: ChartStyle,
    bubbles: Vec<BubbleGeometry>,
    interaction: InteractionState,
}

impl BubbleMap {
    #[must_use]
    pub fn new(points: Vec<BubblePoint>, options: BubbleMapOptions) -> Self {
        let points = finite_points(points);
        let bubbles = project(&points, &options);
        Self {
            points,
            options,
            style: ChartStyle::bubble_map(),
            bubbles,
            interaction: InteractionState::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn points(&self) -> &[BubblePoint] {
        &self.points
    }

    #[must_use]
    pub fn options(&self) -> &BubbleMapOptions {
        &self.options
    }

    /// Bubble geometry in draw order; later bubbles paint over earlier ones.
    #[must_use]
    pub fn bubbles(&self) -> &[BubbleGeometry] {
        &self.bubbles
    }

    pub fn set_points(&mut self, points: Vec<BubblePoint>) {
        self.points = finite_points(points);
        self.bubbles = project(&self.points, &self.options);
        self.interaction.on_pointer_leave();
    }

    /// Shows the tooltip for the topmost bubble under the pointer, anchored
    /// at the pointer itself. Missing every bubble hides it.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<&Tooltip> {
        let mode = self.options.mode;
        let hit = topmost_bubble_at(&self.bubbles, x, y).and_then(|index| {
            let point = self.points.get(index)?;
            Some(Tooltip {
                index,
                anchor_x: x,
                anchor_y: y,
                label: point.region.clone(),
                value: point.value(mode),
            })
        });
        trace!(x, y, hit = ?hit.as_ref().map(|tooltip| tooltip.index), "bubble map pointer move");
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

    /// `Revenue: $x` or `Spend: $x`.
    #[must_use]
    pub fn tooltip_value_text(&self, value: f64) -> String {
        format!(
            "{}: {}",
            self.options.mode.label(),
            format_currency(value, self.options.locale)
        )
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        if self.points.is_empty() {
            return placeholder_frame(
                self.options.width,
                BUBBLE_PLACEHOLDER_HEIGHT_PX,
                self.options.title.clone(),
                &self.style,
            );
        }

        let style = &self.style;
        let mut frame = base_frame(self.options.viewport(), self.options.title.clone(), style);
        for (bubble, point) in self.bubbles.iter().zip(&self.points) {
            frame.push_circle(
                LayerKind::Series,
                CirclePrimitive::new(
                    bubble.cx,
                    bubble.cy,
                    bubble.radius(),
                    Color::from(bubble.fill).with_alpha(style.bubble_opacity),
                )
                .with_stroke(
                    style.bubble_stroke_width,
                    style.bubble_stroke_color.with_alpha(style.bubble_opacity),
                ),
            );
            let label = truncate_label(&point.region);
            if !label.is_empty() {
                frame.push_text(
                    LayerKind::Labels,
                    TextPrimitive::new(
                        label,
                        bubble.cx,
                        bubble.cy + 4.0,
                        label_font_size(bubble.diameter),
                        style.bubble_label_color,
                        TextHAlign::Center,
                    ),
                );
            }
        }

        if let Some(tooltip) = self.interaction.tooltip() {
            let (x, y) = (tooltip.anchor_x, tooltip.anchor_y);
            let value = self.tooltip_value_text(tooltip.value);
            paint_tooltip_box(
                &mut frame,
                &TooltipBox {
                    left: x - TOOLTIP_WIDTH_PX / 2.0,
                    top: y - TOOLTIP_OFFSET_PX,
                    width: TOOLTIP_WIDTH_PX,
                    height: TOOLTIP_HEIGHT_PX,
                    corner_radius: 6.0,
                    center_x: x,
                    primary: &tooltip.label,
                    primary_baseline: y - 30.0,
                    secondary: &value,
                    secondary_baseline: y - 10.0,
                },
                style,
            );
        }
        frame
    }
}

/// First eight characters plus `...` when the label is longer.
#[must_use]
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > BUBBLE_LABEL_MAX_CHARS {
        let mut truncated: String = label.chars().take(BUBBLE_LABEL_MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        label.to_owned()
    }
}

#[must_use]
pub fn label_font_size(diameter: f64) -> f64 {
    (diameter / 6.0).max(BUBBLE_LABEL_MIN_FONT_PX)
}

fn project(points: &[BubblePoint], options: &BubbleMapOptions) -> Vec<BubbleGeometry> {
    let area = PlotArea::inside(options.viewport(), options.insets());
    let samples: Vec<BubbleSample<'_>> = points
        .iter()
        .map(|point| point.sample(options.mode))
        .collect();
    project_bubbles(&samples, options.mode.ramp(), area)
}

fn finite_points(points: Vec<BubblePoint>) -> Vec<BubblePoint> {
    points
        .into_iter()
        .map(|mut point| {
            if !point.revenue.is_finite() || !point.spend.is_finite() {
                warn!(region = %point.region, "non-finite bubble value drawn as zero");
                point.revenue = if point.revenue.is_finite() { point.revenue } else { 0.0 };
                point.spend = if point.spend.is_finite() { point.spend } else { 0.0 };
            }
            point
        })
        .collect()
}
