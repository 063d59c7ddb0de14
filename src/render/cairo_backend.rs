use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FrameLayer, LineStrokeStyle, PathCommand, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

const FONT_FAMILY: &str = "Sans";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can draw into an externally owned Cairo context.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// `Renderer::render` draws onto an owned image surface sized to the frame;
/// `CairoContextRenderer` draws onto a caller-provided context.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Surface sized to a chart viewport.
    pub fn for_viewport(viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let width = i32::try_from(viewport.width)
            .map_err(|_| ChartError::InvalidData("viewport width exceeds i32".to_owned()))?;
        let height = i32::try_from(viewport.height)
            .map_err(|_| ChartError::InvalidData("viewport height exceeds i32".to_owned()))?;
        Self::new(width, height)
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the owned surface as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for layer in &frame.layers {
            draw_layer(context, layer, &mut stats)?;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_layer(
    context: &Context,
    layer: &FrameLayer,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for rect in &layer.rects {
        append_rect_path(context, *rect);
        let border = (rect.border_width > 0.0).then_some((rect.border_width, rect.border_color));
        fill_then_stroke(context, rect.fill_color, border, "rectangle")?;
        stats.rects_drawn += 1;
    }

    for line in &layer.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        match line.stroke_style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed { dash_px } => {
                let dash = f64::from(dash_px);
                context.set_dash(&[dash, dash], 0.0);
            }
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }
    context.set_dash(&[], 0.0);

    for path in &layer.paths {
        context.new_path();
        for command in &path.commands {
            match *command {
                PathCommand::MoveTo { x, y } => context.move_to(x, y),
                PathCommand::LineTo { x, y } => context.line_to(x, y),
                PathCommand::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => context.curve_to(c1x, c1y, c2x, c2y, x, y),
            }
        }
        apply_color(context, path.color);
        context.set_line_width(path.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        stats.paths_drawn += 1;
    }

    for circle in &layer.circles {
        context.new_sub_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        let outline =
            (circle.stroke_width > 0.0).then_some((circle.stroke_width, circle.stroke_color));
        fill_then_stroke(context, circle.fill_color, outline, "circle")?;
        stats.circles_drawn += 1;
    }

    for text in &layer.texts {
        draw_text(context, text);
        stats.texts_drawn += 1;
    }
    Ok(())
}

/// Fills the current path and optionally strokes it with `(width, color)`.
fn fill_then_stroke(
    context: &Context,
    fill: Color,
    stroke: Option<(f64, Color)>,
    shape: &str,
) -> ChartResult<()> {
    apply_color(context, fill);
    let Some((width, color)) = stroke else {
        return context
            .fill()
            .map_err(|err| map_backend_error(&format!("failed to fill {shape}"), err));
    };
    context
        .fill_preserve()
        .map_err(|err| map_backend_error(&format!("failed to fill {shape}"), err))?;
    apply_color(context, color);
    context.set_line_width(width);
    context
        .stroke()
        .map_err(|err| map_backend_error(&format!("failed to stroke {shape}"), err))
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font = FontDescription::from_string(&format!("{FONT_FAMILY} {}", text.font_size_px));
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let (width, height) = layout.pixel_size();
    let left = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(width) / 2.0,
        TextHAlign::Right => text.x - f64::from(width),
    };
    apply_color(context, text.color);
    // Pango places layouts by their top edge; frame text y is a baseline.
    context.move_to(left, text.y - f64::from(height));
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
