use std::fmt::Write as _;

use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LayerKind, LinePrimitive, LineStrokeStyle, PathCommand,
    PathPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Renders frames to standalone SVG markup.
///
/// Coordinates are written with two decimals, so the same frame always yields
/// byte-identical output.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    markup: String,
    frames_rendered: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last rendered frame.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn into_markup(self) -> String {
        self.markup
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    /// Validates and renders `frame` in one call.
    pub fn render_to_string(frame: &RenderFrame) -> ChartResult<String> {
        let mut renderer = Self::new();
        renderer.render(frame)?;
        Ok(renderer.into_markup())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let markup = write_frame(frame).map_err(|err| {
            ChartError::Backend(format!("failed to write svg markup: {err}"))
        })?;
        debug!(
            width = frame.viewport.width,
            height = frame.viewport.height,
            primitives = frame.primitive_count(),
            bytes = markup.len(),
            "rendered svg frame"
        );
        self.markup = markup;
        self.frames_rendered += 1;
        Ok(())
    }
}

fn write_frame(frame: &RenderFrame) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let (width, height) = (frame.viewport.width, frame.viewport.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    if let Some(title) = &frame.title {
        writeln!(out, "  <title>{}</title>", escape_text(title))?;
    }
    for layer in &frame.layers {
        if layer.primitive_count() == 0 {
            continue;
        }
        writeln!(out, r#"  <g class="{}">"#, layer_class(layer.kind))?;
        for rect in &layer.rects {
            write_rect(&mut out, rect)?;
        }
        for line in &layer.lines {
            write_line(&mut out, line)?;
        }
        for path in &layer.paths {
            write_path(&mut out, path)?;
        }
        for circle in &layer.circles {
            write_circle(&mut out, circle)?;
        }
        for text in &layer.texts {
            write_text(&mut out, text)?;
        }
        out.push_str("  </g>\n");
    }
    out.push_str("</svg>\n");
    Ok(out)
}

fn layer_class(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Background => "background",
        LayerKind::Grid => "grid",
        LayerKind::Axis => "axis",
        LayerKind::Series => "series",
        LayerKind::Labels => "labels",
        LayerKind::Tooltip => "tooltip",
    }
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}""#,
        rect.x, rect.y, rect.width, rect.height
    )?;
    if rect.corner_radius > 0.0 {
        write!(out, r#" rx="{:.2}""#, rect.corner_radius)?;
    }
    write_paint(out, "fill", rect.fill_color)?;
    if rect.border_width > 0.0 {
        write_paint(out, "stroke", rect.border_color)?;
        write!(out, r#" stroke-width="{:.2}""#, rect.border_width)?;
    }
    out.push_str("/>\n");
    Ok(())
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}""#,
        line.x1, line.y1, line.x2, line.y2
    )?;
    write_paint(out, "stroke", line.color)?;
    write!(out, r#" stroke-width="{:.2}""#, line.stroke_width)?;
    if let LineStrokeStyle::Dashed { dash_px } = line.stroke_style {
        write!(out, r#" stroke-dasharray="{dash_px} {dash_px}""#)?;
    }
    out.push_str("/>\n");
    Ok(())
}

fn write_path(out: &mut String, path: &PathPrimitive) -> std::fmt::Result {
    out.push_str(r#"    <path d=""#);
    for (index, command) in path.commands.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        match *command {
            PathCommand::MoveTo { x, y } => write!(out, "M {x:.2} {y:.2}")?,
            PathCommand::LineTo { x, y } => write!(out, "L {x:.2} {y:.2}")?,
            PathCommand::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => write!(
                out,
                "C {c1x:.2} {c1y:.2}, {c2x:.2} {c2y:.2}, {x:.2} {y:.2}"
            )?,
        }
    }
    out.push('"');
    out.push_str(r#" fill="none""#);
    write_paint(out, "stroke", path.color)?;
    write!(out, r#" stroke-width="{:.2}""#, path.stroke_width)?;
    out.push_str("/>\n");
    Ok(())
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}""#,
        circle.cx, circle.cy, circle.radius
    )?;
    write_paint(out, "fill", circle.fill_color)?;
    if circle.stroke_width > 0.0 {
        write_paint(out, "stroke", circle.stroke_color)?;
        write!(out, r#" stroke-width="{:.2}""#, circle.stroke_width)?;
    }
    out.push_str("/>\n");
    Ok(())
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        out,
        r#"    <text x="{:.2}" y="{:.2}" font-size="{:.2}" text-anchor="{anchor}""#,
        text.x, text.y, text.font_size_px
    )?;
    write_paint(out, "fill", text.color)?;
    writeln!(out, ">{}</text>", escape_text(&text.text))
}

fn write_paint(out: &mut String, attribute: &str, color: Color) -> std::fmt::Result {
    write!(out, r#" {attribute}="{}""#, color.to_rgb8().to_hex())?;
    if color.alpha < 1.0 {
        write!(out, r#" {attribute}-opacity="{:.2}""#, color.alpha)?;
    }
    Ok(())
}

fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_text;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_text("A&B <x>"), "A&amp;B &lt;x&gt;");
    }
}
