use serde::Serialize;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Whether a frame shows chart content or the empty-data placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum FrameKind {
    #[default]
    Chart,
    Placeholder,
}

/// Paint layers, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayerKind {
    Background,
    Grid,
    Axis,
    Series,
    Labels,
    Tooltip,
}

impl LayerKind {
    pub const CANONICAL: [Self; 6] = [
        Self::Background,
        Self::Grid,
        Self::Axis,
        Self::Series,
        Self::Labels,
        Self::Tooltip,
    ];
}

/// Primitives of one layer. Within a layer, kinds paint in field order and
/// each list paints in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameLayer {
    pub kind: LayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl FrameLayer {
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.rects.len()
            + self.lines.len()
            + self.paths.len()
            + self.circles.len()
            + self.texts.len()
    }

    fn validate(&self) -> ChartResult<()> {
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub title: Option<String>,
    pub kind: FrameKind,
    pub layers: Vec<FrameLayer>,
}

impl RenderFrame {
    /// Empty chart frame with the canonical layer stack.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: None,
            kind: FrameKind::Chart,
            layers: LayerKind::CANONICAL.into_iter().map(FrameLayer::new).collect(),
        }
    }

    #[must_use]
    pub fn placeholder(viewport: Viewport) -> Self {
        Self {
            kind: FrameKind::Placeholder,
            ..Self::new(viewport)
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.kind == FrameKind::Placeholder
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&FrameLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: LayerKind) -> &mut FrameLayer {
        let position = match self.layers.iter().position(|layer| layer.kind == kind) {
            Some(position) => position,
            None => {
                self.layers.push(FrameLayer::new(kind));
                self.layers.len() - 1
            }
        };
        &mut self.layers[position]
    }

    pub fn push_rect(&mut self, kind: LayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_line(&mut self, kind: LayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_path(&mut self, kind: LayerKind, path: PathPrimitive) {
        self.layer_mut(kind).paths.push(path);
    }

    pub fn push_circle(&mut self, kind: LayerKind, circle: CirclePrimitive) {
        self.layer_mut(kind).circles.push(circle);
    }

    pub fn push_text(&mut self, kind: LayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> + '_ {
        self.layers.iter().flat_map(|layer| layer.rects.iter())
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> + '_ {
        self.layers.iter().flat_map(|layer| layer.lines.iter())
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> + '_ {
        self.layers.iter().flat_map(|layer| layer.paths.iter())
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> + '_ {
        self.layers.iter().flat_map(|layer| layer.circles.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(FrameLayer::primitive_count).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{LayerKind, RenderFrame};
    use crate::core::Viewport;
    use crate::render::{Color, LinePrimitive};

    #[test]
    fn new_frame_carries_canonical_layers_in_paint_order() {
        let frame = RenderFrame::new(Viewport::new(10, 10));
        let kinds: Vec<LayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
        assert_eq!(kinds, LayerKind::CANONICAL.to_vec());
        assert!(frame.is_empty());
    }

    #[test]
    fn validate_rejects_non_finite_geometry() {
        let mut frame = RenderFrame::new(Viewport::new(10, 10));
        frame.push_line(
            LayerKind::Axis,
            LinePrimitive::new(0.0, f64::NAN, 10.0, 0.0, 1.0, Color::rgb(0.0, 0.0, 0.0)),
        );
        assert!(frame.validate().is_err());
    }
}
