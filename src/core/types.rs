use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot for axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PlotInsets {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Inner drawing rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Shrinks the viewport by `insets`. Negative inner sizes clamp to zero.
    #[must_use]
    pub fn inside(viewport: Viewport, insets: PlotInsets) -> Self {
        let width = (f64::from(viewport.width) - insets.left - insets.right).max(0.0);
        let height = (f64::from(viewport.height) - insets.top - insets.bottom).max(0.0);
        Self {
            left: insets.left,
            top: insets.top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.left + self.width * 0.5
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotArea, PlotInsets, Viewport};

    #[test]
    fn plot_area_subtracts_insets() {
        let area = PlotArea::inside(
            Viewport::new(600, 300),
            PlotInsets::new(20.0, 40.0, 40.0, 60.0),
        );
        assert_eq!(area.left, 60.0);
        assert_eq!(area.top, 20.0);
        assert_eq!(area.width, 500.0);
        assert_eq!(area.height, 240.0);
        assert_eq!(area.right(), 560.0);
        assert_eq!(area.bottom(), 260.0);
    }

    #[test]
    fn oversized_insets_clamp_to_empty_area() {
        let area = PlotArea::inside(Viewport::new(50, 50), PlotInsets::uniform(40.0));
        assert_eq!(area.width, 0.0);
        assert_eq!(area.height, 0.0);
    }
}
