use serde::{Deserialize, Serialize};

use crate::core::scale::{DEFAULT_VALUE_PADDING_RATIO, ValueScale, value_extent};
use crate::core::series::ChartSeries;
use crate::core::types::PlotArea;

/// Share of each category band occupied by its bar.
pub const DEFAULT_BAR_WIDTH_RATIO: f64 = 0.6;

/// Deterministic geometry for one categorical bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub index: usize,
    pub band_left: f64,
    pub band_right: f64,
    pub x_left: f64,
    pub x_right: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub value: f64,
}

impl BarGeometry {
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.x_left + self.x_right) * 0.5
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_right - self.x_left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_bottom - self.y_top
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub area: PlotArea,
    pub value_scale: ValueScale,
    pub baseline_y: f64,
    pub bars: Vec<BarGeometry>,
}

impl BarLayout {
    /// Band column under the pointer; the hit area spans the whole band, not
    /// only the drawn bar. The right plot edge belongs to the last band.
    #[must_use]
    pub fn bar_at(&self, x: f64, y: f64) -> Option<usize> {
        if !self.area.contains(x, y) || self.bars.is_empty() || self.area.width <= 0.0 {
            return None;
        }
        let band = self.area.width / self.bars.len() as f64;
        let index = ((x - self.area.left) / band).floor() as usize;
        Some(index.min(self.bars.len() - 1))
    }
}

/// Projects a categorical series into equal-width bands with bars rising
/// from the zero baseline.
///
/// The value domain always includes zero. An all-zero series uses `[0, 1]`
/// so the baseline stays on the bottom edge.
#[must_use]
pub fn project_bars(series: &ChartSeries, area: PlotArea, bar_width_ratio: f64) -> BarLayout {
    let (min, max) = value_extent(series.values()).unwrap_or((0.0, 0.0));
    let (min, max) = (min.min(0.0), max.max(0.0));
    let max = if min == max { min + 1.0 } else { max };
    let lower_ratio = if min < 0.0 {
        DEFAULT_VALUE_PADDING_RATIO
    } else {
        0.0
    };
    let upper_ratio = if max > 0.0 {
        DEFAULT_VALUE_PADDING_RATIO
    } else {
        0.0
    };
    let value_scale = ValueScale::vertical_with_padding(min, max, lower_ratio, upper_ratio, area);
    let baseline_y = value_scale.to_pixel(0.0);

    let ratio = if bar_width_ratio.is_finite() {
        bar_width_ratio.clamp(0.05, 1.0)
    } else {
        DEFAULT_BAR_WIDTH_RATIO
    };
    let band = if series.is_empty() {
        0.0
    } else {
        area.width / series.len() as f64
    };
    let inset = band * (1.0 - ratio) * 0.5;

    let bars = series
        .values()
        .enumerate()
        .map(|(index, value)| {
            let band_left = area.left + index as f64 * band;
            let y_value = value_scale.to_pixel(value);
            BarGeometry {
                index,
                band_left,
                band_right: band_left + band,
                x_left: band_left + inset,
                x_right: band_left + band - inset,
                y_top: y_value.min(baseline_y),
                y_bottom: y_value.max(baseline_y),
                value,
            }
        })
        .collect();

    BarLayout {
        area,
        value_scale,
        baseline_y,
        bars,
    }
}
