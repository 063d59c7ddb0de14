use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::PlotArea;

/// Domain padding applied on each side of a value axis, as a fraction of the
/// data range.
pub const DEFAULT_VALUE_PADDING_RATIO: f64 = 0.10;

/// Normalized position used whenever a domain collapses to a single value.
pub const DEGENERATE_NORMALIZED: f64 = 0.5;

pub const BUBBLE_MIN_DIAMETER_PX: f64 = 20.0;
pub const BUBBLE_MAX_DIAMETER_PX: f64 = 80.0;

/// Returns `(min, max)` over the finite values, or `None` when there are none.
#[must_use]
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Linear map from a padded value domain onto a pixel span.
///
/// Vertical scales are inverted so larger values sit closer to the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    domain_min: f64,
    domain_max: f64,
    lower_padding: f64,
    upper_padding: f64,
    pixel_start: f64,
    pixel_length: f64,
    inverted: bool,
}

impl ValueScale {
    /// Vertical scale over `[min, max]` padded by 10% of the range on both
    /// sides.
    #[must_use]
    pub fn vertical(min: f64, max: f64, area: PlotArea) -> Self {
        Self::vertical_with_padding(
            min,
            max,
            DEFAULT_VALUE_PADDING_RATIO,
            DEFAULT_VALUE_PADDING_RATIO,
            area,
        )
    }

    #[must_use]
    pub fn vertical_with_padding(
        min: f64,
        max: f64,
        lower_ratio: f64,
        upper_ratio: f64,
        area: PlotArea,
    ) -> Self {
        Self::with_padding(min, max, lower_ratio, upper_ratio, area.top, area.height, true)
    }

    #[must_use]
    pub fn with_padding(
        min: f64,
        max: f64,
        lower_ratio: f64,
        upper_ratio: f64,
        pixel_start: f64,
        pixel_length: f64,
        inverted: bool,
    ) -> Self {
        let (domain_min, domain_max) = if min <= max { (min, max) } else { (max, min) };
        let range = domain_max - domain_min;
        Self {
            domain_min,
            domain_max,
            lower_padding: range * lower_ratio.max(0.0),
            upper_padding: range * upper_ratio.max(0.0),
            pixel_start,
            pixel_length,
            inverted,
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn padded_domain(self) -> (f64, f64) {
        (
            self.domain_min - self.lower_padding,
            self.domain_max + self.upper_padding,
        )
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        let span = self.padded_span();
        !(span.is_finite() && span > 0.0)
    }

    fn padded_span(self) -> f64 {
        self.domain_max - self.domain_min + self.lower_padding + self.upper_padding
    }

    /// Position of `value` inside the padded domain, `0.5` for a collapsed
    /// domain.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return DEGENERATE_NORMALIZED;
        }
        (value - self.domain_min + self.lower_padding) / self.padded_span()
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        let normalized = self.normalize(value);
        let offset = if self.inverted {
            1.0 - normalized
        } else {
            normalized
        };
        self.pixel_start + offset * self.pixel_length
    }

    /// Evenly spaced axis values across the padded domain, `intervals + 1`
    /// of them. A collapsed domain yields its single value.
    #[must_use]
    pub fn ticks(self, intervals: usize) -> SmallVec<[f64; 8]> {
        let (start, end) = self.padded_domain();
        if self.is_degenerate() || intervals == 0 {
            return SmallVec::from_slice(&[start]);
        }
        (0..=intervals)
            .map(|step| start + (step as f64 / intervals as f64) * (end - start))
            .collect()
    }
}

/// Maps ordinal indices `[0, count - 1]` onto `[left, left + width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexScale {
    left: f64,
    width: f64,
    count: usize,
}

impl IndexScale {
    #[must_use]
    pub fn new(area: PlotArea, count: usize) -> Self {
        Self {
            left: area.left,
            width: area.width,
            count,
        }
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    /// A single point sits at the horizontal center of the span.
    #[must_use]
    pub fn to_pixel(self, index: usize) -> f64 {
        if self.count <= 1 {
            return self.left + self.width * 0.5;
        }
        self.left + (index as f64 / (self.count - 1) as f64) * self.width
    }
}

/// Maps a value inside the series extent to a bubble diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeScale {
    min: f64,
    max: f64,
    min_size: f64,
    max_size: f64,
}

impl Default for SizeScale {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl SizeScale {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self::with_sizes(min, max, BUBBLE_MIN_DIAMETER_PX, BUBBLE_MAX_DIAMETER_PX)
    }

    #[must_use]
    pub fn with_sizes(min: f64, max: f64, min_size: f64, max_size: f64) -> Self {
        Self {
            min,
            max,
            min_size,
            max_size,
        }
    }

    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = value_extent(values).unwrap_or((0.0, 0.0));
        Self::new(min, max)
    }

    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let range = self.max - self.min;
        if !(range.is_finite() && range > 0.0) {
            return DEGENERATE_NORMALIZED;
        }
        (value - self.min) / range
    }

    #[must_use]
    pub fn size(self, value: f64) -> f64 {
        self.min_size + self.normalize(value) * (self.max_size - self.min_size)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{IndexScale, SizeScale, ValueScale, value_extent};
    use crate::core::types::PlotArea;

    fn area() -> PlotArea {
        PlotArea {
            left: 60.0,
            top: 20.0,
            width: 500.0,
            height: 240.0,
        }
    }

    #[test]
    fn extent_skips_non_finite_values() {
        assert_eq!(value_extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(value_extent(Vec::<f64>::new()), None);
    }

    #[test]
    fn padded_extremes_stay_inside_plot() {
        let scale = ValueScale::vertical(0.0, 100.0, area());
        let top = scale.to_pixel(100.0);
        let bottom = scale.to_pixel(0.0);
        assert!(top > area().top);
        assert!(bottom < area().bottom());
        assert_relative_eq!(scale.normalize(0.0), 10.0 / 120.0);
    }

    #[test]
    fn collapsed_domain_maps_to_midpoint() {
        let scale = ValueScale::vertical(42.0, 42.0, area());
        assert_eq!(scale.normalize(42.0), 0.5);
        assert_relative_eq!(scale.to_pixel(42.0), 140.0);
        assert_eq!(scale.ticks(5).len(), 1);
    }

    #[test]
    fn ticks_cover_padded_domain() {
        let scale = ValueScale::vertical(0.0, 100.0, area());
        let ticks = scale.ticks(5);
        assert_eq!(ticks.len(), 6);
        assert_relative_eq!(ticks[0], -10.0);
        assert_relative_eq!(ticks[5], 110.0);
    }

    #[test]
    fn single_index_sits_at_center() {
        let scale = IndexScale::new(area(), 1);
        assert_relative_eq!(scale.to_pixel(0), 310.0);
        let scale = IndexScale::new(area(), 3);
        assert_relative_eq!(scale.to_pixel(2), 560.0);
    }

    #[test]
    fn size_scale_spans_bounds() {
        let scale = SizeScale::new(10.0, 20.0);
        assert_relative_eq!(scale.size(10.0), 20.0);
        assert_relative_eq!(scale.size(20.0), 80.0);
        assert_relative_eq!(SizeScale::new(5.0, 5.0).size(5.0), 50.0);
    }
}
