use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::scale::{IndexScale, ValueScale, value_extent};
use crate::core::series::ChartSeries;
use crate::core::types::PlotArea;

/// Series sample mapped into pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Cubic Bezier segment ending at `(x, y)`; it starts where the previous
/// segment (or the path's move-to) ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub c1x: f64,
    pub c1y: f64,
    pub c2x: f64,
    pub c2y: f64,
    pub x: f64,
    pub y: f64,
}

/// Deterministic line geometry for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLayout {
    pub area: PlotArea,
    pub value_scale: ValueScale,
    pub index_scale: IndexScale,
    pub points: Vec<ProjectedPoint>,
}

impl LineLayout {
    #[must_use]
    pub fn smooth_path(&self) -> Vec<CubicSegment> {
        smooth_segments(&self.points)
    }

    #[must_use]
    pub fn nearest_index(&self, pointer_x: f64) -> Option<usize> {
        nearest_index_by_x(&self.points, pointer_x)
    }
}

/// Projects a series with index-based x positions and a padded value axis.
#[must_use]
pub fn project_line(series: &ChartSeries, area: PlotArea) -> LineLayout {
    let (min, max) = value_extent(series.values()).unwrap_or((0.0, 0.0));
    let value_scale = ValueScale::vertical(min, max, area);
    let index_scale = IndexScale::new(area, series.len());

    let points = series
        .points()
        .iter()
        .enumerate()
        .map(|(index, point)| ProjectedPoint {
            index,
            x: index_scale.to_pixel(index),
            y: value_scale.to_pixel(point.value),
            value: point.value,
        })
        .collect();

    LineLayout {
        area,
        value_scale,
        index_scale,
        points,
    }
}

/// Smooths consecutive points with cubic segments whose control points sit
/// at one and two thirds of the horizontal span, each at its nearest
/// anchor's height. An approximation, not a fitted spline.
#[must_use]
pub fn smooth_segments(points: &[ProjectedPoint]) -> Vec<CubicSegment> {
    points
        .windows(2)
        .map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            let third = (current.x - previous.x) / 3.0;
            CubicSegment {
                c1x: previous.x + third,
                c1y: previous.y,
                c2x: current.x - third,
                c2y: current.y,
                x: current.x,
                y: current.y,
            }
        })
        .collect()
}

/// Index of the point horizontally closest to `pointer_x`; the first one
/// wins on ties.
#[must_use]
pub fn nearest_index_by_x(points: &[ProjectedPoint], pointer_x: f64) -> Option<usize> {
    if !pointer_x.is_finite() {
        return None;
    }
    points
        .iter()
        .min_by_key(|point| OrderedFloat((point.x - pointer_x).abs()))
        .map(|point| point.index)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{ProjectedPoint, nearest_index_by_x, smooth_segments};

    fn point(index: usize, x: f64, y: f64) -> ProjectedPoint {
        ProjectedPoint {
            index,
            x,
            y,
            value: 0.0,
        }
    }

    #[test]
    fn control_points_hold_anchor_heights() {
        let segments = smooth_segments(&[point(0, 0.0, 10.0), point(1, 30.0, 40.0)]);
        assert_eq!(segments.len(), 1);
        let segment = segments[0];
        assert_relative_eq!(segment.c1x, 10.0);
        assert_relative_eq!(segment.c1y, 10.0);
        assert_relative_eq!(segment.c2x, 20.0);
        assert_relative_eq!(segment.c2y, 40.0);
    }

    #[test]
    fn nearest_prefers_first_on_tie() {
        let points = [point(0, 0.0, 0.0), point(1, 10.0, 0.0)];
        assert_eq!(nearest_index_by_x(&points, 5.0), Some(0));
        assert_eq!(nearest_index_by_x(&points, 5.1), Some(1));
        assert_eq!(nearest_index_by_x(&[], 5.0), None);
    }
}
