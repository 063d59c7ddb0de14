use serde::{Deserialize, Serialize};

use crate::core::color_ramp::{RampMode, Rgb8, ramp_color};
use crate::core::geo::{GeoCoordinate, locate_point};
use crate::core::scale::SizeScale;
use crate::core::types::PlotArea;

/// Which regional metric a bubble map sizes and colors by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BubbleMode {
    #[default]
    Revenue,
    Spend,
}

impl BubbleMode {
    #[must_use]
    pub fn ramp(self) -> RampMode {
        match self {
            Self::Revenue => RampMode::Growth,
            Self::Spend => RampMode::Cost,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Spend => "Spend",
        }
    }
}

/// One region on the bubble map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubblePoint {
    pub region: String,
    pub revenue: f64,
    pub spend: f64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl BubblePoint {
    #[must_use]
    pub fn new(region: impl Into<String>, revenue: f64, spend: f64) -> Self {
        Self {
            region: region.into(),
            revenue,
            spend,
            lat: None,
            lon: None,
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    #[must_use]
    pub fn value(&self, mode: BubbleMode) -> f64 {
        match mode {
            BubbleMode::Revenue => self.revenue,
            BubbleMode::Spend => self.spend,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        GeoCoordinate::from_parts(self.lat, self.lon)
    }

    #[must_use]
    pub fn sample(&self, mode: BubbleMode) -> BubbleSample<'_> {
        BubbleSample {
            key: &self.region,
            value: self.value(mode),
            coordinate: self.coordinate(),
        }
    }
}

/// Input sample for bubble projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleSample<'a> {
    pub key: &'a str,
    pub value: f64,
    pub coordinate: Option<GeoCoordinate>,
}

/// Deterministic geometry and fill for one bubble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleGeometry {
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub diameter: f64,
    pub normalized: f64,
    pub fill: Rgb8,
}

impl BubbleGeometry {
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.diameter * 0.5
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius() * self.radius()
    }
}

/// Sizes and colors bubbles relative to the extent of the current samples.
#[must_use]
pub fn project_bubbles(
    samples: &[BubbleSample<'_>],
    mode: RampMode,
    area: PlotArea,
) -> Vec<BubbleGeometry> {
    let size_scale = SizeScale::from_values(samples.iter().map(|sample| sample.value));
    let count = samples.len();

    samples
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            let (cx, cy) = locate_point(sample.key, sample.coordinate, index, count, area);
            let normalized = size_scale.normalize(sample.value);
            BubbleGeometry {
                index,
                cx,
                cy,
                diameter: size_scale.size(sample.value),
                normalized,
                fill: ramp_color(mode, normalized),
            }
        })
        .collect()
}

/// Topmost bubble under the pointer. Later bubbles are drawn over earlier
/// ones, so the search runs back to front.
#[must_use]
pub fn topmost_bubble_at(bubbles: &[BubbleGeometry], x: f64, y: f64) -> Option<usize> {
    bubbles
        .iter()
        .rev()
        .find(|bubble| bubble.contains(x, y))
        .map(|bubble| bubble.index)
}
