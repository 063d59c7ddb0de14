use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{
    DEFAULT_BUBBLE_MAP_HEIGHT, DEFAULT_BUBBLE_MAP_PADDING, DEFAULT_CHART_HEIGHT,
    DEFAULT_CHART_WIDTH, NumberLocale,
};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_WEEKLY_CHART_HEIGHT: u32 = 400;

/// Chart sizes and number locale shared by every dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub locale: NumberLocale,
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
    #[serde(default = "default_bar_chart_height")]
    pub bar_chart_height: u32,
    #[serde(default = "default_weekly_chart_height")]
    pub weekly_chart_height: u32,
    #[serde(default = "default_bubble_map_height")]
    pub bubble_map_height: u32,
    #[serde(default = "default_bubble_map_padding")]
    pub bubble_map_padding: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: NumberLocale::default(),
            chart_width: default_chart_width(),
            bar_chart_height: default_bar_chart_height(),
            weekly_chart_height: default_weekly_chart_height(),
            bubble_map_height: default_bubble_map_height(),
            bubble_map_padding: default_bubble_map_padding(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        debug!(?config, "loaded dashboard config");
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (width, height) in [
            (self.chart_width, self.bar_chart_height),
            (self.chart_width, self.weekly_chart_height),
            (self.chart_width, self.bubble_map_height),
        ] {
            if width == 0 || height == 0 {
                return Err(ChartError::InvalidViewport { width, height });
            }
        }
        if !self.bubble_map_padding.is_finite() || self.bubble_map_padding < 0.0 {
            return Err(ChartError::InvalidData(
                "bubble map padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_chart_width() -> u32 {
    DEFAULT_CHART_WIDTH
}

fn default_bar_chart_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

fn default_weekly_chart_height() -> u32 {
    DEFAULT_WEEKLY_CHART_HEIGHT
}

fn default_bubble_map_height() -> u32 {
    DEFAULT_BUBBLE_MAP_HEIGHT
}

fn default_bubble_map_padding() -> f64 {
    DEFAULT_BUBBLE_MAP_PADDING
}
