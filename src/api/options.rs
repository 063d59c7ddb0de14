use serde::{Deserialize, Serialize};

use crate::core::{BubbleMode, PlotInsets, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{NumberLocale, ValueFormat};

pub const DEFAULT_CHART_WIDTH: u32 = 600;
pub const DEFAULT_CHART_HEIGHT: u32 = 300;
pub const DEFAULT_BUBBLE_MAP_HEIGHT: u32 = 400;
pub const DEFAULT_BUBBLE_MAP_PADDING: f64 = 40.0;

/// Plot insets shared by the bar and line charts.
pub const CARTESIAN_INSETS: PlotInsets = PlotInsets::new(20.0, 40.0, 40.0, 60.0);

/// Presentation settings for bar and line charts.
///
/// Serializable so dashboards can load chart setup from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
    #[serde(default)]
    pub value_format: ValueFormat,
    #[serde(default)]
    pub locale: NumberLocale,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            width: default_chart_width(),
            height: default_chart_height(),
            value_format: ValueFormat::default(),
            locale: NumberLocale::default(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self::default().with_title(title)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_value_format(mut self, value_format: ValueFormat) -> Self {
        self.value_format = value_format;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport())
    }
}

/// Presentation settings for the regional bubble map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleMapOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_bubble_map_height")]
    pub height: u32,
    #[serde(default = "default_bubble_map_padding")]
    pub padding: f64,
    #[serde(default)]
    pub mode: BubbleMode,
    #[serde(default)]
    pub locale: NumberLocale,
}

impl Default for BubbleMapOptions {
    fn default() -> Self {
        Self {
            title: None,
            width: default_chart_width(),
            height: default_bubble_map_height(),
            padding: default_bubble_map_padding(),
            mode: BubbleMode::default(),
            locale: NumberLocale::default(),
        }
    }
}

impl BubbleMapOptions {
    #[must_use]
    pub fn for_mode(mode: BubbleMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn insets(&self) -> PlotInsets {
        PlotInsets::uniform(self.padding)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_viewport(self.viewport())?;
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ChartError::InvalidData(
                "bubble map padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn validate_viewport(viewport: Viewport) -> ChartResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

fn default_chart_width() -> u32 {
    DEFAULT_CHART_WIDTH
}

fn default_chart_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

fn default_bubble_map_height() -> u32 {
    DEFAULT_BUBBLE_MAP_HEIGHT
}

fn default_bubble_map_padding() -> f64 {
    DEFAULT_BUBBLE_MAP_PADDING
}
