use crate::render::Color;

/// Side length of the background grid cells.
pub const GRID_CELL_PX: f64 = 40.0;

/// Colors and sizes shared by every chart frame.
///
/// Defaults follow the dashboard's dark card palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub series_color: Color,
    pub series_line_width: f64,
    pub marker_radius: f64,
    pub marker_stroke_color: Color,
    pub marker_stroke_width: f64,
    pub bar_corner_radius: f64,
    pub bubble_opacity: f64,
    pub bubble_stroke_color: Color,
    pub bubble_stroke_width: f64,
    pub bubble_label_color: Color,
    pub tooltip_fill_color: Color,
    pub tooltip_border_color: Color,
    pub tooltip_primary_text_color: Color,
    pub tooltip_secondary_text_color: Color,
    pub guide_line_color: Color,
    pub placeholder_text_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(0x1F, 0x29, 0x37),
            grid_line_color: Color::from_rgb8(0x37, 0x41, 0x51).with_alpha(0.3),
            grid_line_width: 0.5,
            axis_line_color: Color::from_rgb8(0x4B, 0x55, 0x63).with_alpha(0.5),
            axis_label_color: Color::from_rgb8(0x9C, 0xA3, 0xAF),
            axis_label_font_size_px: 12.0,
            series_color: Color::from_rgb8(0x3B, 0x82, 0xF6),
            series_line_width: 2.0,
            marker_radius: 4.0,
            marker_stroke_color: Color::from_rgb8(0x1E, 0x40, 0xAF),
            marker_stroke_width: 2.0,
            bar_corner_radius: 2.0,
            bubble_opacity: 0.8,
            bubble_stroke_color: Color::from_rgb8(0x1F, 0x29, 0x37),
            bubble_stroke_width: 2.0,
            bubble_label_color: Color::rgb(1.0, 1.0, 1.0),
            tooltip_fill_color: Color::from_rgb8(0x1F, 0x29, 0x37),
            tooltip_border_color: Color::from_rgb8(0x37, 0x41, 0x51),
            tooltip_primary_text_color: Color::rgb(1.0, 1.0, 1.0),
            tooltip_secondary_text_color: Color::from_rgb8(0xD1, 0xD5, 0xDB),
            guide_line_color: Color::from_rgb8(0x6B, 0x72, 0x80).with_alpha(0.7),
            placeholder_text_color: Color::from_rgb8(0x9C, 0xA3, 0xAF),
        }
    }
}

impl ChartStyle {
    /// Default palette with the fainter grid used behind bubble maps.
    #[must_use]
    pub fn bubble_map() -> Self {
        let style = Self::default();
        Self {
            grid_line_color: style.grid_line_color.with_alpha(0.2),
            ..style
        }
    }

    pub fn validate(&self) -> crate::error::ChartResult<()> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.axis_line_color,
            self.axis_label_color,
            self.series_color,
            self.marker_stroke_color,
            self.bubble_stroke_color,
            self.bubble_label_color,
            self.tooltip_fill_color,
            self.tooltip_border_color,
            self.tooltip_primary_text_color,
            self.tooltip_secondary_text_color,
            self.guide_line_color,
            self.placeholder_text_color,
        ] {
            color.validate()?;
        }
        if !(0.0..=1.0).contains(&self.bubble_opacity) {
            return Err(crate::error::ChartError::InvalidData(
                "bubble opacity must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}
