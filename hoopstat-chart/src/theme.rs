//! Color tokens for both renderers.
//!
//! The terminal viewer uses a dark hardwood palette; the PNG figure uses the
//! light print palette below, one color per metric.

use hoopstat_core::domain::Metric;
use plotters::style::RGBColor;
use ratatui::style::Color;

/// Terminal viewer theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background
    pub background: Color,
    /// Court orange (focus, box)
    pub accent: Color,
    /// Gold (median)
    pub median: Color,
    /// Blue-gray (whiskers, borders)
    pub muted: Color,
    /// Points for individual games
    pub point: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::hardwood()
    }
}

impl Theme {
    pub fn hardwood() -> Self {
        Self {
            background: Color::Rgb(20, 18, 16),
            accent: Color::Rgb(238, 110, 36),
            median: Color::Rgb(255, 204, 0),
            muted: Color::Rgb(112, 128, 144),
            point: Color::Rgb(120, 200, 255),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }
}

// ─── Raster palette ─────────────────────────────────────────────────

pub const FIGURE_BACKGROUND: RGBColor = RGBColor(255, 255, 255);
pub const INK: RGBColor = RGBColor(33, 33, 33);
pub const MEDIAN_LINE: RGBColor = RGBColor(200, 30, 30);
pub const POINT: RGBColor = RGBColor(40, 40, 40);

/// Box fill per metric.
pub fn metric_color(metric: Metric) -> RGBColor {
    match metric {
        Metric::Points => RGBColor(31, 119, 180),
        Metric::Rebounds => RGBColor(255, 127, 14),
        Metric::Assists => RGBColor(44, 160, 44),
        Metric::Blocks => RGBColor(148, 103, 189),
        Metric::Steals => RGBColor(140, 86, 75),
    }
}
