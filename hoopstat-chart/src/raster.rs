//! PNG output via plotters.
//!
//! The figure is 15 × 10 inches at 300 DPI. Text uses the bundled DejaVu Sans,
//! registered once per process, so rendering never depends on system fonts.

use std::path::Path;
use std::sync::OnceLock;

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::info;

use crate::error::ChartError;
use crate::layout::{FigureLayout, PanelLayout, BOX_HALF_WIDTH};
use crate::theme;

const FONT: &str = "sans-serif";
const FONT_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

// Sizes in pixels at 300 DPI.
const TITLE_SIZE: u32 = 90;
const CAPTION_SIZE: u32 = 70;
const LABEL_SIZE: u32 = 42;
const ANNOTATION_SIZE: u32 = 44;
const POINT_RADIUS: u32 = 12;
const STROKE: u32 = 6;

fn ensure_font() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| register_font(FONT, FontStyle::Normal, FONT_BYTES).is_ok());
    if ok {
        Ok(())
    } else {
        Err(ChartError::Font)
    }
}

/// Write the figure to `path` as PNG, creating parent directories.
pub fn write_png(layout: &FigureLayout, path: &Path) -> Result<(), ChartError> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(ChartError::UnsupportedFormat(path.display().to_string()));
    }
    ensure_font()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(path, FigureLayout::pixel_size()).into_drawing_area();
    root.fill(&theme::FIGURE_BACKGROUND).map_err(ChartError::backend)?;
    let body = root
        .titled(&layout.title, (FONT, TITLE_SIZE).into_font().color(&theme::INK))
        .map_err(ChartError::backend)?;

    let (rows, cols) = crate::layout::GRID;
    let cells = body.split_evenly((rows, cols));
    for panel in &layout.panels {
        let (row, col) = panel.cell;
        if let Some(area) = cells.get(row * cols + col) {
            draw_panel(area, panel)?;
        }
    }

    root.present().map_err(ChartError::backend)?;
    info!(path = %path.display(), "wrote distribution chart");
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    panel: &PanelLayout,
) -> Result<(), ChartError> {
    let (y_lo, y_hi) = panel.y_range;
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, CAPTION_SIZE).into_font().color(&theme::INK))
        .margin(30)
        .x_label_area_size(10)
        .y_label_area_size(120)
        .build_cartesian_2d(0f64..2f64, y_lo..y_hi)
        .map_err(ChartError::backend)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_labels(8)
        .y_label_style((FONT, LABEL_SIZE).into_font().color(&theme::INK))
        .light_line_style(RGBColor(235, 235, 235))
        .draw()
        .map_err(ChartError::backend)?;

    let fill = theme::metric_color(panel.metric);
    let left = 1.0 - BOX_HALF_WIDTH;
    let right = 1.0 + BOX_HALF_WIDTH;
    let cap = BOX_HALF_WIDTH / 2.0;

    // Whiskers: true min and max, with caps.
    let ink = theme::INK.stroke_width(STROKE);
    chart
        .draw_series([
            PathElement::new(vec![(1.0, panel.whisker_low), (1.0, panel.box_low)], ink),
            PathElement::new(vec![(1.0, panel.box_high), (1.0, panel.whisker_high)], ink),
            PathElement::new(vec![(1.0 - cap, panel.whisker_low), (1.0 + cap, panel.whisker_low)], ink),
            PathElement::new(vec![(1.0 - cap, panel.whisker_high), (1.0 + cap, panel.whisker_high)], ink),
        ])
        .map_err(ChartError::backend)?;

    // Box [p25, p75] and its outline.
    chart
        .draw_series([
            Rectangle::new([(left, panel.box_low), (right, panel.box_high)], fill.mix(0.45).filled()),
            Rectangle::new([(left, panel.box_low), (right, panel.box_high)], ink),
        ])
        .map_err(ChartError::backend)?;

    // Median.
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(left, panel.median), (right, panel.median)],
            theme::MEDIAN_LINE.stroke_width(STROKE * 2),
        )))
        .map_err(ChartError::backend)?;

    // One point per game.
    chart
        .draw_series(panel.points.iter().map(|p| {
            Circle::new((1.0 + p.x_offset, p.value), POINT_RADIUS, theme::POINT.mix(0.6).filled())
        }))
        .map_err(ChartError::backend)?;

    // Percentile annotations to the right of the box.
    let span = y_hi - y_lo;
    let text_style = (FONT, ANNOTATION_SIZE).into_font().color(&theme::INK);
    chart
        .draw_series(panel.annotations.iter().enumerate().map(|(i, a)| {
            let y = y_hi - span * (0.06 + 0.08 * i as f64);
            Text::new(a.text(), (right + 0.15, y), text_style.clone())
        }))
        .map_err(ChartError::backend)?;

    Ok(())
}
