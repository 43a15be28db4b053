//! Figure layout — everything the renderers draw, computed up front.
//!
//! The layout is a pure function of a [`DistributionResult`]. Both the PNG
//! writer and the terminal viewer draw from it, so they can't disagree about
//! what a panel shows.

use hoopstat_core::domain::{Metric, SeasonType};
use hoopstat_core::DistributionResult;

/// Grid shape: two rows of three, five metric panels and one empty cell.
pub const GRID: (usize, usize) = (2, 3);

/// Figure size in inches and dots per inch for raster output.
pub const FIGURE_INCHES: (u32, u32) = (15, 10);
pub const DPI: u32 = 300;

/// Half-width of the box in panel x-units (the box is centered on x = 1).
pub const BOX_HALF_WIDTH: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub label: &'static str,
    pub value: f64,
}

impl Annotation {
    /// `"75th: 28.5"`: one decimal, always.
    pub fn text(&self) -> String {
        format!("{}: {:.1}", self.label, self.value)
    }
}

/// One game drawn as a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamePoint {
    /// Horizontal offset from the box center, deterministic per game index.
    pub x_offset: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub metric: Metric,
    /// (row, column) in the grid.
    pub cell: (usize, usize),
    pub title: String,
    pub box_low: f64,
    pub median: f64,
    pub box_high: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub points: Vec<GamePoint>,
    pub annotations: [Annotation; 4],
    pub y_range: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub title: String,
    pub panels: Vec<PanelLayout>,
    /// Grid cells with no panel.
    pub empty_cells: Vec<(usize, usize)>,
}

impl FigureLayout {
    pub fn from_result(result: &DistributionResult) -> Self {
        let panels: Vec<PanelLayout> = Metric::ALL
            .iter()
            .enumerate()
            .map(|(i, &metric)| panel(result, metric, (i / GRID.1, i % GRID.1)))
            .collect();

        let empty_cells = (panels.len()..GRID.0 * GRID.1)
            .map(|i| (i / GRID.1, i % GRID.1))
            .collect();

        Self {
            title: figure_title(result),
            panels,
            empty_cells,
        }
    }

    /// Raster size in pixels.
    pub fn pixel_size() -> (u32, u32) {
        (FIGURE_INCHES.0 * DPI, FIGURE_INCHES.1 * DPI)
    }
}

fn figure_title(result: &DistributionResult) -> String {
    let mut title = format!("{} Performance Distribution", result.player.full_name);
    if let Some(opp) = &result.opponent {
        title.push_str(&format!(" vs {}", opp.full_name));
    }
    title.push_str(&format!(" ({}", result.season));
    if result.season_type != SeasonType::RegularSeason {
        title.push_str(&format!(" {}", result.season_type));
    }
    title.push_str(&format!(", {} games)", result.games_played));
    title
}

fn panel(result: &DistributionResult, metric: Metric, cell: (usize, usize)) -> PanelLayout {
    let set = *result.percentiles.get(metric);
    let series = result.series.get(metric);
    // Whiskers are the true extremes; p100 is the max by construction.
    let min = series.min().map(f64::from).unwrap_or(set.p25);
    let max = series.max().map(f64::from).unwrap_or(set.p100);

    let points = series
        .values()
        .iter()
        .enumerate()
        .map(|(i, &v)| GamePoint {
            x_offset: jitter(i),
            value: f64::from(v),
        })
        .collect();

    PanelLayout {
        metric,
        cell,
        title: metric.label().to_string(),
        box_low: set.p25,
        median: set.p50,
        box_high: set.p75,
        whisker_low: min,
        whisker_high: max,
        points,
        annotations: [
            Annotation { label: "25th", value: set.p25 },
            Annotation { label: "50th", value: set.p50 },
            Annotation { label: "75th", value: set.p75 },
            Annotation { label: "Max", value: set.p100 },
        ],
        y_range: padded_range(min, max),
    }
}

/// Spread points across the box width without randomness.
fn jitter(index: usize) -> f64 {
    const GOLDEN: f64 = 0.618_033_988_749_895;
    ((index as f64 * GOLDEN).fract() - 0.5) * BOX_HALF_WIDTH
}

/// 10% headroom each side; a flat series gets ±1.
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 { span * 0.1 } else { 1.0 };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_result;

    #[test]
    fn test_grid_order_and_empty_cell() {
        let layout = FigureLayout::from_result(&sample_result(vec![10, 20, 30, 40, 50]));
        let order: Vec<Metric> = layout.panels.iter().map(|p| p.metric).collect();
        assert_eq!(order, Metric::ALL.to_vec());
        assert_eq!(layout.panels[3].cell, (1, 0));
        assert_eq!(layout.panels[4].cell, (1, 1));
        assert_eq!(layout.empty_cells, vec![(1, 2)]);
    }

    #[test]
    fn test_title() {
        let layout = FigureLayout::from_result(&sample_result(vec![10, 20]));
        assert_eq!(
            layout.title,
            "Stephen Curry Performance Distribution vs Los Angeles Lakers (2023-24, 2 games)"
        );
    }

    #[test]
    fn test_points_box_whiskers_annotations() {
        let layout = FigureLayout::from_result(&sample_result(vec![30, 10, 50, 20, 40]));
        let pts = &layout.panels[0];
        assert_eq!(pts.points.len(), 5);
        assert_eq!(pts.points[0].value, 30.0);
        assert!(pts.points.iter().all(|p| p.x_offset.abs() <= BOX_HALF_WIDTH / 2.0));
        assert_eq!((pts.box_low, pts.median, pts.box_high), (20.0, 30.0, 40.0));
        assert_eq!((pts.whisker_low, pts.whisker_high), (10.0, 50.0));
        let texts: Vec<String> = pts.annotations.iter().map(|a| a.text()).collect();
        assert_eq!(texts, ["25th: 20.0", "50th: 30.0", "75th: 40.0", "Max: 50.0"]);
        assert_eq!(pts.y_range, (6.0, 54.0));
    }

    #[test]
    fn test_flat_series_gets_padding() {
        let layout = FigureLayout::from_result(&sample_result(vec![42]));
        assert_eq!(layout.panels[1].y_range, (1.0, 3.0));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let r = sample_result(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(FigureLayout::from_result(&r), FigureLayout::from_result(&r));
        assert_eq!(FigureLayout::pixel_size(), (4500, 3000));
    }
}
