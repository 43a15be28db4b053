//! Hoopstat Chart — distribution visualizer.
//!
//! One box-and-whisker panel per metric (points, rebounds, assists, blocks,
//! steals, in that order) with every game overlaid as a point and the
//! percentiles annotated. A figure is either written to a PNG or shown in an
//! interactive terminal viewer, never both.

pub mod box_plot;
pub mod error;
pub mod layout;
pub mod raster;
pub mod theme;
pub mod viewer;

#[cfg(test)]
mod test_helpers;

use std::path::Path;

use hoopstat_core::DistributionResult;
use tracing::info;

pub use error::ChartError;
pub use layout::FigureLayout;
pub use raster::write_png;
pub use viewer::show_interactive;

/// Persist the figure to `destination` when given, otherwise show it
/// interactively. The result is handed back unchanged for chaining.
pub fn render(
    result: DistributionResult,
    destination: Option<&Path>,
) -> Result<DistributionResult, ChartError> {
    let layout = FigureLayout::from_result(&result);
    match destination {
        Some(path) => write_png(&layout, path)?,
        None => {
            info!(player = %result.player, "opening interactive viewer");
            show_interactive(&layout)?
        }
    }
    Ok(result)
}

/// Default chart file name: `<player>_<season>.png`, or
/// `<player>_vs_<opponent>_<season>.png` for an opponent query.
pub fn chart_file_name(result: &DistributionResult) -> String {
    let player = slugify(&result.player.full_name);
    match &result.opponent {
        Some(team) => format!("{player}_vs_{}_{}.png", slugify(&team.full_name), result.season),
        None => format!("{player}_{}.png", result.season),
    }
}

/// Lowercase, with runs of anything but ASCII letters and digits collapsed to `_`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_result;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Stephen Curry"), "stephen_curry");
        assert_eq!(slugify("  Shai Gilgeous-Alexander "), "shai_gilgeous_alexander");
        assert_eq!(slugify("D'Angelo Russell"), "d_angelo_russell");
    }

    #[test]
    fn test_chart_file_names() {
        let mut result = sample_result(vec![1, 2, 3]);
        assert_eq!(
            chart_file_name(&result),
            "stephen_curry_vs_los_angeles_lakers_2023-24.png"
        );
        result.opponent = None;
        assert_eq!(chart_file_name(&result), "stephen_curry_2023-24.png");
    }

    #[test]
    fn test_render_to_file_returns_result_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chart.png");
        let result = sample_result(vec![12, 30, 18, 25]);
        let returned = render(result.clone(), Some(path.as_path())).unwrap();
        assert_eq!(returned, result);
        assert!(path.exists());
    }
}
