//! Chart output.
//!
//! Renderers only see a finished [`Timeline`]; parsing, connection detection
//! and layout never depend on a backend.

mod svg;

pub use svg::SvgRenderer;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::report::Timeline;

/// Draw primitives in, document out.
pub trait ChartRenderer {
    fn render(&self, timeline: &Timeline) -> anyhow::Result<String>;
}

/// Append `.svg` unless the path already ends with it (any case).
pub fn svg_output_path(path: &str) -> PathBuf {
    if path.to_lowercase().ends_with(".svg") {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("{path}.svg"))
    }
}

/// Write a rendered chart to `path`.
pub fn export(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    log::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Write a rendered chart to a temporary file that outlives the process.
///
/// Used when the chart is only viewed, so the viewer has a file to open.
pub fn export_temp(contents: &str) -> anyhow::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("timereport-")
        .suffix(".svg")
        .tempfile()
        .context("Failed to create temporary chart file")?;
    file.write_all(contents.as_bytes())
        .context("Failed to write temporary chart file")?;
    let path = file
        .into_temp_path()
        .keep()
        .context("Failed to keep temporary chart file")?;
    Ok(path)
}

/// Open a chart in the platform's default viewer.
#[cfg(feature = "cli")]
pub fn view(path: &Path) -> anyhow::Result<()> {
    log::info!("opening {}", path.display());
    open::that(path).with_context(|| format!("Failed to open {} in a viewer", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare("chart", "chart.svg")]
    #[case::has_suffix("chart.svg", "chart.svg")]
    #[case::upper_suffix("chart.SVG", "chart.SVG")]
    #[case::other_suffix("chart.png", "chart.png.svg")]
    #[case::nested("out/run-1", "out/run-1.svg")]
    fn test_svg_output_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(svg_output_path(input), PathBuf::from(expected));
    }

    #[test]
    fn test_export_and_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        export(&path, "<svg/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");

        let temp = export_temp("<svg/>").unwrap();
        assert_eq!(temp.extension().and_then(|e| e.to_str()), Some("svg"));
        assert_eq!(std::fs::read_to_string(&temp).unwrap(), "<svg/>");
        std::fs::remove_file(temp).unwrap();
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.svg");
        let err = export(&path, "<svg/>").unwrap_err();
        assert!(err.to_string().contains("Failed to write chart"));
    }
}
