//! Static chart images
//!
//! Draws one of three fixed charts from an [`ExportTable`] of repositories
//! and writes it as a PNG or SVG file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::stats::{creation_timeline, language_histogram, stars_vs_forks};
use crate::core::table::ExportTable;
use crate::error::{Result, StreamgitError};

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Available charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Repositories per primary language
    LanguageDistribution,
    /// Stars against forks, one point per repository
    StarsVsForks,
    /// Repositories created per month
    CreationTimeline,
}

impl ChartKind {
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::LanguageDistribution,
            ChartKind::StarsVsForks,
            ChartKind::CreationTimeline,
        ]
    }

    /// Identifier used on the command line and in file names
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::LanguageDistribution => "language_distribution",
            ChartKind::StarsVsForks => "stars_vs_forks",
            ChartKind::CreationTimeline => "creation_timeline",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::LanguageDistribution => "Language Distribution",
            ChartKind::StarsVsForks => "Stars vs. Forks",
            ChartKind::CreationTimeline => "Repository Creation Timeline",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = StreamgitError;

    fn from_str(s: &str) -> Result<Self> {
        ChartKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| StreamgitError::UnsupportedChart(s.to_string()))
    }
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = StreamgitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(StreamgitError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Append the format's extension unless `output` already ends with it
pub fn with_extension(output: &Path, format: ImageFormat) -> PathBuf {
    let ext = format.extension();
    let has_ext = output
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
        .unwrap_or(false);

    if has_ext {
        output.to_path_buf()
    } else {
        let mut name = output.as_os_str().to_os_string();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }
}

/// Draw `kind` from `table` into a single image file; returns the path written
pub fn render_chart(
    table: &ExportTable,
    kind: ChartKind,
    output: &Path,
    format: ImageFormat,
) -> Result<PathBuf> {
    let path = with_extension(output, format);

    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
            draw(&root, table, kind)?;
            root.present().map_err(chart_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(&path, CHART_SIZE).into_drawing_area();
            draw(&root, table, kind)?;
            root.present().map_err(chart_err)?;
        }
    }

    tracing::debug!(chart = %kind, path = %path.display(), "rendered chart");
    Ok(path)
}

fn chart_err<E: fmt::Debug>(err: E) -> StreamgitError {
    StreamgitError::Chart(format!("{:?}", err))
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &ExportTable,
    kind: ChartKind,
) -> Result<()> {
    root.fill(&WHITE).map_err(chart_err)?;

    match kind {
        ChartKind::LanguageDistribution => {
            draw_bars(root, kind.title(), "Repositories", &language_histogram(table))
        }
        ChartKind::StarsVsForks => draw_scatter(root, table),
        ChartKind::CreationTimeline => draw_bars(
            root,
            kind.title(),
            "Number of Repositories",
            &creation_timeline(table),
        ),
    }
}

/// Labelled vertical bars, one per `(label, count)` entry
fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    y_desc: &str,
    data: &[(String, usize)],
) -> Result<()> {
    let slots = data.len().max(1) as u32;
    let max = data.iter().map(|(_, n)| *n).max().unwrap_or(0) as u32 + 1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..max)
        .map_err(chart_err)?;

    let label = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => data
            .get(*i as usize)
            .map(|(name, _)| name.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&label)
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(8)
                .data(
                    data.iter()
                        .enumerate()
                        .map(|(i, (_, n))| (i as u32, *n as u32)),
                ),
        )
        .map_err(chart_err)?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, table: &ExportTable) -> Result<()> {
    let points = stars_vs_forks(table);
    let max_stars = points.iter().map(|p| p.stars).max().unwrap_or(0) + 1;
    let max_forks = points.iter().map(|p| p.forks).max().unwrap_or(0) + 1;

    let mut chart = ChartBuilder::on(root)
        .caption(ChartKind::StarsVsForks.title(), ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(0u64..max_stars, 0u64..max_forks)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Stars")
        .y_desc("Forks")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(points.iter().map(|p| {
            EmptyElement::at((p.stars, p.forks))
                + Circle::new((0, 0), 4, BLUE.filled())
                + Text::new(p.name.clone(), (6, -6), ("sans-serif", 12).into_font())
        }))
        .map_err(chart_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_parsing() {
        assert_eq!(
            "language_distribution".parse::<ChartKind>().unwrap(),
            ChartKind::LanguageDistribution
        );
        assert_eq!(
            "creation_timeline".parse::<ChartKind>().unwrap(),
            ChartKind::CreationTimeline
        );
        assert!(matches!(
            "pie".parse::<ChartKind>(),
            Err(StreamgitError::UnsupportedChart(k)) if k == "pie"
        ));
    }

    #[test]
    fn test_image_format_parsing() {
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert!(matches!(
            "pdf".parse::<ImageFormat>(),
            Err(StreamgitError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_extension_is_appended_once() {
        assert_eq!(
            with_extension(Path::new("langs"), ImageFormat::Png),
            PathBuf::from("langs.png")
        );
        assert_eq!(
            with_extension(Path::new("out/langs.PNG"), ImageFormat::Png),
            PathBuf::from("out/langs.PNG")
        );
        assert_eq!(
            with_extension(Path::new("chart.png"), ImageFormat::Svg),
            PathBuf::from("chart.png.svg")
        );
    }
}
