//! File renderers: chart images and tabular exports

pub mod chart;
pub mod export;

pub use chart::{render_chart, ChartKind, ImageFormat};
pub use export::{default_filename, write_table, ExportFormat};
