//! Table export to CSV and Excel

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};

use crate::core::table::{Cell, ExportTable};
use crate::error::{Result, StreamgitError};

/// Supported tabular file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = StreamgitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(StreamgitError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Write `table` to `path` in the given format
pub fn write_table(table: &ExportTable, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, path)?,
        ExportFormat::Xlsx => write_xlsx(table, path)?,
    }

    tracing::debug!(
        rows = table.len(),
        format = format.extension(),
        path = %path.display(),
        "exported table"
    );
    Ok(())
}

fn write_csv(table: &ExportTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

fn write_xlsx(table: &ExportTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Cell::Int(n) => {
                    sheet.write_number(r, c, *n as f64)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Cell::Timestamp(_) => {
                    sheet.write_string(r, c, cell.to_string())?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// `YYYYMMDD_<kind>_<login>.<ext>`, used when no output path is given
pub fn default_filename(kind: &str, login: &str, extension: &str, date: NaiveDate) -> String {
    format!("{}_{}_{}.{}", date.format("%Y%m%d"), kind, login, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!(matches!(
            "json".parse::<ExportFormat>(),
            Err(StreamgitError::UnsupportedFormat(f)) if f == "json"
        ));
    }

    #[test]
    fn test_default_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(
            default_filename("starred_repos", "testuser", "csv", date),
            "20250103_starred_repos_testuser.csv"
        );
    }

    #[test]
    fn test_csv_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");

        let mut table = ExportTable::new(&["name", "stars", "note"]);
        table.push_row(vec![
            Cell::Text("a, b".into()),
            Cell::Int(4),
            Cell::Empty,
        ]);
        write_table(&table, ExportFormat::Csv, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "name,stars,note\n\"a, b\",4,\n");
    }

    #[test]
    fn test_xlsx_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.xlsx");

        let mut table = ExportTable::new(&["name", "private"]);
        table.push_row(vec![Cell::Text("a".into()), Cell::Bool(true)]);
        write_table(&table, ExportFormat::Xlsx, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }
}
