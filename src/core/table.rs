//! Flat tabular projections of fetched GitHub data
//!
//! An [`ExportTable`] is the common input of the chart and export renderers.
//! Rows keep the order of the input they were built from.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::github::{ActivityRecord, RepositorySummary};

/// Columns of the repository table
pub const REPOSITORY_COLUMNS: &[&str] = &[
    "name",
    "full_name",
    "description",
    "language",
    "stars",
    "forks",
    "is_fork",
    "is_archived",
    "is_private",
    "created_at",
    "updated_at",
    "url",
    "owner",
    "is_owner",
];

/// Columns of the starred repository table
pub const STARRED_COLUMNS: &[&str] = &[
    "name",
    "owner",
    "language",
    "stars",
    "forks",
    "url",
    "description",
];

/// Columns of the commit activity table
pub const ACTIVITY_COLUMNS: &[&str] = &["repository", "sha", "author", "date", "message"];

/// A single scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(u64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Empty,
}

impl Cell {
    fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    fn optional_text(value: Option<&str>) -> Self {
        value.map(Cell::text).unwrap_or(Cell::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Cell::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Cell::Empty => Ok(()),
        }
    }
}

/// Ordered rows under a fixed column set
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    /// Empty table with the given columns
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one cell per column
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// One row per repository. `viewer` decides the `is_owner` column.
    pub fn repositories(repos: &[RepositorySummary], viewer: &str) -> Self {
        let mut table = Self::new(REPOSITORY_COLUMNS);
        for repo in repos {
            table.push_row(vec![
                Cell::text(&repo.name),
                Cell::text(&repo.full_name),
                Cell::optional_text(repo.description.as_deref()),
                Cell::optional_text(repo.language.as_deref()),
                Cell::Int(repo.stars),
                Cell::Int(repo.forks),
                Cell::Bool(repo.fork),
                Cell::Bool(repo.archived),
                Cell::Bool(repo.private),
                Cell::Timestamp(repo.created_at),
                Cell::Timestamp(repo.updated_at),
                Cell::text(&repo.url),
                Cell::text(&repo.owner),
                Cell::Bool(repo.owner == viewer),
            ]);
        }
        table
    }

    /// One row per starred repository
    pub fn starred(repos: &[RepositorySummary]) -> Self {
        let mut table = Self::new(STARRED_COLUMNS);
        for repo in repos {
            table.push_row(vec![
                Cell::text(&repo.name),
                Cell::text(&repo.owner),
                Cell::text(repo.language.as_deref().unwrap_or("Unknown")),
                Cell::Int(repo.stars),
                Cell::Int(repo.forks),
                Cell::text(&repo.url),
                Cell::optional_text(repo.description.as_deref()),
            ]);
        }
        table
    }

    /// One row per commit
    pub fn activity(records: &[ActivityRecord]) -> Self {
        let mut table = Self::new(ACTIVITY_COLUMNS);
        for record in records {
            table.push_row(vec![
                Cell::text(&record.repository),
                Cell::text(&record.sha),
                Cell::text(&record.author),
                record.date.map(Cell::Timestamp).unwrap_or(Cell::Empty),
                Cell::text(&record.message),
            ]);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` under `column`
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Every value of one column, in row order
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a Cell> + 'a {
        let idx = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repo(name: &str, owner: &str, language: Option<&str>) -> RepositorySummary {
        let ts = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
        RepositorySummary {
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            owner: owner.to_string(),
            description: None,
            language: language.map(str::to_string),
            private: false,
            fork: false,
            archived: false,
            stars: 3,
            forks: 1,
            created_at: ts,
            updated_at: ts,
            url: format!("https://github.com/{}/{}", owner, name),
        }
    }

    #[test]
    fn test_repositories_preserve_order_and_count() {
        let repos = vec![
            repo("zeta", "octo", Some("Rust")),
            repo("alpha", "acme", None),
            repo("mid", "octo", Some("Go")),
        ];
        let table = ExportTable::repositories(&repos, "octo");

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns().len(), REPOSITORY_COLUMNS.len());
        let names: Vec<_> = table
            .column_values("name")
            .filter_map(Cell::as_str)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.get(0, "is_owner"), Some(&Cell::Bool(true)));
        assert_eq!(table.get(1, "is_owner"), Some(&Cell::Bool(false)));
        assert_eq!(table.get(1, "language"), Some(&Cell::Empty));
    }

    #[test]
    fn test_shaping_is_deterministic() {
        let repos = vec![repo("a", "octo", Some("C")), repo("b", "octo", Some("C"))];
        assert_eq!(
            ExportTable::repositories(&repos, "octo"),
            ExportTable::repositories(&repos, "octo")
        );
    }

    #[test]
    fn test_starred_defaults_language() {
        let table = ExportTable::starred(&[repo("x", "acme", None)]);
        assert_eq!(table.get(0, "language"), Some(&Cell::Text("Unknown".into())));
        assert_eq!(table.columns().len(), STARRED_COLUMNS.len());
    }

    #[test]
    fn test_activity_table() {
        let record = ActivityRecord {
            repository: "hello".into(),
            sha: "abc123".into(),
            author: "Mona".into(),
            author_login: None,
            date: None,
            message: "init".into(),
        };
        let table = ExportTable::activity(&[record]);
        assert_eq!(table.get(0, "sha"), Some(&Cell::Text("abc123".into())));
        assert_eq!(table.get(0, "date"), Some(&Cell::Empty));
    }

    #[test]
    fn test_cell_display() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Cell::Timestamp(ts).to_string(), "2024-01-02T03:04:05+00:00");
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Bool(true).to_string(), "true");
    }
}
