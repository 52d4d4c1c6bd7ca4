//! Summary counts and chart series derived from fetched data

use std::collections::{BTreeMap, BTreeSet};

use crate::core::table::{Cell, ExportTable};
use crate::github::{ActivityRecord, RepositorySummary};

/// Repository counts shown by `stats` and the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStats {
    pub viewer: String,
    pub total: usize,
    pub owned: usize,
    pub forked: usize,
    pub non_fork: usize,
    pub archived: usize,
    pub non_archived: usize,
    pub public: usize,
    pub private: usize,
    pub from_organizations: usize,
    pub total_stars: u64,
    pub total_forks: u64,
}

impl RepoStats {
    pub fn compute(repos: &[RepositorySummary], viewer: &str) -> Self {
        let total = repos.len();
        let forked = repos.iter().filter(|r| r.fork).count();
        let archived = repos.iter().filter(|r| r.archived).count();
        let private = repos.iter().filter(|r| r.private).count();
        let from_organizations = repos.iter().filter(|r| r.owner != viewer).count();

        Self {
            viewer: viewer.to_string(),
            total,
            owned: total - from_organizations,
            forked,
            non_fork: total - forked,
            archived,
            non_archived: total - archived,
            public: total - private,
            private,
            from_organizations,
            total_stars: repos.iter().map(|r| r.stars).sum(),
            total_forks: repos.iter().map(|r| r.forks).sum(),
        }
    }

    /// Labelled counts in display order
    pub fn entries(&self) -> Vec<(String, usize)> {
        vec![
            ("Total Repositories".to_string(), self.total),
            (format!("Owned by {}", self.viewer), self.owned),
            ("Forked".to_string(), self.forked),
            ("Non-fork".to_string(), self.non_fork),
            ("Archived".to_string(), self.archived),
            ("Non-archived".to_string(), self.non_archived),
            ("Public".to_string(), self.public),
            ("Private".to_string(), self.private),
            ("From Organizations".to_string(), self.from_organizations),
        ]
    }
}

/// Count of each value in the `language` column, most common first
///
/// Empty cells are skipped; ties keep first-appearance order.
pub fn language_histogram(table: &ExportTable) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for language in table.column_values("language").filter_map(Cell::as_str) {
        match counts.iter_mut().find(|(name, _)| name == language) {
            Some((_, n)) => *n += 1,
            None => counts.push((language.to_string(), 1)),
        }
    }

    // stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// A repository plotted on the stars/forks plane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarForkPoint {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
}

/// One point per row with both counts present
pub fn stars_vs_forks(table: &ExportTable) -> Vec<StarForkPoint> {
    (0..table.len())
        .filter_map(|row| {
            Some(StarForkPoint {
                name: table.get(row, "name")?.as_str()?.to_string(),
                stars: table.get(row, "stars")?.as_u64()?,
                forks: table.get(row, "forks")?.as_u64()?,
            })
        })
        .collect()
}

/// Repositories created per calendar month (`YYYY-MM`), oldest first
pub fn creation_timeline(table: &ExportTable) -> Vec<(String, usize)> {
    let mut buckets: BTreeMap<String, usize> = BTreeMap::new();
    for ts in table.column_values("created_at").filter_map(Cell::as_timestamp) {
        *buckets.entry(ts.format("%Y-%m").to_string()).or_default() += 1;
    }
    buckets.into_iter().collect()
}

/// Commits by the viewer against everyone else
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSplit {
    pub mine: usize,
    pub mine_repos: usize,
    pub others: usize,
    pub others_repos: usize,
}

impl CommitSplit {
    pub fn compute(records: &[ActivityRecord], login: &str) -> Self {
        let mut mine = BTreeSet::new();
        let mut others = BTreeSet::new();
        let mut split = Self::default();

        for record in records {
            if record.is_by(login) {
                split.mine += 1;
                mine.insert(record.repository.as_str());
            } else {
                split.others += 1;
                others.insert(record.repository.as_str());
            }
        }

        split.mine_repos = mine.len();
        split.others_repos = others.len();
        split
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, owner: &str, language: &str, month: u32) -> RepositorySummary {
        let ts = Utc.with_ymd_and_hms(2023, month, 1, 0, 0, 0).unwrap();
        RepositorySummary {
            name: name.to_string(),
            full_name: format!("{}/{}", owner, name),
            owner: owner.to_string(),
            description: None,
            language: Some(language.to_string()),
            private: month % 2 == 0,
            fork: name.starts_with("fork"),
            archived: false,
            stars: month as u64 * 10,
            forks: month as u64,
            created_at: ts,
            updated_at: ts,
            url: String::new(),
        }
    }

    fn fixture() -> Vec<RepositorySummary> {
        vec![
            repo("one", "octo", "Python", 1),
            repo("two", "octo", "Python", 2),
            repo("fork-three", "acme", "JavaScript", 2),
        ]
    }

    #[test]
    fn test_language_histogram() {
        let table = ExportTable::repositories(&fixture(), "octo");
        assert_eq!(
            language_histogram(&table),
            vec![("Python".to_string(), 2), ("JavaScript".to_string(), 1)]
        );
    }

    #[test]
    fn test_histogram_skips_missing_language() {
        let mut repos = fixture();
        repos[0].language = None;
        let table = ExportTable::repositories(&repos, "octo");
        assert_eq!(
            language_histogram(&table),
            vec![("Python".to_string(), 1), ("JavaScript".to_string(), 1)]
        );
    }

    #[test]
    fn test_repo_stats() {
        let stats = RepoStats::compute(&fixture(), "octo");
        assert_eq!(stats.total, 3);
        assert_eq!(stats.owned, 2);
        assert_eq!(stats.from_organizations, 1);
        assert_eq!(stats.forked, 1);
        assert_eq!(stats.non_fork, 2);
        assert_eq!(stats.private, 2);
        assert_eq!(stats.public, 1);
        assert_eq!(stats.total_stars, 50);
        assert_eq!(stats.total_forks, 5);
        assert_eq!(stats.entries()[1].0, "Owned by octo");
        assert_eq!(stats.entries().len(), 9);
    }

    #[test]
    fn test_stars_vs_forks_points() {
        let table = ExportTable::repositories(&fixture(), "octo");
        let points = stars_vs_forks(&table);
        assert_eq!(points.len(), 3);
        assert_eq!(
            points[0],
            StarForkPoint {
                name: "one".into(),
                stars: 10,
                forks: 1
            }
        );
    }

    #[test]
    fn test_creation_timeline_buckets_by_month() {
        let table = ExportTable::repositories(&fixture(), "octo");
        assert_eq!(
            creation_timeline(&table),
            vec![("2023-01".to_string(), 1), ("2023-02".to_string(), 2)]
        );
    }

    fn commit(repository: &str, author: &str, login: Option<&str>) -> ActivityRecord {
        ActivityRecord {
            repository: repository.to_string(),
            sha: "abc1234".to_string(),
            author: author.to_string(),
            author_login: login.map(str::to_string),
            date: None,
            message: "change".to_string(),
        }
    }

    #[test]
    fn test_commit_split_by_login_and_name() {
        let records = vec![
            commit("a", "Octo Person", Some("octo")),
            commit("a", "octo", None),
            commit("b", "Someone", Some("someone")),
            commit("c", "Someone", None),
        ];

        assert_eq!(
            CommitSplit::compute(&records, "octo"),
            CommitSplit {
                mine: 2,
                mine_repos: 1,
                others: 2,
                others_repos: 2,
            }
        );
        assert_eq!(CommitSplit::compute(&[], "octo"), CommitSplit::default());
    }
}
