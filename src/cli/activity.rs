//! `activity` command handler

use crate::cli::session::Session;
use crate::error::Result;
use crate::github::ActivityHandler;

/// Print the latest commits of a repository
pub async fn handle_activity(session: &Session, repo: String, limit: usize) -> Result<()> {
    let (owner, name) = match repo.split_once('/') {
        Some((owner, name)) => (owner.to_string(), name.to_string()),
        None => (session.client.viewer_login().await?, repo),
    };

    let commits = ActivityHandler::new(&session.client)
        .recent_commits(&owner, &name, limit)
        .await?;

    if commits.is_empty() {
        println!("No commits in {}/{}.", owner, name);
        return Ok(());
    }

    println!("Recent commits in {}/{}:\n", owner, name);
    for commit in commits {
        let date = commit
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        println!(
            "  {}  {}  {:<20}  {}",
            commit.short_sha(),
            date,
            truncate(&commit.author, 20),
            commit.summary()
        );
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
