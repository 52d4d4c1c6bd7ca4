//! `stats` and `list` command handlers

use crate::cli::session::Session;
use crate::core::stats::RepoStats;
use crate::error::Result;
use crate::github::RepoHandler;

/// Print repository counts
pub async fn handle_stats(session: &Session) -> Result<()> {
    let login = session.client.viewer_login().await?;
    let repos = RepoHandler::new(&session.client).list().await?;

    let stats = RepoStats::compute(&repos, &login);

    println!("Authenticated as: {}\n", login);
    for (label, value) in stats.entries() {
        println!("📊 {}: {}", label, value);
    }
    println!("⭐ Total stars: {}", stats.total_stars);
    println!("🍴 Total forks: {}", stats.total_forks);

    Ok(())
}

/// Print one line per repository
pub async fn handle_list(session: &Session) -> Result<()> {
    let repos = RepoHandler::new(&session.client).list().await?;

    if repos.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }

    for repo in repos {
        let mut markers = Vec::new();
        if repo.private {
            markers.push("private");
        }
        if repo.fork {
            markers.push("fork");
        }
        if repo.archived {
            markers.push("archived");
        }
        let markers = if markers.is_empty() {
            String::new()
        } else {
            format!(" [{}]", markers.join(", "))
        };

        println!(
            "📁 {}{} - {}",
            repo.full_name,
            markers,
            repo.description.as_deref().unwrap_or("No description")
        );
    }

    Ok(())
}
