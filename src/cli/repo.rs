//! `create` and `delete` command handlers

use crate::cli::commands::CreateArgs;
use crate::cli::session::Session;
use crate::error::Result;
use crate::github::repos::validate_repo_name;
use crate::github::{CreateRepoParams, RepoHandler};

/// Create a repository under the authenticated account
pub async fn handle_create(session: &Session, args: CreateArgs) -> Result<()> {
    let params = CreateRepoParams {
        name: args.name,
        description: args.description,
        private: args.private,
        auto_init: args.auto_init,
        gitignore_template: args.gitignore_template,
        license_template: args.license_template,
    };

    let repo = RepoHandler::new(&session.client).create(&params).await?;

    let visibility = if repo.private { "private" } else { "public" };
    println!("✨ Repository created ({}): {}", visibility, repo.url);

    Ok(())
}

/// Delete one of the authenticated account's repositories
pub async fn handle_delete(session: &Session, name: String) -> Result<()> {
    validate_repo_name(&name)?;

    let login = session.client.viewer_login().await?;
    RepoHandler::new(&session.client)
        .delete(&login, &name)
        .await?;

    println!("🗑️  Repository {}/{} deleted", login, name);
    Ok(())
}
