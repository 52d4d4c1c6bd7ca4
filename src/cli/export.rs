//! `export`, `stars` and `visualize` command handlers

use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::{ExportArgs, VisualizeArgs};
use crate::cli::session::Session;
use crate::core::table::ExportTable;
use crate::error::Result;
use crate::github::RepoHandler;
use crate::render::{default_filename, render_chart, write_table, ChartKind, ExportFormat, ImageFormat};

/// Export all repositories as a table
pub async fn handle_export(session: &Session, args: ExportArgs) -> Result<()> {
    let format: ExportFormat = args.data_format.parse()?;

    let login = session.client.viewer_login().await?;
    let repos = RepoHandler::new(&session.client).list().await?;
    let table = ExportTable::repositories(&repos, &login);

    let output = output_or_default(args.output, "repos", &login, format.extension());
    write_table(&table, format, &output)?;

    println!("📊 {} repositories exported to {}", table.len(), output.display());
    Ok(())
}

/// Export starred repositories as a table
pub async fn handle_stars(session: &Session, args: ExportArgs) -> Result<()> {
    let format: ExportFormat = args.data_format.parse()?;

    let login = session.client.viewer_login().await?;
    let starred = RepoHandler::new(&session.client).list_starred().await?;
    let table = ExportTable::starred(&starred);

    let output = output_or_default(args.output, "starred_repos", &login, format.extension());
    write_table(&table, format, &output)?;

    println!(
        "⭐ {} starred repositories exported to {}",
        table.len(),
        output.display()
    );
    Ok(())
}

/// Render one chart of all repositories
pub async fn handle_visualize(session: &Session, args: VisualizeArgs) -> Result<()> {
    let kind: ChartKind = args.kind.parse()?;
    let format: ImageFormat = args.image_format.parse()?;

    let login = session.client.viewer_login().await?;
    let repos = RepoHandler::new(&session.client).list().await?;
    let table = ExportTable::repositories(&repos, &login);

    let output = output_or_default(args.output, kind.as_str(), &login, format.extension());
    let written = render_chart(&table, kind, &output, format)?;

    println!("📈 Visualization saved to {}", written.display());
    Ok(())
}

fn output_or_default(output: Option<PathBuf>, kind: &str, login: &str, ext: &str) -> PathBuf {
    output.unwrap_or_else(|| {
        PathBuf::from(default_filename(kind, login, ext, Local::now().date_naive()))
    })
}
