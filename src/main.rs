//! streamgit - GitHub repository analytics
//!
//! Repository statistics, CSV/Excel exports, charts and a terminal
//! dashboard over the GitHub REST API.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use streamgit::cli::commands::{Cli, Commands};
use streamgit::cli::{activity, export, repo, stats, Session, WELCOME};
use streamgit::core::Config;
use streamgit::error::Result;
use streamgit::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let Cli {
        token,
        secrets_file,
        command,
    } = Cli::parse();

    let Some(command) = command else {
        println!("{}", WELCOME);
        return Ok(());
    };

    let session = || Session::open(token.clone(), secrets_file.clone());

    match command {
        Commands::Stats => stats::handle_stats(&session()?).await,
        Commands::List => stats::handle_list(&session()?).await,
        Commands::Create(args) => repo::handle_create(&session()?, args).await,
        Commands::Delete { name } => repo::handle_delete(&session()?, name).await,
        Commands::Export(args) => export::handle_export(&session()?, args).await,
        Commands::Stars(args) => export::handle_stars(&session()?, args).await,
        Commands::Visualize(args) => export::handle_visualize(&session()?, args).await,
        Commands::Activity { repo, limit } => {
            activity::handle_activity(&session()?, repo, limit).await
        }
        // The dashboard resolves its own credential and falls back to a login prompt
        Commands::Dashboard => {
            let config = Config::load()?;
            let mut app = App::new(config, token, secrets_file);
            app.run().await
        }
    }
}
