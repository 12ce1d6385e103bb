// src/main.rs
// gitmuse - persona-styled git commit messages and branch names

use anyhow::Result;
use clap::Parser;
use gitmuse::cli::{Cli, Commands};
use gitmuse::config::{self, MuseConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    let _ = dotenvy::from_path(config::muse_dir().join(".env"));
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // First run: drop a commented sample config
    let config_path = MuseConfig::config_path();
    match MuseConfig::write_sample_if_missing(&config_path) {
        Ok(true) => println!("Created default config at {}", config_path.display()),
        Ok(false) => {}
        Err(e) => eprintln!("config error: {e}"),
    }

    match cli.command {
        Commands::Commit(args) => gitmuse::cli::run_commit(args).await?,
        Commands::Branch(args) => gitmuse::cli::run_branch(args).await?,
    }

    Ok(())
}
