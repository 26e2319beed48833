use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod notify;

use commands::{ConfigCommand, ItemsCommand, ResyncCommand, SetupCommand, StatusCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "articlesync")]
#[command(version)]
#[command(about = "Sync articles from a remote API into a managed collection", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Deny every collection write (sync commands become no-ops or fail)
    #[arg(long, global = true)]
    read_only: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import articles and choose the slug field
    Setup(SetupCommand),

    /// Re-sync using the stored data source and slug field
    Resync(ResyncCommand),

    /// Show collection sync status
    Status(StatusCommand),

    /// List collection items
    Items(ItemsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "articlesync=info,articlesync_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Setup(cmd)) => {
            cmd.run(&config, cli.read_only).await?;
        }
        Some(Commands::Resync(cmd)) => {
            cmd.run(&config, cli.read_only).await?;
        }
        Some(Commands::Status(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Items(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
