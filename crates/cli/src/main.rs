//! Lunnar CLI - Marketplace front-end, migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations and load demo listings
//! lunnar migrate
//! lunnar seed --count 40
//!
//! # Browse approved listings
//! lunnar browse --brand BMW --model "group:3 Series" --sort price-asc
//!
//! # Sign in and favorite a listing
//! lunnar account login -e anna@lunnar.hu -p Secret1
//! lunnar favorite 5f0c...
//!
//! # Moderate
//! lunnar admin list
//! lunnar admin approve 5f0c...
//! ```
//!
//! # Environment Variables
//!
//! - `LUNNAR_API_URL` - REST base URL (default `http://localhost:5000/api`)
//! - `LUNNAR_DATA_DIR` - Local store directory (default `.lunnar`)
//! - `LUNNAR_ADMIN_KEY` - Key sent to the moderation endpoints
//! - `SERVER_DATABASE_URL` / `DATABASE_URL` - Used by `migrate` and `seed`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lunnar_client::ClientConfig;

mod commands;
mod render;

use commands::{account::AccountAction, admin::AdminAction, catalog::BrowseArgs, submit::SubmitArgs};

#[derive(Parser)]
#[command(name = "lunnar")]
#[command(author, version, about = "Lunnar used-car marketplace")]
struct Cli {
    /// Override `LUNNAR_API_URL`
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override `LUNNAR_DATA_DIR`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert approved demo listings into the database
    Seed {
        /// Number of listings to create
        #[arg(short, long, default_value_t = 40)]
        count: usize,
    },
    /// List approved listings
    Browse(BrowseArgs),
    /// Show one listing
    Show {
        /// Listing id
        id: String,
    },
    /// Add or remove a favorite
    Favorite {
        /// Listing id
        id: String,
    },
    /// List favorite listings
    Favorites,
    /// Submit a listing for moderation
    Submit(Box<SubmitArgs>),
    /// Moderate listings
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage your account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lunnar_client=info,lunnar_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn client_config(api_url: Option<String>, data_dir: Option<PathBuf>) -> ClientConfig {
    let defaults = ClientConfig::from_env();
    ClientConfig::new(
        api_url.unwrap_or(defaults.api_url),
        data_dir.unwrap_or(defaults.data_dir),
        defaults.admin_key,
    )
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = client_config(cli.api_url, cli.data_dir);
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::demo(count).await?,
        Commands::Browse(args) => commands::catalog::browse(&config, args).await,
        Commands::Show { id } => commands::catalog::show(&config, &id).await,
        Commands::Favorite { id } => commands::catalog::favorite(&config, &id).await?,
        Commands::Favorites => commands::catalog::favorites(&config).await,
        Commands::Submit(args) => commands::submit::run(&config, *args).await?,
        Commands::Admin { action } => commands::admin::run(&config, action).await?,
        Commands::Account { action } => commands::account::run(&config, action).await?,
    }
    Ok(())
}
