//! LCA TV CLI - terminal view of the advertising backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password from --password or LCA_PASSWORD)
//! lca-cli login -u admin
//!
//! # Dashboard stats, once or refreshed every 30 seconds
//! lca-cli stats
//! lca-cli stats --watch
//!
//! # Listings
//! lca-cli clients
//! lca-cli orders --status active
//! lca-cli ad-spaces
//!
//! # Breaking news marquee
//! lca-cli ticker
//! ```
//!
//! # Environment Variables
//!
//! - `LCA_API_URL` - Backend base URL (default `http://localhost:8001/api`)
//! - `LCA_SESSION_FILE` - Session file (default `<config dir>/lca-tv/session.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use lca_tv_client::SessionEvent;
use secrecy::SecretString;

mod commands;
mod error;
mod output;

use commands::Context;
use error::CliError;

#[derive(Parser)]
#[command(name = "lca-cli")]
#[command(author, version, about = "LCA TV advertising CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as an admin and keep the session on disk
    Login {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "LCA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Dashboard statistics
    Stats {
        /// Keep refreshing every 30 seconds
        #[arg(short, long)]
        watch: bool,
    },
    /// Advertising clients
    Clients,
    /// Advertising orders
    Orders {
        /// Only orders with this status (`pending`, `active`, `completed`, `cancelled`)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Ad spaces and their prices
    AdSpaces,
    /// Backend health
    Health,
    /// Scroll the breaking news ticker
    Ticker {
        /// Terminal columns to use
        #[arg(short, long, default_value_t = 80)]
        width: u16,

        /// Print the strip once instead of scrolling
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before reading LCA_API_URL
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env().await?;
    let mut events = ctx.session.subscribe();

    let result = match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, username, &SecretString::from(password)).await
        }
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Stats { watch } => {
            if watch {
                commands::stats::watch(&ctx).await
            } else {
                commands::stats::show(&ctx).await
            }
        }
        Commands::Clients => commands::listings::clients(&ctx).await,
        Commands::Orders { status } => commands::listings::orders(&ctx, status.as_deref()).await,
        Commands::AdSpaces => commands::listings::ad_spaces(&ctx).await,
        Commands::Health => commands::health(&ctx).await,
        Commands::Ticker { width, once } => commands::ticker::run(&ctx, width, once).await,
    };

    // The transport already dropped the stored credential on a 401.
    if std::iter::from_fn(|| events.try_recv().ok()).any(|e| e == SessionEvent::Expired) {
        tracing::warn!("Session expirée. Reconnectez-vous avec `lca-cli login -u <utilisateur>`.");
    }
    result
}
