//! CLI administration tool for snaplink.
//!
//! Creates and inspects short links and maintains the database without going
//! through the HTTP API. Uses the same configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally expiring after an hour
//! cargo run --bin admin -- shorten openai.com --ttl 3600
//!
//! # Show where a code points
//! cargo run --bin admin -- resolve aB3xZ9
//!
//! # Delete expired links
//! cargo run --bin admin -- sweep -y
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*`): PostgreSQL connection
//! - `BASE_URL`, `CODE_LENGTH`, `MAX_ALLOCATION_ATTEMPTS`, `STORE_TIMEOUT_MS`: as for the server

use snaplink::application::services::{LinkService, MAX_LINK_TTL_SECONDS};
use snaplink::config::{self, Config};
use snaplink::infrastructure::persistence::PgLinkStore;
use snaplink::server::connect_pool;
use snaplink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (scheme optional)
        url: String,

        /// Expire the link after this many seconds
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// Show the target and metadata of a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Delete expired links
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type PgLinkService = LinkService<PgLinkStore>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let service = connect(&config).await?;

    match cli.command {
        Commands::Shorten { url, ttl } => shorten(&service, &url, ttl).await?,
        Commands::Resolve { code } => resolve(&service, &code).await?,
        Commands::Sweep { yes } => sweep(&service, yes).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

/// Builds a link service over the configured PostgreSQL database.
async fn connect(config: &Config) -> Result<PgLinkService> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(config, database_url).await?;

    Ok(LinkService::new(
        Arc::new(PgLinkStore::new(Arc::new(pool))),
        Arc::new(RandomCodeGenerator::new(config.code_length)),
        config.link_service_settings(),
    ))
}

/// Creates a short link and prints it.
async fn shorten(service: &PgLinkService, url: &str, ttl: Option<i64>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let expires_at = match ttl {
        Some(secs) if secs <= 0 || secs.unsigned_abs() > MAX_LINK_TTL_SECONDS => anyhow::bail!(
            "--ttl must be between 1 and {} seconds",
            MAX_LINK_TTL_SECONDS
        ),
        Some(secs) => Some(
            chrono::Duration::try_seconds(secs)
                .and_then(|ttl| Utc::now().checked_add_signed(ttl))
                .context("--ttl is out of range")?,
        ),
        None => None,
    };

    let created = service
        .create_short_link(url, expires_at)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("  Code:      {}", created.short_code.bright_yellow().bold());
    println!("  Short URL: {}", created.short_url.cyan());
    println!("  Target:    {}", created.original_url.bright_white());
    match created.expires_at {
        Some(at) => println!(
            "  Expires:   {}",
            at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
        ),
        None => println!("  Expires:   {}", "never".bright_black()),
    }
    println!();
    println!("{}", "✅ Link created".green().bold());

    Ok(())
}

/// Prints the target of an active short link.
async fn resolve(service: &PgLinkService, code: &str) -> Result<()> {
    match service.resolve_short_link(code).await {
        Ok(link) => {
            println!("  Code:    {}", link.short_code.bright_yellow().bold());
            println!("  Target:  {}", link.original_url.bright_white());
            println!(
                "  Created: {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            match link.expires_at {
                Some(at) => println!(
                    "  Expires: {}",
                    at.format("%Y-%m-%d %H:%M").to_string().bright_black()
                ),
                None => println!("  Expires: {}", "never".bright_black()),
            }
            Ok(())
        }
        Err(e) if e.is_transient() => Err(anyhow::anyhow!("Store unavailable: {}", e)),
        Err(_) => {
            println!("{}", format!("❌ No active link for '{}'", code).red());
            Ok(())
        }
    }
}

/// Deletes expired links after confirmation.
async fn sweep(service: &PgLinkService, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Sweep Expired Links".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Permanently delete all expired links?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = service
        .sweep_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!(
        "{} {}",
        "✅ Removed".green().bold(),
        format!("{} expired link(s)", removed).bright_white()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, service: &PgLinkService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .check_store()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
