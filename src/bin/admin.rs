//! CLI administration tool for the shortener service.
//!
//! Runs the same engine as the HTTP server directly against PostgreSQL,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (asks for confirmation)
//! cargo run --bin admin -- shorten https://example.com/a --alias mylink
//!
//! # Resolve a code without recording a redirect
//! cargo run --bin admin -- resolve mylink
//!
//! # Redirect statistics
//! cargo run --bin admin -- stats mylink
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db info
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL` or the `DB_*` components, plus the engine settings
//! (`MAX_ALLOCATION_ATTEMPTS`, `REDIRECT_LOG_POLICY`) and `BASE_URL`.

use shortener_service::config::{Config, StorageBackend};
use shortener_service::domain::clock::SystemClock;
use shortener_service::infrastructure::persistence::{MIGRATOR, PgUrlRepository};
use shortener_service::prelude::*;
use shortener_service::server::connect_pool;
use shortener_service::utils::code_generator::{RandomCodeGenerator, validate_custom_alias};
use shortener_service::utils::url_normalizer::normalize_url;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type AdminEngine = UrlService<PgUrlRepository, RandomCodeGenerator>;

/// CLI tool for managing the shortener service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Shorten {
        /// The URL to shorten
        url: String,

        /// Custom alias instead of a generated code
        #[arg(short, long)]
        alias: Option<String>,

        /// Expire the link after this many hours
        #[arg(short, long)]
        expires_in_hours: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the original URL behind a code
    Resolve { code: String },

    /// Show redirect statistics for a code
    Stats { code: String },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin works on the postgres storage backend only");
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Shorten {
            url,
            alias,
            expires_in_hours,
            yes,
        } => {
            let engine = build_engine(&config, &pool);
            shorten(&engine, &config, url, alias, expires_in_hours, yes).await?
        }
        Commands::Resolve { code } => resolve(&build_engine(&config, &pool), &code).await?,
        Commands::Stats { code } => stats(&build_engine(&config, &pool), &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn build_engine(config: &Config, pool: &PgPool) -> AdminEngine {
    UrlService::new(
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomCodeGenerator),
        Arc::new(SystemClock),
        config.engine_options(),
    )
}

/// Creates a short URL after showing what will be stored.
async fn shorten(
    engine: &AdminEngine,
    config: &Config,
    url: String,
    alias: Option<String>,
    expires_in_hours: Option<i64>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let long_url = normalize_url(&url).context("Invalid URL")?;

    let alias = alias.filter(|a| !a.is_empty());
    if let Some(ref alias) = alias {
        validate_custom_alias(alias).map_err(|e| anyhow::anyhow!("Invalid alias: {e}"))?;
    }

    let expires_at = expires_in_hours
        .map(|hours| expiry_after_hours(Utc::now(), hours))
        .transpose()?;

    println!("  URL:     {}", long_url.cyan());
    println!(
        "  Alias:   {}",
        alias.as_deref().unwrap_or("(generated)").cyan()
    );
    match expires_at {
        Some(at) => println!("  Expires: {}", at.format("%Y-%m-%d %H:%M UTC").to_string().cyan()),
        None => println!("  Expires: {}", "never".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let code = engine
        .create_short_url(long_url, alias, expires_at)
        .await
        .context("Failed to create short URL")?;

    println!();
    println!("{}", "✅ Short URL created!".green().bold());
    println!(
        "  {}/{}",
        config.base_url.trim_end_matches('/').bright_yellow(),
        code.bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Computes `now + hours`, rejecting non-positive or out-of-range values.
fn expiry_after_hours(now: DateTime<Utc>, hours: i64) -> Result<DateTime<Utc>> {
    anyhow::ensure!(hours > 0, "--expires-in-hours must be positive");

    Duration::try_hours(hours)
        .and_then(|delta| now.checked_add_signed(delta))
        .with_context(|| format!("--expires-in-hours {hours} is out of range"))
}

async fn resolve(engine: &AdminEngine, code: &str) -> Result<()> {
    match engine.get_original_url(code).await {
        Ok(url) => println!("  {} → {}", code.cyan(), url.bright_white()),
        Err(ShortenerError::Expired(_)) => println!("  {} {}", code.cyan(), "EXPIRED".red()),
        Err(ShortenerError::NotFound(_)) => println!("  {} {}", code.cyan(), "NOT FOUND".yellow()),
        Err(e) => return Err(e).context("Failed to resolve code"),
    }

    Ok(())
}

/// Prints redirect statistics for one code.
async fn stats(engine: &AdminEngine, code: &str) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = engine
        .get_stats(code)
        .await
        .with_context(|| format!("Failed to load stats for '{code}'"))?;

    println!("  Code:          {}", code.cyan());
    println!(
        "  Created:       {}",
        stats.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!(
        "  Redirects:     {}",
        stats.redirect_count.to_string().bright_green().bold()
    );
    println!(
        "  Last access:   {}",
        stats
            .last_accessed
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string())
            .bright_black()
    );

    if stats.referrers.is_empty() {
        println!("  Referrers:     {}", "none".bright_black());
    } else {
        println!("  Referrers:");
        for referrer in &stats.referrers {
            println!("    - {}", referrer.cyan());
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;
            let redirects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM redirect_logs")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  URLs:       {}", urls.to_string().bright_green().bold());
            println!("  Redirects:  {}", redirects.to_string().bright_green().bold());
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
