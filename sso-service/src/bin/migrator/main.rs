use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sso_service::config::Config;
use sso_service::outbound::repositories::sqlite::MIGRATOR;
use sso_service::outbound::repositories::SqliteStorage;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "sso-migrator", about = "Apply or revert the sign-on database schema")]
struct Cli {
    /// Database URL; defaults to `database.url` from the configuration
    #[arg(long)]
    database_url: Option<String>,

    /// Path to a config file layered over config/default.toml
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Revert every applied migration instead of applying pending ones
    #[arg(long)]
    down: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sso_migrator=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => {
            Config::load(cli.config.as_deref())
                .context("database url not given and configuration could not be loaded")?
                .database
                .url
        }
    };

    let storage = SqliteStorage::connect(&database_url)
        .await
        .with_context(|| format!("failed to open database {}", database_url))?;

    let applied_before = applied_versions(&storage).await?;

    if cli.down {
        MIGRATOR.undo(storage.pool(), 0).await?;
    } else {
        MIGRATOR.run(storage.pool()).await?;
    }

    let applied_after = applied_versions(&storage).await?;

    if applied_before == applied_after {
        tracing::info!(database_url = %database_url, "no migrations to apply");
    } else {
        tracing::info!(
            database_url = %database_url,
            direction = if cli.down { "down" } else { "up" },
            before = applied_before,
            after = applied_after,
            "applied migrations"
        );
    }

    storage.pool().close().await;

    Ok(())
}

/// Number of migrations recorded as applied (zero on a fresh database).
async fn applied_versions(storage: &SqliteStorage) -> Result<i64, anyhow::Error> {
    let table_exists: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(storage.pool())
    .await?;

    if table_exists.0 == 0 {
        return Ok(0);
    }

    let applied: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(storage.pool())
        .await?;

    Ok(applied.0)
}
