//! Database migrations

use anyhow::Result;
use tracing::info;

use super::DbEngine;

/// Current migration version
const CURRENT_VERSION: i32 = 3;

/// Run database migrations
pub async fn run_migrations() -> Result<()> {
    let engine = DbEngine::get()?;
    let pool = engine.pool();

    let row: (i32,) = sqlx::query_as("SELECT version FROM dbmigration WHERE id = 1")
        .fetch_one(pool)
        .await?;
    let current_version = row.0;

    if current_version >= CURRENT_VERSION {
        info!("Database is up to date (version {})", current_version);
        return Ok(());
    }

    info!(
        "Running migrations from version {} to {}",
        current_version, CURRENT_VERSION
    );

    for version in (current_version + 1)..=CURRENT_VERSION {
        run_migration(version).await?;

        sqlx::query("UPDATE dbmigration SET version = ? WHERE id = 1")
            .bind(version)
            .execute(pool)
            .await?;

        info!("Applied migration {}", version);
    }

    Ok(())
}

async fn run_migration(version: i32) -> Result<()> {
    let engine = DbEngine::get()?;
    let pool = engine.pool();

    match version {
        1 => {
            // Initial migration - tables already created in setup_sqlite
        }
        2 => {
            // add settings column to users if missing
            if !has_column(pool, "users", "settings").await? {
                sqlx::query("ALTER TABLE users ADD COLUMN settings TEXT NOT NULL DEFAULT '{}'")
                    .execute(pool)
                    .await?;
            }
        }
        3 => {
            // add streaming link columns to albums if missing
            for column in ["spotify_link", "youtube_link", "apple_music_link"] {
                if !has_column(pool, "albums", column).await? {
                    sqlx::query(&format!("ALTER TABLE albums ADD COLUMN {} TEXT", column))
                        .execute(pool)
                        .await?;
                }
            }
        }
        _ => {
            tracing::warn!("Unknown migration version: {}", version);
        }
    }

    Ok(())
}

async fn has_column(pool: &sqlx::SqlitePool, table: &str, column: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name = ?",
        table
    ))
    .bind(column)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
