//! Database initialization and table creation.

use backoff::future::retry;
use backoff::ExponentialBackoff;
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Connection settings for the item database.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub path: String,
    pub max_connections: u32,
    /// Total time budget for retrying the initial connection.
    pub connect_timeout: Duration,
}

impl DbSettings {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Initialize the SQLite database with schema and pragmas.
///
/// Connection failures that look transient (I/O, pool timeout, busy database)
/// are retried with exponential backoff until `connect_timeout` elapses.
pub async fn init_db(settings: &DbSettings) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(&settings.path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create database directory");
            }
        }
    }

    let url = format!("sqlite:{}?mode=rwc", settings.path);
    let backoff = ExponentialBackoff {
        initial_interval: Duration::from_millis(100),
        max_elapsed_time: Some(settings.connect_timeout),
        ..Default::default()
    };

    let pool = retry(backoff, || async {
        SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
            .connect(&url)
            .await
            .map_err(|e| {
                if is_transient(&e) {
                    warn!(path = %settings.path, error = %e, "Database connection failed, retrying");
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
    })
    .await?;

    run_migrations(&pool).await?;

    info!(path = %settings.path, "Database initialized successfully");
    Ok(pool)
}

fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => {
            let msg = db.message();
            msg.contains("locked") || msg.contains("busy")
        }
        _ => false,
    }
}

/// Create the `items` table if it does not exist yet.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    tracing::debug!(journal_mode = %journal_mode, "SQLite journal mode configured");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
