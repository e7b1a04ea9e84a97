//! Connection setup and schema bootstrap.
//!
//! Constraint names follow `pk_<table>`, `ck_<table>_<name>`, `fk_<table>_<column>_<referred>`
//! and `ix_<table>_<column>`. Foreign keys carry no `ON DELETE` action: dependent signups are
//! removed explicitly by the service layer inside the parent's delete transaction.

use crate::config::AppConfig;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits for another connection's write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// DDL in dependency order.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS campers (
        id INTEGER NOT NULL,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        CONSTRAINT pk_campers PRIMARY KEY (id),
        CONSTRAINT ck_campers_name CHECK (length(name) > 0),
        CONSTRAINT ck_campers_age CHECK (age BETWEEN 8 AND 18)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activities (
        id INTEGER NOT NULL,
        name TEXT,
        difficulty INTEGER,
        CONSTRAINT pk_activities PRIMARY KEY (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS signups (
        id INTEGER NOT NULL,
        time INTEGER NOT NULL,
        camper_id INTEGER NOT NULL,
        activity_id INTEGER NOT NULL,
        CONSTRAINT pk_signups PRIMARY KEY (id),
        CONSTRAINT ck_signups_time CHECK (time BETWEEN 0 AND 23),
        CONSTRAINT fk_signups_camper_id_campers FOREIGN KEY (camper_id) REFERENCES campers (id),
        CONSTRAINT fk_signups_activity_id_activities FOREIGN KEY (activity_id) REFERENCES activities (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_signups_camper_id ON signups (camper_id)",
    "CREATE INDEX IF NOT EXISTS ix_signups_activity_id ON signups (activity_id)",
];

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open a pool for `config.database_url`, creating the database file if missing.
/// In-memory databases are pinned to one connection that never expires, since each
/// SQLite connection would otherwise see its own empty database. File databases run
/// in WAL mode so readers are not blocked by the single writer.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let (options, pool_options) = if is_in_memory(&config.database_url) {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
        (options, pool_options)
    } else {
        (
            options.journal_mode(SqliteJournalMode::Wal),
            SqlitePoolOptions::new().max_connections(config.max_connections),
        )
    };
    let pool = pool_options.connect_with(options).await?;
    tracing::info!(url = %config.database_url, "connected to store");
    Ok(pool)
}

/// Start a transaction that holds the write lock from its first statement.
///
/// A deferred transaction that reads before writing must upgrade its lock later, and
/// SQLite answers a contended upgrade with SQLITE_BUSY instead of waiting. Taking the
/// lock up front makes concurrent writers queue for up to `BUSY_TIMEOUT`.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    tracing::debug!(sql = "BEGIN IMMEDIATE", "query");
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Create tables and indexes if they do not exist.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("schema ready");
    Ok(())
}

/// Connect and bootstrap the schema.
pub async fn open(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let pool = connect(config).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

const DEMO_ACTIVITIES: &[(&str, i64)] = &[
    ("Archery", 2),
    ("Swimming", 3),
    ("Hiking by the Stream", 1),
    ("Rock Climbing", 4),
    ("Canoeing", 3),
];

const DEMO_CAMPERS: &[(&str, i64)] = &[
    ("Caitlin", 8),
    ("Lizzie", 9),
    ("Nicholas", 12),
    ("Ashley", 17),
];

/// Insert demo activities and campers when no campers exist. Returns whether rows were added.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, AppError> {
    let mut tx = begin_write(pool).await?;
    let (campers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM campers")
        .fetch_one(&mut *tx)
        .await?;
    if campers > 0 {
        return Ok(false);
    }
    for (name, difficulty) in DEMO_ACTIVITIES {
        sqlx::query("INSERT INTO activities (name, difficulty) VALUES (?, ?)")
            .bind(*name)
            .bind(*difficulty)
            .execute(&mut *tx)
            .await?;
    }
    for (name, age) in DEMO_CAMPERS {
        sqlx::query("INSERT INTO campers (name, age) VALUES (?, ?)")
            .bind(*name)
            .bind(*age)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    tracing::info!(
        activities = DEMO_ACTIVITIES.len(),
        campers = DEMO_CAMPERS.len(),
        "seeded demo data"
    );
    Ok(true)
}
