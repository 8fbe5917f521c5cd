use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://savings.db?mode=rwc";

pub async fn get_db_pool() -> anyhow::Result<Pool<Sqlite>> {
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
        log::warn!("DATABASE_URL not set, falling back to {DEFAULT_DATABASE_URL}");
        DEFAULT_DATABASE_URL.to_string()
    });

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .with_context(|| format!("failed to connect to database at {db_url}"))
}
