//! # Database Persistence Layer
//!
//! Postgres persistence for saved forms via SQLx.
//!
//! The database is **optional**. When a database URL is configured, saved
//! forms go to the four form tables. When absent, the API keeps saved forms
//! in memory (suitable for development and testing); they do not survive a
//! restart.

pub mod forms;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub use forms::PgGateway;

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no URL is configured (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(url) = database_url else {
        tracing::warn!(
            "DATABASE_URL not set; running in-memory only mode. \
             Saved forms will not survive restarts."
        );
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
