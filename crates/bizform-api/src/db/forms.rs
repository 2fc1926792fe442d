//! Saved-form persistence operations.
//!
//! One table per form kind (see [`FormKind::table_name`]), each holding
//! `(id, user_id, payload, created_at, updated_at)`. Reads take the row
//! with the latest `created_at` for the user; writes update that row or
//! insert the first one. Table names come from the closed `FormKind` enum,
//! never from request input.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bizform_core::{FormKind, UserId};
use bizform_state::{GatewayError, PersistenceGateway, StoredForm};

/// Fetch the latest saved row for a user.
pub async fn get_latest(
    pool: &PgPool,
    kind: FormKind,
    user: &UserId,
) -> Result<Option<StoredForm>, sqlx::Error> {
    let sql = format!(
        "SELECT id, user_id, payload, created_at, updated_at
         FROM {} WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        kind.table_name()
    );
    let row = sqlx::query_as::<_, FormRow>(&sql)
        .bind(user.as_uuid())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into_stored(kind)))
}

/// Overwrite the latest row for a user, or insert the first one.
///
/// Returns `true` when a new row was inserted.
pub async fn upsert_latest(
    pool: &PgPool,
    kind: FormKind,
    user: &UserId,
    payload: &serde_json::Value,
) -> Result<bool, sqlx::Error> {
    let table = kind.table_name();
    let now = Utc::now();

    let update = format!(
        "UPDATE {table} SET payload = $1, updated_at = $2
         WHERE id = (SELECT id FROM {table} WHERE user_id = $3 ORDER BY created_at DESC LIMIT 1)"
    );
    let result = sqlx::query(&update)
        .bind(payload)
        .bind(now)
        .bind(user.as_uuid())
        .execute(pool)
        .await?;
    if result.rows_affected() > 0 {
        return Ok(false);
    }

    let insert = format!(
        "INSERT INTO {table} (id, user_id, payload, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5)"
    );
    sqlx::query(&insert)
        .bind(Uuid::new_v4())
        .bind(user.as_uuid())
        .bind(payload)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(true)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct FormRow {
    #[allow(dead_code)]
    id: Uuid,
    user_id: Uuid,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FormRow {
    fn into_stored(self, kind: FormKind) -> StoredForm {
        StoredForm {
            user_id: UserId::from_uuid(self.user_id),
            kind,
            payload: self.payload,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// [`PersistenceGateway`] over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn backend(err: sqlx::Error) -> GatewayError {
    GatewayError::Backend(err.to_string())
}

impl PersistenceGateway for PgGateway {
    async fn upsert(
        &self,
        kind: FormKind,
        user: &UserId,
        payload: serde_json::Value,
    ) -> Result<(), GatewayError> {
        let inserted = upsert_latest(&self.pool, kind, user, &payload)
            .await
            .map_err(backend)?;
        tracing::debug!(form = %kind, user = %user, inserted, "form row written");
        Ok(())
    }

    async fn load_latest(
        &self,
        kind: FormKind,
        user: &UserId,
    ) -> Result<Option<StoredForm>, GatewayError> {
        get_latest(&self.pool, kind, user).await.map_err(backend)
    }
}
