//! # Persistence Gateway
//!
//! The storage seam for saved forms. One record per user and form is read
//! back (the latest); a save overwrites it or creates the first one. There
//! is no retry, no queue, and no conflict detection: the last writer wins.
//!
//! [`MemoryGateway`] is the in-process backend used when no database is
//! configured and in tests. The Postgres backend lives in `bizform-api`.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bizform_core::{FormKind, UserId};

/// A saved form as stored by a gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredForm {
    pub user_id: UserId,
    pub kind: FormKind,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors from a persistence backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend failed or could not be reached.
    #[error("persistence backend error: {0}")]
    Backend(String),
}

/// Async storage for form payloads.
///
/// Implementations must be `Send + Sync` so one gateway can be shared by
/// every request handler.
pub trait PersistenceGateway: Send + Sync {
    /// Overwrite the latest record for `(kind, user)`, or create it.
    fn upsert(
        &self,
        kind: FormKind,
        user: &UserId,
        payload: serde_json::Value,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// The latest record for `(kind, user)`, if any was ever saved.
    fn load_latest(
        &self,
        kind: FormKind,
        user: &UserId,
    ) -> impl Future<Output = Result<Option<StoredForm>, GatewayError>> + Send;
}

/// In-memory gateway backed by a `DashMap`.
///
/// Cheaply cloneable; all clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    forms: Arc<DashMap<(FormKind, UserId), StoredForm>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all users and forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl PersistenceGateway for MemoryGateway {
    async fn upsert(
        &self,
        kind: FormKind,
        user: &UserId,
        payload: serde_json::Value,
    ) -> Result<(), GatewayError> {
        let now = Utc::now();
        self.forms
            .entry((kind, *user))
            .and_modify(|stored| {
                stored.payload = payload.clone();
                stored.updated_at = now;
            })
            .or_insert_with(|| StoredForm {
                user_id: *user,
                kind,
                payload: payload.clone(),
                created_at: now,
                updated_at: now,
            });
        Ok(())
    }

    async fn load_latest(
        &self,
        kind: FormKind,
        user: &UserId,
    ) -> Result<Option<StoredForm>, GatewayError> {
        Ok(self.forms.get(&(kind, *user)).map(|entry| entry.value().clone()))
    }
}
