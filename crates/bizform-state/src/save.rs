//! # Save and Load Flow
//!
//! Connects a controller's payload to a [`PersistenceGateway`]. Only
//! registered users can save; a guest gets a sign-up prompt instead of an
//! error. A backend failure is reported to the user and the in-memory
//! record is left as it was, so nothing typed is lost.

use serde::{Deserialize, Serialize};

use bizform_core::{Caller, FormKind};

use crate::controller::FormController;
use crate::gateway::PersistenceGateway;
use crate::notice::Notice;

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// The payload was written.
    Saved,
    /// The caller is a guest and must sign up first.
    AuthenticationRequired,
    /// The backend rejected the write.
    Failed { reason: String },
}

impl SaveOutcome {
    /// Short label, used as a metrics dimension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::AuthenticationRequired => "authentication_required",
            Self::Failed { .. } => "failed",
        }
    }

    /// The notice shown for this outcome on the given form.
    pub fn notice(&self, kind: FormKind) -> Notice {
        match (self, kind) {
            (Self::Saved, FormKind::Llc) => Notice::info(
                "LLC Application Saved",
                "Your LLC application has been saved successfully.",
            ),
            (Self::Saved, FormKind::Ein) => Notice::info(
                "Data Saved",
                "Your EIN application information has been saved.",
            ),
            (Self::Saved, FormKind::Licenses) => Notice::info(
                "Business Licenses Saved",
                "Your business license information has been saved successfully.",
            ),
            (Self::Saved, FormKind::Banking) => Notice::info(
                "Banking Options Saved",
                "Your banking options have been saved successfully.",
            ),

            (Self::AuthenticationRequired, FormKind::Llc) => Notice::error(
                "Authentication Required",
                "Please sign up to save your LLC application.",
            ),
            (Self::AuthenticationRequired, FormKind::Ein) => Notice::error(
                "Cannot Save",
                "Please create an account to save your progress.",
            ),
            (Self::AuthenticationRequired, FormKind::Licenses) => Notice::error(
                "Authentication Required",
                "Please sign up to save your business license information.",
            ),
            (Self::AuthenticationRequired, FormKind::Banking) => Notice::error(
                "Authentication Required",
                "Please sign up to save your banking options.",
            ),

            (Self::Failed { .. }, FormKind::Llc) => Notice::error(
                "Error",
                "Failed to save LLC application. Please try again.",
            ),
            (Self::Failed { reason }, FormKind::Ein) => Notice::error("Save Failed", reason.clone()),
            (Self::Failed { .. }, FormKind::Licenses) => Notice::error(
                "Error",
                "Failed to save business license information. Please try again.",
            ),
            (Self::Failed { .. }, FormKind::Banking) => Notice::error(
                "Error",
                "Failed to save banking options. Please try again.",
            ),
        }
    }
}

/// Persist `payload` for the caller.
pub async fn save_form<G: PersistenceGateway>(
    gateway: &G,
    kind: FormKind,
    caller: &Caller,
    payload: serde_json::Value,
) -> SaveOutcome {
    let Some(user) = caller.user() else {
        tracing::debug!(form = %kind, caller = %caller, "save refused for guest");
        return SaveOutcome::AuthenticationRequired;
    };

    match gateway.upsert(kind, user, payload).await {
        Ok(()) => {
            tracing::info!(form = %kind, user = %user, "form saved");
            SaveOutcome::Saved
        }
        Err(err) => {
            tracing::error!(form = %kind, user = %user, error = %err, "form save failed");
            SaveOutcome::Failed {
                reason: err.to_string(),
            }
        }
    }
}

/// Load the caller's latest saved record for controller `C`.
///
/// Guests never have saved records. Backend errors and undecodable
/// payloads are logged and treated as "nothing saved".
pub async fn load_form<C, G>(gateway: &G, caller: &Caller) -> Option<C::Record>
where
    C: FormController,
    G: PersistenceGateway,
{
    let user = caller.user()?;
    let kind = C::KIND;
    let stored = match gateway.load_latest(kind, user).await {
        Ok(stored) => stored?,
        Err(err) => {
            tracing::warn!(form = %kind, user = %user, error = %err, "form load failed");
            return None;
        }
    };

    match serde_json::from_value(stored.payload) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::warn!(form = %kind, user = %user, error = %err, "stored form could not be decoded");
            None
        }
    }
}

/// Load the caller's record into a controller, or start an empty one.
pub async fn restore_controller<C, G>(gateway: &G, caller: &Caller) -> C
where
    C: FormController,
    G: PersistenceGateway,
{
    match load_form::<C, G>(gateway, caller).await {
        Some(record) => C::from_record(record),
        None => C::new(),
    }
}
