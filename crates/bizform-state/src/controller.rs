//! # Form Controller Contract
//!
//! Every form is a controller that owns one record and mutates it only
//! through events. Controllers are synchronous and never touch storage;
//! the save flow in [`crate::save`] projects their payload and hands it to
//! a gateway.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use bizform_core::FormKind;

use crate::notice::Notice;

/// Errors raised while applying an event or projecting a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The event names a field the form does not have.
    #[error("unknown field {field:?} on {form} form")]
    UnknownField { form: FormKind, field: String },

    /// A member index does not address an existing entry.
    #[error("member index {index} out of range (form has {len} members)")]
    MemberIndexOutOfRange { index: usize, len: usize },

    /// The record could not be converted to or from JSON.
    #[error("form serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A form's in-memory state machine.
pub trait FormController: Sized + Send + Sync {
    /// The persisted record.
    type Record: Serialize + DeserializeOwned + Default + Clone + Send;
    /// Edits accepted by [`FormController::apply`].
    type Event: DeserializeOwned + Send;

    /// Which form this controller drives.
    const KIND: FormKind;

    /// Rebuild a controller around a loaded record.
    fn from_record(record: Self::Record) -> Self;

    /// The current record.
    fn record(&self) -> &Self::Record;

    /// Apply one edit. A returned notice should be shown to the user.
    fn apply(&mut self, event: Self::Event) -> Result<Option<Notice>, FormError>;

    /// A controller around an empty record.
    fn new() -> Self {
        Self::from_record(Self::Record::default())
    }

    /// The JSON payload written on save.
    fn payload(&self) -> Result<serde_json::Value, FormError> {
        Ok(serde_json::to_value(self.record())?)
    }
}

/// Error for a `SetField` naming no known field.
pub(crate) fn unknown_field(form: FormKind, field: &str) -> FormError {
    FormError::UnknownField {
        form,
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = unknown_field(FormKind::Llc, "nickname");
        assert_eq!(err.to_string(), "unknown field \"nickname\" on llc form");
        let err = FormError::MemberIndexOutOfRange { index: 3, len: 1 };
        assert!(err.to_string().contains("out of range"));
    }
}
