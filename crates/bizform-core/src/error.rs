//! # Error Types — Structured Error Hierarchy
//!
//! The one error type shared across the Bizform Stack, derived with
//! `thiserror`. Each crate above this one defines its own error enum.
//!
//! ## Design
//!
//! - Lookups never fail. A missing ZIP prefix or jurisdiction profile is an
//!   `Option::None`, not an error.
//! - Parsing a closed enum or identifier from user input is the only place
//!   a [`ValidationError`] is produced, and it names the rejected value.

use thiserror::Error;

/// Rejected input for a closed domain type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not one of the 50 states, DC, or the five inhabited territories.
    #[error("unknown state code: {0:?}")]
    UnknownStateCode(String),

    /// Not one of the fixed business-type categories.
    #[error("unknown business type: {0:?}")]
    UnknownBusinessType(String),

    /// Not one of the four form kinds.
    #[error("unknown form kind: {0:?}")]
    UnknownFormKind(String),

    /// Identifier was not a UUID.
    #[error("invalid {kind} identifier: {value:?}")]
    InvalidIdentifier {
        /// Which identifier namespace was being parsed.
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },
}
