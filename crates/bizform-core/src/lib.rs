//! # bizform-core — Foundational Types for the Bizform Stack
//!
//! This crate is the leaf of the workspace. It defines the closed sets the
//! rest of the stack keys its reference tables and form records on. Every
//! other crate depends on `bizform-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums instead of string literals.** `StateCode`, `BusinessType`
//!    and `FormKind` are exhaustive enums. Reference tables are keyed on them,
//!    so an unknown key in the data is a compile error, not a runtime miss.
//!
//! 2. **Newtype wrappers for identifiers.** `UserId` and `GuestId` are
//!    distinct types. A guest session can never be persisted by accident.
//!
//! 3. **Parsing is the only fallible step.** Every enum has a `FromStr` that
//!    returns [`ValidationError`]; once a value exists it is valid.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bizform-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod business;
pub mod error;
pub mod form;
pub mod identity;
pub mod jurisdiction;

// Re-export primary types for ergonomic imports.
pub use business::{BusinessType, BUSINESS_TYPE_COUNT};
pub use error::ValidationError;
pub use form::FormKind;
pub use identity::{Caller, GuestId, UserId};
pub use jurisdiction::{StateCode, STATE_CODE_COUNT};
