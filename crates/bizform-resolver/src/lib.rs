//! # bizform-resolver — Requirement Resolution
//!
//! Turns raw form input into the facts the forms render conditionally:
//!
//! - [`resolve_state_from_zip`]: ZIP → state, by three-digit prefix.
//! - [`resolve_jurisdiction_profile`]: state → LLC formation facts.
//! - [`resolve_profile_for_zip`]: the two composed.
//! - [`resolve_license_checklist`]: business-type key → typical licenses.
//!
//! These functions are pure and infallible. "No match" is `None`, never an
//! error, and callers simply skip the dependent sections.
//!
//! Searches that could be served remotely go through the provider traits in
//! [`directory`]: [`LicenseDirectory`] and [`BankDirectory`]. The shipped
//! implementations answer from the reference tables.

pub mod directory;
pub mod lookup;

pub use directory::{
    BankDirectory, LicenseDirectory, LicenseSearchResult, ProviderError, StaticBankDirectory,
    StaticLicenseDirectory,
};
pub use lookup::{
    resolve_jurisdiction_profile, resolve_license_checklist, resolve_profile_for_zip,
    resolve_state_from_zip, ZIP_PREFIX_LEN,
};
