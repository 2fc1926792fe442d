//! # bizform-pack — Reference Tables
//!
//! Immutable lookup data the resolver consults. Everything here is data,
//! not logic:
//!
//! - **ZIP prefixes** (`zip.rs`): first-three-digit prefix → [`StateCode`].
//!   Coarse metro coverage for selected states, deliberately partial.
//!
//! - **Jurisdiction profiles** (`profile.rs`): per-state LLC filing facts
//!   (filing fee, publication, operating agreement, annual report,
//!   franchise tax, special requirements).
//!
//! - **License catalog** (`licenses.rs`): business type → typical licenses,
//!   plus the fixed state-registration items and permit steps appended by a
//!   license search.
//!
//! - **Bank catalog** (`banks.rs`): business checking products offered by
//!   the banking comparison.
//!
//! - **EIN options** (`ein.rs`): entity-type choices and the IRS link.
//!
//! ## Validation
//!
//! Tables are keyed on closed enums from `bizform-core`, so an unknown
//! state or business type in the data does not compile. The remaining
//! invariants (prefix shape, no duplicate prefixes, non-empty requirement
//! lists) are checked by [`validation::validate_reference_tables`].
//!
//! ## Crate Policy
//!
//! - Depends only on `bizform-core` internally.
//! - Tables are built once, on first access, and never mutated.
//!
//! [`StateCode`]: bizform_core::StateCode

pub mod banks;
pub mod ein;
pub mod licenses;
pub mod profile;
pub mod validation;
pub mod zip;

pub use banks::{bank_catalog, BankOption};
pub use ein::{ein_entity_types, IRS_EIN_URL};
pub use licenses::{
    license_catalog, license_portal_url, permit_requirements, state_registration_items,
    LicenseCategory, BUSINESS_LICENSE,
};
pub use profile::{jurisdiction_profiles, JurisdictionProfile};
pub use validation::{validate_reference_tables, ReferenceDataError};
pub use zip::{zip_prefix_table, ZipPrefixTable};
