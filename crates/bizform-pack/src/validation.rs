//! # Reference Table Validation
//!
//! Structural checks over the static tables. The tables are compiled in,
//! so a failure here is a data-entry bug; the CLI `validate` command and
//! the API readiness probe both run these checks.

use std::collections::BTreeMap;

use thiserror::Error;

use bizform_core::{BusinessType, StateCode};

use crate::licenses::{license_catalog, BUSINESS_LICENSE};
use crate::profile::jurisdiction_profiles;
use crate::zip::ZipPrefixTable;

/// A defect in the compiled-in reference data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDataError {
    /// A range bound falls outside 000..=999 or is inverted.
    #[error("invalid ZIP prefix range {lo:03}-{hi:03} for {state}")]
    InvalidPrefixRange { state: StateCode, lo: u16, hi: u16 },

    /// Two ranges claim the same prefix.
    #[error("ZIP prefix {prefix:03} mapped to both {first} and {second}")]
    OverlappingPrefix {
        prefix: u16,
        first: StateCode,
        second: StateCode,
    },

    /// A profile has no special requirements.
    #[error("jurisdiction profile for {0} lists no special requirements")]
    EmptyRequirements(StateCode),

    /// A profile has a blank filing fee.
    #[error("jurisdiction profile for {0} has no filing fee")]
    MissingFilingFee(StateCode),

    /// A business type has no license category.
    #[error("no license category for business type {0}")]
    MissingCategory(BusinessType),

    /// A license category omits the generic business license.
    #[error("license category {0} does not include the business license")]
    MissingBusinessLicense(BusinessType),
}

/// Run every check and collect all defects.
///
/// An empty vector means the tables are consistent.
pub fn validate_reference_tables() -> Vec<ReferenceDataError> {
    let mut errors = Vec::new();
    check_prefix_ranges(ZipPrefixTable::ranges(), &mut errors);
    check_profiles(&mut errors);
    check_license_catalog(&mut errors);
    errors
}

fn check_prefix_ranges(ranges: &[(StateCode, u16, u16)], errors: &mut Vec<ReferenceDataError>) {
    let mut seen: BTreeMap<u16, StateCode> = BTreeMap::new();
    for &(state, lo, hi) in ranges {
        if lo > hi || hi > 999 {
            errors.push(ReferenceDataError::InvalidPrefixRange { state, lo, hi });
            continue;
        }
        for prefix in lo..=hi {
            if let Some(&first) = seen.get(&prefix) {
                errors.push(ReferenceDataError::OverlappingPrefix {
                    prefix,
                    first,
                    second: state,
                });
            } else {
                seen.insert(prefix, state);
            }
        }
    }
}

fn check_profiles(errors: &mut Vec<ReferenceDataError>) {
    for (state, profile) in jurisdiction_profiles() {
        if profile.filing_fee.trim().is_empty() {
            errors.push(ReferenceDataError::MissingFilingFee(*state));
        }
        if profile.special_requirements.is_empty() {
            errors.push(ReferenceDataError::EmptyRequirements(*state));
        }
    }
}

fn check_license_catalog(errors: &mut Vec<ReferenceDataError>) {
    let catalog = license_catalog();
    for ty in BusinessType::all() {
        match catalog.get(ty) {
            None => errors.push(ReferenceDataError::MissingCategory(*ty)),
            Some(category) if !category.licenses.contains(&BUSINESS_LICENSE) => {
                errors.push(ReferenceDataError::MissingBusinessLicense(*ty))
            }
            Some(_) => {}
        }
    }
}
