//! # Pure Lookups
//!
//! Table lookups over `bizform-pack`. Nothing here allocates beyond the
//! returned checklist, and nothing can fail.

use bizform_core::{BusinessType, StateCode};
use bizform_pack::{jurisdiction_profiles, license_catalog, zip_prefix_table, JurisdictionProfile};

/// Number of leading ZIP characters used for state detection.
pub const ZIP_PREFIX_LEN: usize = 3;

/// Detect the state a ZIP code belongs to.
///
/// Only the first three characters are inspected. Input shorter than that,
/// or whose prefix is not in the table, yields `None`. The remaining
/// characters are not validated, so `"941xx"` still resolves to California.
pub fn resolve_state_from_zip(zip: &str) -> Option<StateCode> {
    let prefix = zip.get(..ZIP_PREFIX_LEN)?;
    let state = zip_prefix_table().get(prefix);
    tracing::trace!(prefix, state = ?state, "zip prefix lookup");
    state
}

/// LLC formation facts for `state`, when the state has notable rules.
pub fn resolve_jurisdiction_profile(state: StateCode) -> Option<&'static JurisdictionProfile> {
    jurisdiction_profiles().get(&state)
}

/// Detected state and its profile for a ZIP code.
///
/// The profile is `None` both when no state is detected and when the
/// detected state has no profile.
pub fn resolve_profile_for_zip(
    zip: &str,
) -> (Option<StateCode>, Option<&'static JurisdictionProfile>) {
    let state = resolve_state_from_zip(zip);
    (state, state.and_then(resolve_jurisdiction_profile))
}

/// Typical licenses for a business-type key.
///
/// Unknown keys fall back to the `other` category.
pub fn resolve_license_checklist(key: &str) -> Vec<String> {
    let ty = BusinessType::from_key_or_other(key);
    license_catalog()
        .get(&ty)
        .map(|category| category.licenses.iter().map(|l| l.to_string()).collect())
        .unwrap_or_default()
}
