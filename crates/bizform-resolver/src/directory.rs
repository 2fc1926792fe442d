//! # Search Providers
//!
//! The license and bank searches are expressed as provider traits so a
//! deployment can back them with a live directory. The static providers
//! answer from the compiled-in reference tables with no delay.
//!
//! Providers are `Send + Sync` and object-safe, so the HTTP service holds
//! them as `Arc<dyn LicenseDirectory>` and tests substitute failing ones.

use serde::{Deserialize, Serialize};

use bizform_core::{BusinessType, StateCode};
use bizform_pack::{
    bank_catalog, license_catalog, license_portal_url, permit_requirements,
    state_registration_items, BankOption,
};

/// Errors from a search provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The backing directory could not be reached.
    #[error("search provider unavailable: {reason}")]
    Unavailable {
        /// Description of the outage.
        reason: String,
    },

    /// The provider rejected the query.
    #[error("search rejected: {reason}")]
    Rejected {
        /// Why the query was rejected.
        reason: String,
    },
}

/// Result of a license search for one business type in one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSearchResult {
    /// Category licenses followed by the state-registration items.
    pub required_licenses: Vec<String>,
    /// One link per entry of `required_licenses`.
    pub license_links: Vec<String>,
    /// Next steps after obtaining the licenses.
    pub permit_requirements: Vec<String>,
}

/// Source of license requirements for a business type and state.
pub trait LicenseDirectory: Send + Sync {
    /// Search the licenses a business of `business_type` needs in `state`.
    fn search(
        &self,
        business_type: BusinessType,
        state: StateCode,
    ) -> Result<LicenseSearchResult, ProviderError>;

    /// Human-readable name of this provider.
    fn provider_name(&self) -> &str;
}

/// Source of business banking products near a ZIP code.
pub trait BankDirectory: Send + Sync {
    /// Banks offering business checking around `zip`.
    fn search(&self, zip: &str) -> Result<Vec<BankOption>, ProviderError>;

    /// Human-readable name of this provider.
    fn provider_name(&self) -> &str;
}

/// License search over the static catalog.
///
/// The state only selects the portal link; the registration items and
/// permit steps are the same everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLicenseDirectory;

impl LicenseDirectory for StaticLicenseDirectory {
    fn search(
        &self,
        business_type: BusinessType,
        state: StateCode,
    ) -> Result<LicenseSearchResult, ProviderError> {
        let category = license_catalog()
            .get(&business_type)
            .ok_or_else(|| ProviderError::Rejected {
                reason: format!("no license category for {business_type}"),
            })?;

        let required_licenses: Vec<String> = category
            .licenses
            .iter()
            .chain(state_registration_items())
            .map(|l| l.to_string())
            .collect();
        let link = license_portal_url(state);
        let license_links = vec![link; required_licenses.len()];

        tracing::debug!(
            business_type = %business_type,
            state = %state,
            count = required_licenses.len(),
            "static license search"
        );

        Ok(LicenseSearchResult {
            required_licenses,
            license_links,
            permit_requirements: permit_requirements().iter().map(|s| s.to_string()).collect(),
        })
    }

    fn provider_name(&self) -> &str {
        "StaticLicenseDirectory"
    }
}

/// Maximum number of banks the static directory returns.
const STATIC_BANK_LIMIT: usize = 10;

/// Bank search over the static national catalog. The ZIP is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBankDirectory;

impl BankDirectory for StaticBankDirectory {
    fn search(&self, zip: &str) -> Result<Vec<BankOption>, ProviderError> {
        let banks: Vec<BankOption> = bank_catalog().iter().take(STATIC_BANK_LIMIT).cloned().collect();
        tracing::debug!(zip, count = banks.len(), "static bank search");
        Ok(banks)
    }

    fn provider_name(&self) -> &str {
        "StaticBankDirectory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn restaurant_in_california() {
        let result = StaticLicenseDirectory
            .search(BusinessType::Restaurant, StateCode::Ca)
            .unwrap();
        assert_eq!(result.required_licenses.len(), 8);
        assert_eq!(result.required_licenses[0], "Food Service License");
        assert_eq!(
            result.required_licenses.last().map(String::as_str),
            Some("Unemployment Insurance (if employees)")
        );
        assert_eq!(result.license_links.len(), result.required_licenses.len());
        assert!(result
            .license_links
            .iter()
            .all(|l| l == "https://ca.gov/business-licenses"));
        assert_eq!(result.permit_requirements.len(), 4);
    }

    #[test]
    fn registration_items_do_not_depend_on_state() {
        let tx = StaticLicenseDirectory
            .search(BusinessType::Other, StateCode::Tx)
            .unwrap();
        let pa = StaticLicenseDirectory
            .search(BusinessType::Other, StateCode::Pa)
            .unwrap();
        assert_eq!(tx.required_licenses, pa.required_licenses);
        assert_eq!(tx.permit_requirements, pa.permit_requirements);
        assert_ne!(tx.license_links, pa.license_links);
    }

    #[test]
    fn bank_search_returns_catalog() {
        let banks = StaticBankDirectory.search("10001").unwrap();
        assert_eq!(banks.len(), 10);
        assert_eq!(banks, StaticBankDirectory.search("99999").unwrap());
    }

    #[test]
    fn providers_are_object_safe() {
        let licenses: Arc<dyn LicenseDirectory> = Arc::new(StaticLicenseDirectory);
        let banks: Arc<dyn BankDirectory> = Arc::new(StaticBankDirectory);
        assert_eq!(licenses.provider_name(), "StaticLicenseDirectory");
        assert_eq!(banks.provider_name(), "StaticBankDirectory");
    }

    #[test]
    fn provider_error_display() {
        let err = ProviderError::Unavailable {
            reason: "timeout".into(),
        };
        assert_eq!(err.to_string(), "search provider unavailable: timeout");
    }
}
