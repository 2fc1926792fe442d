//! # License Lookup Controller
//!
//! Picking a business type fills in its typical license checklist right
//! away. A search against a [`LicenseDirectory`] then expands the checklist
//! with the state registration items, portal links, and next steps.

use serde::{Deserialize, Serialize};

use bizform_core::{BusinessType, FormKind, StateCode};
use bizform_resolver::{resolve_license_checklist, LicenseDirectory};

use crate::controller::{unknown_field, FormController, FormError};
use crate::notice::Notice;

/// The license lookup worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseLookup {
    pub business_type: Option<BusinessType>,
    pub business_state: Option<StateCode>,
    pub business_zip: String,
    pub required_licenses: Vec<String>,
    /// Parallel to `required_licenses`; empty until a search runs.
    pub license_links: Vec<String>,
    pub permit_requirements: Vec<String>,
}

/// Edits to the license lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LicenseEvent {
    /// Overwrite `business_state` or `business_zip`. `business_type` is
    /// routed to [`LicenseEvent::BusinessTypeChanged`].
    SetField { field: String, value: String },
    /// A business type was picked; unknown keys mean `other`.
    BusinessTypeChanged { key: String },
}

/// State machine for the license lookup.
#[derive(Debug, Clone, Default)]
pub struct LicenseController {
    record: LicenseLookup,
}

impl LicenseController {
    fn business_type_changed(&mut self, key: &str) {
        let licenses = resolve_license_checklist(key);
        self.record.business_type = Some(BusinessType::from_key_or_other(key));
        self.record.license_links = vec![String::new(); licenses.len()];
        self.record.required_licenses = licenses;
        self.record.permit_requirements.clear();
    }

    /// Run a license search for the selected type and state.
    ///
    /// Without both, returns a warning and changes nothing. A provider
    /// failure returns an error notice and also changes nothing.
    pub fn search(&mut self, directory: &dyn LicenseDirectory) -> Notice {
        let (Some(business_type), Some(state)) =
            (self.record.business_type, self.record.business_state)
        else {
            return Notice::warning(
                "Missing Information",
                "Please select your business type and state first.",
            );
        };

        match directory.search(business_type, state) {
            Ok(result) => {
                let count = result.required_licenses.len();
                self.record.required_licenses = result.required_licenses;
                self.record.license_links = result.license_links;
                self.record.permit_requirements = result.permit_requirements;
                Notice::info(
                    "Licenses Found",
                    format!("Found {count} required licenses and permits."),
                )
            }
            Err(err) => {
                tracing::warn!(
                    provider = directory.provider_name(),
                    error = %err,
                    "license search failed"
                );
                Notice::error(
                    "Search Failed",
                    "Could not retrieve license requirements. Please try again.",
                )
            }
        }
    }
}

impl FormController for LicenseController {
    type Record = LicenseLookup;
    type Event = LicenseEvent;

    const KIND: FormKind = FormKind::Licenses;

    fn from_record(record: LicenseLookup) -> Self {
        Self { record }
    }

    fn record(&self) -> &LicenseLookup {
        &self.record
    }

    fn apply(&mut self, event: LicenseEvent) -> Result<Option<Notice>, FormError> {
        match event {
            LicenseEvent::SetField { field, value } => match field.as_str() {
                "business_type" => self.business_type_changed(&value),
                "business_state" => self.record.business_state = value.parse().ok(),
                "business_zip" => self.record.business_zip = value,
                other => return Err(unknown_field(FormKind::Licenses, other)),
            },
            LicenseEvent::BusinessTypeChanged { key } => self.business_type_changed(&key),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizform_resolver::{LicenseSearchResult, ProviderError, StaticLicenseDirectory};

    struct DownDirectory;

    impl LicenseDirectory for DownDirectory {
        fn search(
            &self,
            _business_type: BusinessType,
            _state: StateCode,
        ) -> Result<LicenseSearchResult, ProviderError> {
            Err(ProviderError::Unavailable {
                reason: "connection refused".into(),
            })
        }

        fn provider_name(&self) -> &str {
            "DownDirectory"
        }
    }

    fn restaurant_in(state: &str) -> LicenseController {
        let mut c = LicenseController::new();
        c.apply(LicenseEvent::BusinessTypeChanged { key: "restaurant".into() })
            .unwrap();
        c.apply(LicenseEvent::SetField {
            field: "business_state".into(),
            value: state.into(),
        })
        .unwrap();
        c
    }

    #[test]
    fn business_type_fills_checklist() {
        let c = restaurant_in("CA");
        let r = c.record();
        assert_eq!(r.business_type, Some(BusinessType::Restaurant));
        assert_eq!(r.required_licenses.len(), 4);
        assert_eq!(r.license_links, vec![String::new(); 4]);
        assert!(r.permit_requirements.is_empty());
    }

    #[test]
    fn unknown_type_is_other() {
        let mut c = LicenseController::new();
        c.apply(LicenseEvent::SetField {
            field: "business_type".into(),
            value: "alchemy".into(),
        })
        .unwrap();
        assert_eq!(c.record().business_type, Some(BusinessType::Other));
        assert_eq!(c.record().required_licenses, vec!["Business License"]);
    }

    #[test]
    fn search_requires_type_and_state() {
        let mut c = LicenseController::new();
        c.apply(LicenseEvent::BusinessTypeChanged { key: "retail".into() })
            .unwrap();
        let before = c.record().clone();
        let notice = c.search(&StaticLicenseDirectory);
        assert_eq!(notice.title, "Missing Information");
        assert_eq!(c.record(), &before);
    }

    #[test]
    fn search_expands_checklist() {
        let mut c = restaurant_in("tx");
        let notice = c.search(&StaticLicenseDirectory);
        assert_eq!(notice.title, "Licenses Found");
        assert_eq!(notice.message, "Found 8 required licenses and permits.");
        let r = c.record();
        assert_eq!(r.required_licenses.len(), 8);
        assert_eq!(r.license_links[7], "https://tx.gov/business-licenses");
        assert_eq!(r.permit_requirements.len(), 4);
    }

    #[test]
    fn changing_type_after_search_resets_permits() {
        let mut c = restaurant_in("NY");
        c.search(&StaticLicenseDirectory);
        c.apply(LicenseEvent::BusinessTypeChanged { key: "technology".into() })
            .unwrap();
        assert_eq!(c.record().required_licenses.len(), 2);
        assert!(c.record().permit_requirements.is_empty());
    }

    #[test]
    fn provider_failure_leaves_record_unchanged() {
        let mut c = restaurant_in("CA");
        let before = c.record().clone();
        let notice = c.search(&DownDirectory);
        assert!(notice.is_error());
        assert_eq!(c.record(), &before);
    }
}
