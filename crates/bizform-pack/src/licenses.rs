//! # License Catalog
//!
//! Typical licenses per business category, and the fixed items a license
//! search appends for any state.
//!
//! The state-registration items and permit steps are the same text for
//! every state. The search takes a state only to build portal links; it
//! does not consult per-state license rules.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use bizform_core::{BusinessType, StateCode};

/// The generic license every category includes.
pub const BUSINESS_LICENSE: &str = "Business License";

/// A business category with its display label and license checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseCategory {
    /// Category key.
    pub business_type: BusinessType,
    /// Picker label.
    pub label: &'static str,
    /// Licenses typically required, in display order.
    pub licenses: Vec<&'static str>,
}

fn build() -> BTreeMap<BusinessType, LicenseCategory> {
    BusinessType::all()
        .iter()
        .map(|&ty| {
            let licenses: &[&'static str] = match ty {
                BusinessType::Restaurant => &[
                    "Food Service License",
                    "Liquor License (if applicable)",
                    BUSINESS_LICENSE,
                    "Health Department Permit",
                ],
                BusinessType::Retail => &[BUSINESS_LICENSE, "Sales Tax Permit", "Signage Permit"],
                BusinessType::Consulting => {
                    &[BUSINESS_LICENSE, "Professional License (if applicable)"]
                }
                BusinessType::Construction => {
                    &["Contractor License", BUSINESS_LICENSE, "Building Permits"]
                }
                BusinessType::Healthcare => &[
                    "Professional License",
                    BUSINESS_LICENSE,
                    "Health Department Permit",
                ],
                BusinessType::Automotive => &[
                    BUSINESS_LICENSE,
                    "Automotive Service License",
                    "Environmental Permits",
                ],
                BusinessType::Beauty => &[
                    "Cosmetology License",
                    BUSINESS_LICENSE,
                    "Health Department Permit",
                ],
                BusinessType::Childcare => &[
                    "Childcare License",
                    BUSINESS_LICENSE,
                    "Background Check Clearance",
                ],
                BusinessType::Fitness => &[
                    BUSINESS_LICENSE,
                    "Health Department Permit",
                    "Fire Department Clearance",
                ],
                BusinessType::Transportation => &[
                    BUSINESS_LICENSE,
                    "Commercial Driver License",
                    "DOT Registration",
                ],
                BusinessType::Manufacturing => &[
                    BUSINESS_LICENSE,
                    "Environmental Permits",
                    "Safety Compliance",
                ],
                BusinessType::Technology => &[BUSINESS_LICENSE, "Data Privacy Compliance"],
                BusinessType::Other => &[BUSINESS_LICENSE],
            };
            (
                ty,
                LicenseCategory {
                    business_type: ty,
                    label: ty.label(),
                    licenses: licenses.to_vec(),
                },
            )
        })
        .collect()
}

/// Every category, keyed by business type.
pub fn license_catalog() -> &'static BTreeMap<BusinessType, LicenseCategory> {
    static CATALOG: OnceLock<BTreeMap<BusinessType, LicenseCategory>> = OnceLock::new();
    CATALOG.get_or_init(build)
}

/// Registration items appended to every license search result.
pub fn state_registration_items() -> &'static [&'static str] {
    &[
        "State Business Registration",
        "State Tax Registration",
        "Workers' Compensation (if employees)",
        "Unemployment Insurance (if employees)",
    ]
}

/// Next steps listed after a license search.
pub fn permit_requirements() -> &'static [&'static str] {
    &[
        "Complete business registration with state",
        "Obtain federal EIN if needed",
        "Register for state and local taxes",
        "Check zoning compliance for business location",
    ]
}

/// Landing page used as the link for every searched license.
pub fn license_portal_url(state: StateCode) -> String {
    format!("https://{}.gov/business-licenses", state.to_lowercase())
}
