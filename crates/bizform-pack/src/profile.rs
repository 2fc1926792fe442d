//! # Jurisdiction Profiles
//!
//! Per-state LLC formation facts: what the state charges, whether it
//! requires newspaper publication, an operating agreement, or an annual
//! report, how it taxes LLCs, and anything else a filer must do.
//!
//! Only states with notable formation rules carry a profile. Every other
//! jurisdiction has none, which callers treat as "nothing special to show".
//! Fees are display strings exactly as they should be rendered.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use bizform_core::StateCode;

/// State-specific LLC formation facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionProfile {
    /// The jurisdiction these facts belong to.
    pub state_code: StateCode,
    /// Articles/certificate filing fee, as displayed (e.g. `"$70"`).
    pub filing_fee: String,
    /// Notice of formation must be published in newspapers.
    pub publication_required: bool,
    /// A written operating agreement is mandatory.
    pub operating_agreement_required: bool,
    /// A periodic report (annual or biennial) must be filed.
    pub annual_report_required: bool,
    /// Franchise or entity-level tax summary.
    pub franchise_tax_info: String,
    /// Additional filer obligations, in the order they come due.
    pub special_requirements: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
fn profile(
    state_code: StateCode,
    filing_fee: &str,
    publication_required: bool,
    operating_agreement_required: bool,
    annual_report_required: bool,
    franchise_tax_info: &str,
    special_requirements: &[&str],
) -> JurisdictionProfile {
    JurisdictionProfile {
        state_code,
        filing_fee: filing_fee.to_string(),
        publication_required,
        operating_agreement_required,
        annual_report_required,
        franchise_tax_info: franchise_tax_info.to_string(),
        special_requirements: special_requirements.iter().map(|s| s.to_string()).collect(),
    }
}

fn build() -> BTreeMap<StateCode, JurisdictionProfile> {
    [
        profile(
            StateCode::Ca,
            "$70",
            false,
            true,
            true,
            "California imposes an $800 minimum annual franchise tax on every LLC, \
             due by the 15th day of the 4th month after formation.",
            &[
                "File a Statement of Information (Form LLC-12) within 90 days of formation",
                "Pay the $800 annual minimum franchise tax to the Franchise Tax Board",
                "Pay the additional LLC fee when total California income exceeds $250,000",
            ],
        ),
        profile(
            StateCode::Ny,
            "$200",
            true,
            true,
            true,
            "No franchise tax; an annual filing fee of $25 to $4,500 applies \
             based on New York source gross income.",
            &[
                "Publish notice of formation in two newspapers for six consecutive weeks within 120 days",
                "File a Certificate of Publication ($50) after publishing",
                "Adopt a written operating agreement within 90 days of filing",
                "File a biennial statement ($9)",
            ],
        ),
        profile(
            StateCode::Tx,
            "$300",
            false,
            false,
            true,
            "Texas franchise (margin) tax applies; no tax is due below the annual \
             revenue threshold, but a report is still required.",
            &[
                "File a Certificate of Formation (Form 205) with the Secretary of State",
                "File the annual franchise tax report and Public Information Report by May 15",
            ],
        ),
        profile(
            StateCode::Fl,
            "$125",
            false,
            false,
            true,
            "No state franchise tax for LLCs taxed as partnerships or disregarded entities.",
            &[
                "File the annual report between January 1 and May 1 ($138.75)",
                "Expect a $400 late fee on annual reports filed after May 1",
            ],
        ),
        profile(
            StateCode::De,
            "$110",
            false,
            false,
            false,
            "Delaware LLCs pay a flat $300 annual tax due by June 1.",
            &[
                "Maintain a registered agent with a Delaware address",
                "Pay the $300 annual LLC tax by June 1",
            ],
        ),
        profile(
            StateCode::Nv,
            "$425",
            false,
            false,
            true,
            "No state income or franchise tax; the Nevada State Business License \
             costs $200 per year.",
            &[
                "File the Initial List of Managers or Members at formation",
                "Obtain and renew the Nevada State Business License ($200 annually)",
            ],
        ),
        profile(
            StateCode::Wy,
            "$100",
            false,
            false,
            true,
            "No state income tax; the annual report license tax is $60 minimum, \
             based on assets located in Wyoming.",
            &[
                "File the annual report by the first day of the anniversary month",
                "Maintain a registered agent in Wyoming",
            ],
        ),
    ]
    .into_iter()
    .map(|p| (p.state_code, p))
    .collect()
}

/// Profiles keyed by state. States without notable rules are absent.
pub fn jurisdiction_profiles() -> &'static BTreeMap<StateCode, JurisdictionProfile> {
    static PROFILES: OnceLock<BTreeMap<StateCode, JurisdictionProfile>> = OnceLock::new();
    PROFILES.get_or_init(build)
}
