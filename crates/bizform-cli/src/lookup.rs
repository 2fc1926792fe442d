//! # Lookup Subcommands
//!
//! `zip`, `profile`, and `licenses`: the resolver answers, printed.
//!
//! A lookup that finds nothing is not an error; it prints an empty result
//! and exits with code 2 so scripts can tell the difference.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use bizform_core::{BusinessType, StateCode};
use bizform_pack::JurisdictionProfile;
use bizform_resolver::{
    resolve_jurisdiction_profile, resolve_license_checklist, resolve_profile_for_zip,
    LicenseDirectory, StaticLicenseDirectory,
};

use crate::output::{render, OutputFormat};

/// Exit code for a lookup with no match.
pub const EXIT_NO_MATCH: u8 = 2;

/// Arguments for `bizform zip`.
#[derive(Args, Debug)]
pub struct ZipArgs {
    /// ZIP code; only the first three characters are used.
    pub zip: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for `bizform profile`.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Two-letter state code, case-insensitive.
    pub state: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for `bizform licenses`.
#[derive(Args, Debug)]
pub struct LicensesArgs {
    /// Business type key, e.g. `restaurant`. Unknown keys mean `other`.
    pub business_type: String,

    /// Expand the checklist with the state's registration items and links.
    #[arg(long)]
    pub state: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ZipReport<'a> {
    zip: &'a str,
    state_code: Option<StateCode>,
    state_name: Option<&'static str>,
    profile: Option<&'static JurisdictionProfile>,
}

#[derive(Debug, Serialize)]
struct LicenseReport {
    business_type: BusinessType,
    state: Option<StateCode>,
    required_licenses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    license_links: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    permit_requirements: Vec<String>,
}

/// Run `bizform zip`.
pub fn run_zip(args: &ZipArgs) -> Result<u8> {
    let (state_code, profile) = resolve_profile_for_zip(&args.zip);
    let report = ZipReport {
        zip: &args.zip,
        state_code,
        state_name: state_code.map(|s| s.name()),
        profile,
    };
    println!("{}", render(&report, args.format)?);
    Ok(if state_code.is_some() { 0 } else { EXIT_NO_MATCH })
}

/// Run `bizform profile`.
pub fn run_profile(args: &ProfileArgs) -> Result<u8> {
    let state: StateCode = args
        .state
        .parse()
        .with_context(|| format!("invalid state {:?}", args.state))?;
    match resolve_jurisdiction_profile(state) {
        Some(profile) => {
            println!("{}", render(profile, args.format)?);
            Ok(0)
        }
        None => {
            eprintln!("{} ({state}) has no formation profile", state.name());
            Ok(EXIT_NO_MATCH)
        }
    }
}

/// Run `bizform licenses`.
pub fn run_licenses(args: &LicensesArgs) -> Result<u8> {
    let business_type = BusinessType::from_key_or_other(&args.business_type);

    let report = match &args.state {
        None => LicenseReport {
            business_type,
            state: None,
            required_licenses: resolve_license_checklist(&args.business_type),
            license_links: Vec::new(),
            permit_requirements: Vec::new(),
        },
        Some(raw) => {
            let state: StateCode = raw
                .parse()
                .with_context(|| format!("invalid state {raw:?}"))?;
            let directory = StaticLicenseDirectory;
            let result = directory
                .search(business_type, state)
                .with_context(|| format!("{} search failed", directory.provider_name()))?;
            LicenseReport {
                business_type,
                state: Some(state),
                required_licenses: result.required_licenses,
                license_links: result.license_links,
                permit_requirements: result.permit_requirements,
            }
        }
    };

    tracing::debug!(
        business_type = %business_type,
        count = report.required_licenses.len(),
        "license checklist resolved"
    );
    println!("{}", render(&report, args.format)?);
    Ok(0)
}
