//! # Reference Table Subcommands
//!
//! `validate` checks the built-in tables; `tables` exports them.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use bizform_core::{BusinessType, StateCode};
use bizform_pack::{
    bank_catalog, ein_entity_types, jurisdiction_profiles, license_catalog,
    validate_reference_tables, BankOption, JurisdictionProfile, LicenseCategory, ZipPrefixTable,
    IRS_EIN_URL,
};

use crate::output::{render, OutputFormat};

/// Arguments for `bizform validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Print nothing on success.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Which table to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Table {
    ZipPrefixes,
    Profiles,
    Licenses,
    Banks,
    Ein,
    All,
}

/// Arguments for `bizform tables`.
#[derive(Args, Debug)]
pub struct TablesArgs {
    /// Table to export.
    #[arg(value_enum, default_value_t = Table::All)]
    pub table: Table,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PrefixRange {
    state: StateCode,
    first: String,
    last: String,
}

#[derive(Debug, Serialize)]
struct EinTable {
    entity_types: &'static [&'static str],
    irs_url: &'static str,
}

#[derive(Debug, Serialize)]
struct Export {
    #[serde(skip_serializing_if = "Option::is_none")]
    zip_prefixes: Option<Vec<PrefixRange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profiles: Option<&'static BTreeMap<StateCode, JurisdictionProfile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<&'static BTreeMap<BusinessType, LicenseCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    banks: Option<&'static [BankOption]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ein: Option<EinTable>,
}

fn export(table: Table) -> Export {
    let want = |t: Table| table == Table::All || table == t;
    Export {
        zip_prefixes: want(Table::ZipPrefixes).then(|| {
            ZipPrefixTable::ranges()
                .iter()
                .map(|&(state, lo, hi)| PrefixRange {
                    state,
                    first: format!("{lo:03}"),
                    last: format!("{hi:03}"),
                })
                .collect()
        }),
        profiles: want(Table::Profiles).then(jurisdiction_profiles),
        licenses: want(Table::Licenses).then(license_catalog),
        banks: want(Table::Banks).then(bank_catalog),
        ein: want(Table::Ein).then(|| EinTable {
            entity_types: ein_entity_types(),
            irs_url: IRS_EIN_URL,
        }),
    }
}

/// Run `bizform validate`. Exit code 1 when any check fails.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let problems = validate_reference_tables();
    if problems.is_empty() {
        if !args.quiet {
            println!("reference tables OK");
        }
        return Ok(0);
    }
    for problem in &problems {
        eprintln!("error: {problem}");
    }
    eprintln!("{} problem(s) found", problems.len());
    Ok(1)
}

/// Run `bizform tables`.
pub fn run_tables(args: &TablesArgs) -> Result<u8> {
    println!("{}", render(&export(args.table), args.format)?);
    Ok(0)
}
