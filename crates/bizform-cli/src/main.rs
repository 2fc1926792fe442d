//! # bizform CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bizform_cli::lookup::{run_licenses, run_profile, run_zip, LicensesArgs, ProfileArgs, ZipArgs};
use bizform_cli::tables::{run_tables, run_validate, TablesArgs, ValidateArgs};

/// Bizform reference-data toolchain.
///
/// Looks up jurisdiction profiles and license checklists, and validates or
/// exports the built-in reference tables.
#[derive(Parser, Debug)]
#[command(name = "bizform", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect the state and formation profile for a ZIP code.
    Zip(ZipArgs),

    /// Show a state's LLC formation profile.
    Profile(ProfileArgs),

    /// List the licenses a business type typically needs.
    Licenses(LicensesArgs),

    /// Check the reference tables for consistency.
    Validate(ValidateArgs),

    /// Export the reference tables.
    Tables(TablesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Zip(args) => run_zip(&args),
        Commands::Profile(args) => run_profile(&args),
        Commands::Licenses(args) => run_licenses(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Tables(args) => run_tables(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
