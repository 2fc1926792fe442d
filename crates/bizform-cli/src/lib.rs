//! # bizform-cli — Bizform Command-Line Interface
//!
//! Offline access to the reference tables and the requirement resolver.
//!
//! ## Subcommands
//!
//! - `zip` — Detect the state and profile for a ZIP code
//! - `profile` — Show one state's formation profile
//! - `licenses` — Typical licenses for a business type, optionally
//!   expanded for a state
//! - `validate` — Check the reference tables for consistency
//! - `tables` — Export the reference tables as JSON or YAML
//!
//! ## Crate Policy
//!
//! - Argument parsing lives next to each handler; `main.rs` only dispatches.
//! - Handlers delegate to `bizform-resolver` and `bizform-pack`.
//! - Handlers return a process exit code; errors bubble up as `anyhow`.

pub mod lookup;
pub mod output;
pub mod tables;
