//! # bizform-state — Form State Controllers
//!
//! One controller per form. A controller owns its record, applies events
//! to it, and projects the payload written on save:
//!
//! - **LLC formation** (`llc.rs`): jurisdiction detection from the ZIP
//!   code, state selection, member list editing.
//! - **EIN worksheet** (`ein.rs`): plain field edits with numeric and date
//!   coercion.
//! - **License lookup** (`licenses.rs`): business-type checklist and the
//!   license search.
//! - **Banking comparison** (`banking.rs`): ZIP entry and the bank search.
//!
//! Controllers are synchronous and never perform I/O. Persistence goes
//! through [`PersistenceGateway`] via [`save_form`] and [`load_form`].
//!
//! ## Errors
//!
//! Bad events are [`FormError`]s. Storage problems are [`GatewayError`]s,
//! which the save flow turns into a user-facing [`Notice`] rather than
//! propagating.

pub mod banking;
pub mod controller;
pub mod ein;
pub mod gateway;
pub mod licenses;
pub mod llc;
pub mod notice;
pub mod save;

pub use banking::{BankingController, BankingEvent, BankingLookup};
pub use controller::{FormController, FormError};
pub use ein::{EinApplication, EinController, EinEvent};
pub use gateway::{GatewayError, MemoryGateway, PersistenceGateway, StoredForm};
pub use licenses::{LicenseController, LicenseEvent, LicenseLookup};
pub use llc::{LlcApplication, LlcController, LlcDuration, LlcEvent, ManagementStructure, Party};
pub use notice::{Notice, NoticeLevel};
pub use save::{load_form, restore_controller, save_form, SaveOutcome};
