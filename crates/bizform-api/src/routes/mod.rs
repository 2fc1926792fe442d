//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are assembled in `lib.rs` into the application.

pub mod catalog;
pub mod dashboard;
pub mod forms;
pub mod resolve;
