//! # HTTP Middleware
//!
//! - `metrics`: Prometheus request metrics and the form-level counters.

pub mod metrics;
