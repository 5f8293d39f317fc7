//! Cost estimator service
//!
//! HTTP surface and configuration for the extraction cost model. The
//! binary in `main.rs` wires these together; tests drive the router
//! directly.

pub mod api;
pub mod config;
