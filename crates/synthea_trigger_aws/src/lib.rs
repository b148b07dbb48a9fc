//! AWS-facing adapters and handlers for triggering Synthea runs.
//!
//! This crate owns runtime integration details (SDK clients, the blocking
//! bridge, logging setup and the CLI entry flow). Submission contracts,
//! configuration and discovery rules come from `synthea_trigger_core`.

pub mod adapters;
pub mod handlers;
pub mod sdk;
pub mod telemetry;
