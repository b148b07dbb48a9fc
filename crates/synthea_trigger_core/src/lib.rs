//! Shared Synthea trigger primitives.
//!
//! This crate owns the submission contract, resource naming, configuration and
//! discovery selection rules. It intentionally excludes AWS SDK and runtime
//! concerns; those live in `synthea_trigger_aws`.

pub mod config;
pub mod contract;
pub mod discovery;
pub mod error;
pub mod monitoring;
pub mod stack;
