//! Subsequences runner
//!
//! File-based front end for the action framework: discover parameters from
//! a form, augment its schema, and evaluate or advance batches of
//! submissions.

#![warn(missing_docs)]

pub mod commands;
pub mod logging;
pub mod settings;

pub use settings::{LoggingSettings, Settings};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
