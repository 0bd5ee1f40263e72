//! Utility functions module
//!
//! This module contains output formatting helpers used by the CLI.

pub mod format;

pub use format::*;
