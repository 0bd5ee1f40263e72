//! hypothesis-config - configuration resolution for the Hypothesis client
//!
//! Merges the annotator configuration from the host page (link element,
//! embedded JSON settings, `hypothesisConfig()` and direct-link URL
//! fragments) and builds the sidebar's settings object.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use config::{resolve_config, ConfigMap, ConfigResolver, SidebarSettings};
pub use env::{Document, Environment, HostConfig, HtmlDocument};
pub use error::{ExtractionError, HypothesisConfigError, Result};
