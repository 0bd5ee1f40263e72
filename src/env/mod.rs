//! Environment handle
//!
//! This module models the parts of a browser window the resolver reads:
//! the document, the optional `hypothesisConfig` property and the current
//! location.

pub mod html;

pub use html::HtmlDocument;

use serde_json::Value;
use std::fmt;

/// A `<link>` element found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Resolved `href`; empty when the attribute is missing
    pub href: String,
}

/// Read-only view of a document
pub trait Document {
    /// First `<link>` whose `type` attribute equals `link_type`
    fn query_link(&self, link_type: &str) -> Option<Link>;

    /// Text content of every `<script>` carrying `class`, in document order
    fn script_blocks(&self, class: &str) -> Vec<String>;
}

impl<D: Document + ?Sized> Document for &D {
    fn query_link(&self, link_type: &str) -> Option<Link> {
        (**self).query_link(link_type)
    }

    fn script_blocks(&self, class: &str) -> Vec<String> {
        (**self).script_blocks(class)
    }
}

/// Host callable producing configuration
pub type HostConfigFn = Box<dyn Fn() -> Value + Send + Sync>;

/// The `hypothesisConfig` property of the host page, when it is defined
pub enum HostConfig {
    /// A zero-argument function; its return value may be anything
    Function(HostConfigFn),
    /// The property exists but holds a non-function value
    NotCallable(Value),
}

impl HostConfig {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Function(Box::new(f))
    }

    /// A function that always returns a clone of `value`
    pub fn returning(value: Value) -> Self {
        Self::function(move || value.clone())
    }

}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("HostConfig::Function(..)"),
            Self::NotCallable(value) => f.debug_tuple("HostConfig::NotCallable").field(value).finish(),
        }
    }
}

/// Browser-like environment the configuration is read from
#[derive(Debug)]
pub struct Environment<D> {
    document: D,
    host_config: Option<HostConfig>,
    location: String,
}

impl<D: Document> Environment<D> {
    pub fn new<S: Into<String>>(document: D, location: S) -> Self {
        Self {
            document,
            host_config: None,
            location: location.into(),
        }
    }

    /// Define `hypothesisConfig` on the environment
    pub fn with_host_config(mut self, host_config: HostConfig) -> Self {
        self.host_config = Some(host_config);
        self
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn host_config(&self) -> Option<&HostConfig> {
        self.host_config.as_ref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}
