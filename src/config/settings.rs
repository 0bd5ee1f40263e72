//! Embedded JSON settings
//!
//! Host pages (and the sidebar app HTML) may carry configuration as JSON
//! inside `<script class="js-hypothesis-config">` blocks.

use super::{merge_into, ConfigMap};
use crate::env::Document;
use crate::error::ExtractionError;
use serde_json::Value;
use tracing::debug;

/// Class marking embedded configuration blocks
pub const CONFIG_SCRIPT_CLASS: &str = "js-hypothesis-config";

/// Source of settings embedded in a document
pub trait SettingsExtractor {
    fn extract(&self, document: &dyn Document) -> Result<ConfigMap, ExtractionError>;
}

impl<F> SettingsExtractor for F
where
    F: Fn(&dyn Document) -> Result<ConfigMap, ExtractionError>,
{
    fn extract(&self, document: &dyn Document) -> Result<ConfigMap, ExtractionError> {
        self(document)
    }
}

/// Reads and merges every JSON config block of a document
#[derive(Debug, Clone)]
pub struct JsonSettingsExtractor {
    class: String,
}

impl Default for JsonSettingsExtractor {
    fn default() -> Self {
        Self::with_class(CONFIG_SCRIPT_CLASS)
    }
}

impl JsonSettingsExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class<S: Into<String>>(class: S) -> Self {
        Self {
            class: class.into(),
        }
    }
}

impl SettingsExtractor for JsonSettingsExtractor {
    fn extract(&self, document: &dyn Document) -> Result<ConfigMap, ExtractionError> {
        let mut settings = ConfigMap::new();

        for (index, block) in document.script_blocks(&self.class).iter().enumerate() {
            if block.trim().is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(block)
                .map_err(|source| ExtractionError::InvalidJson { index, source })?;

            match value {
                // Later blocks win
                Value::Object(map) => merge_into(&mut settings, map),
                _ => return Err(ExtractionError::NotAnObject { index }),
            }
        }

        debug!("Extracted {} setting(s) from .{} blocks", settings.len(), self.class);
        Ok(settings)
    }
}
