//! Configuration resolution module
//!
//! This module merges the annotator configuration from the host page
//! (link element, embedded JSON settings, `hypothesisConfig()` and the
//! direct-link URL fragment) and assembles the sidebar's settings object.

pub mod annotation_query;
pub mod resolver;
pub mod settings;
pub mod sidebar;

pub use annotation_query::*;
pub use resolver::*;
pub use settings::*;
pub use sidebar::*;

use serde_json::{Map, Value};

/// Free-form configuration mapping
pub type ConfigMap = Map<String, Value>;

/// Copy every key of `source` into `target`, overwriting on collision.
///
/// Values are replaced whole; nested objects are not merged.
pub fn merge_into(target: &mut ConfigMap, source: ConfigMap) {
    for (key, value) in source {
        target.insert(key, value);
    }
}
