//! Direct-link extraction from the page URL
//!
//! Recognised fragments:
//! - `#annotations:<id>` selects a single annotation
//! - `#annotations:query:<q>` (or `q:`) pre-fills the search query
//! - `#annotations:group:<id>` focuses a group

use super::ConfigMap;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Source of direct-link configuration
#[cfg_attr(test, mockall::automock)]
pub trait AnnotationQueryExtractor {
    /// Structured direct-link fields for `location`, if it carries any
    fn extract(&self, location: &str) -> Option<ConfigMap>;
}

/// Parses the `#annotations:` URL fragment
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLinkExtractor;

impl AnnotationQueryExtractor for DirectLinkExtractor {
    fn extract(&self, location: &str) -> Option<ConfigMap> {
        extract_annotation_query(location)
    }
}

pub fn extract_annotation_query(location: &str) -> Option<ConfigMap> {
    let url = Url::parse(location).ok()?;
    let fragment = url.fragment()?;

    let annotation_re = Regex::new(r"^annotations:([A-Za-z0-9_-]+)$").ok()?;
    let query_re = Regex::new(r"(?i)^annotations:(?:query|q):(.+)$").ok()?;
    let group_re = Regex::new(r"^annotations:group:([A-Za-z0-9_-]+)$").ok()?;

    let (key, value) = if let Some(caps) = annotation_re.captures(fragment) {
        ("annotations", caps[1].to_string())
    } else if let Some(caps) = group_re.captures(fragment) {
        ("group", caps[1].to_string())
    } else if let Some(caps) = query_re.captures(fragment) {
        let query = percent_decode_str(&caps[1]).decode_utf8().ok()?;
        ("query", query.into_owned())
    } else {
        return None;
    };

    debug!("Direct link in location: {} = {}", key, value);

    let mut config = ConfigMap::new();
    config.insert(key.to_string(), Value::String(value));
    Some(config)
}
