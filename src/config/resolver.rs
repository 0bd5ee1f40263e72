//! Annotator configuration resolver
//!
//! Sources are applied in a fixed order, later ones overriding earlier keys:
//! 1. the `application/annotator+html` link (`app`, mandatory)
//! 2. embedded JSON settings
//! 3. the host page's `hypothesisConfig()` function
//! 4. legacy `showHighlights` normalization
//! 5. direct-link fields from the location
//!
//! Step 5 comes last because the page may rewrite its own URL before the
//! client loads, so whatever survived must win.

use super::{
    merge_into, AnnotationQueryExtractor, ConfigMap, DirectLinkExtractor, JsonSettingsExtractor,
    SettingsExtractor,
};
use crate::env::{Document, Environment, HostConfig};
use crate::error::{HypothesisConfigError, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// `type` of the link element pointing at the sidebar app
pub const APP_LINK_TYPE: &str = "application/annotator+html";

/// Resolves the annotator configuration with injectable collaborators
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver<S = JsonSettingsExtractor, Q = DirectLinkExtractor> {
    settings: S,
    query: Q,
}

impl<S: SettingsExtractor, Q: AnnotationQueryExtractor> ConfigResolver<S, Q> {
    pub fn new(settings: S, query: Q) -> Self {
        Self { settings, query }
    }

    pub fn resolve<D: Document>(&self, env: &Environment<D>) -> Result<ConfigMap> {
        let document = env.document();

        let link = document
            .query_link(APP_LINK_TYPE)
            .ok_or(HypothesisConfigError::MissingAppLink)?;

        let mut options = ConfigMap::new();
        options.insert("app".to_string(), Value::String(link.href));

        match self.settings.extract(document) {
            Ok(settings) => {
                debug!("Merging {} embedded setting(s)", settings.len());
                merge_into(&mut options, settings);
            }
            Err(err) => {
                warn!(error = %err, "Could not parse settings from js-hypothesis-config tags");
            }
        }

        match env.host_config() {
            Some(HostConfig::Function(host_config)) => match host_config() {
                Value::Object(config) => {
                    debug!("Merging {} setting(s) from hypothesisConfig()", config.len());
                    merge_into(&mut options, config);
                }
                other => debug!("Ignoring non-object hypothesisConfig() result: {}", other),
            },
            Some(HostConfig::NotCallable(_)) => {
                return Err(HypothesisConfigError::host_config_not_callable());
            }
            None => {}
        }

        normalize_legacy_keys(&mut options);

        if let Some(direct_link) = self.query.extract(env.location()) {
            if !direct_link.is_empty() {
                debug!("Merging {} direct-link field(s)", direct_link.len());
                merge_into(&mut options, direct_link);
            }
        }

        Ok(options)
    }
}

/// Resolve the annotator configuration using the default collaborators
pub fn resolve_config<D: Document>(env: &Environment<D>) -> Result<ConfigMap> {
    ConfigResolver::<JsonSettingsExtractor, DirectLinkExtractor>::default().resolve(env)
}

/// Rewrite boolean `showHighlights` to its current string form
fn normalize_legacy_keys(options: &mut ConfigMap) {
    if let Some(Value::Bool(show)) = options.get("showHighlights") {
        let mode = if *show { "always" } else { "never" };
        options.insert("showHighlights".to_string(), Value::String(mode.to_string()));
    }
}
