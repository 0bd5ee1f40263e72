//! Sidebar settings
//!
//! The annotator hands its resolved configuration to the sidebar through the
//! `config` query parameter of the sidebar URL. The sidebar combines it with
//! the settings rendered into its own HTML into a [`SidebarSettings`] value
//! that is built once at startup and passed to whatever needs it.

use super::{merge_into, ConfigMap, JsonSettingsExtractor, SettingsExtractor};
use crate::env::Document;
use crate::error::{HypothesisConfigError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Query parameter carrying the host page configuration
pub const CONFIG_QUERY_PARAM: &str = "config";

/// Host page keys the sidebar accepts
pub const HOST_PAGE_CONFIG_KEYS: &[&str] = &[
    "annotations",
    "query",
    "group",
    "appType",
    "openLoginForm",
    "openSidebar",
    "showHighlights",
    "services",
    "branding",
];

/// Build the sidebar iframe URL for a resolved annotator configuration
pub fn sidebar_app_url(config: &ConfigMap) -> Result<String> {
    let app = config
        .get("app")
        .and_then(Value::as_str)
        .ok_or(HypothesisConfigError::MissingAppLink)?;

    let mut url = Url::parse(app)?;

    let mut forwarded = config.clone();
    forwarded.remove("app");
    let encoded = serde_json::to_string(&forwarded)?;

    url.query_pairs_mut()
        .append_pair(CONFIG_QUERY_PARAM, &encoded);

    Ok(url.to_string())
}

/// Whitelisted configuration passed from the host page via `location`
pub fn host_page_config(location: &str) -> Result<ConfigMap> {
    let url = Url::parse(location)?;

    let raw = url
        .query_pairs()
        .find(|(key, _)| key == CONFIG_QUERY_PARAM)
        .map(|(_, value)| value.into_owned());

    let Some(raw) = raw else {
        return Ok(ConfigMap::new());
    };

    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| HypothesisConfigError::invalid_host_page_config(e.to_string()))?;

    let Value::Object(config) = value else {
        return Err(HypothesisConfigError::invalid_host_page_config(
            "expected a JSON object",
        ));
    };

    let accepted: ConfigMap = config
        .into_iter()
        .filter(|(key, _)| HOST_PAGE_CONFIG_KEYS.contains(&key.as_str()))
        .collect();

    debug!("Accepted {} host page setting(s)", accepted.len());
    Ok(accepted)
}

/// Settings of the sidebar application
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SidebarSettings {
    values: ConfigMap,
}

impl SidebarSettings {
    /// Load settings from the sidebar document and its URL
    pub fn load<D: Document>(document: &D, location: &str) -> Result<Self> {
        Self::load_with(&JsonSettingsExtractor::default(), document, location)
    }

    /// Like [`SidebarSettings::load`] with a custom settings source.
    ///
    /// Unlike the annotator, a malformed settings block is fatal here.
    pub fn load_with<S, D>(extractor: &S, document: &D, location: &str) -> Result<Self>
    where
        S: SettingsExtractor,
        D: Document,
    {
        let mut values = extractor.extract(document)?;
        merge_into(&mut values, host_page_config(location)?);
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Error reporting configuration, if enabled
    pub fn raven(&self) -> Option<&Value> {
        self.values.get("raven").filter(|v| !v.is_null())
    }

    /// Analytics tracking ID, if enabled
    pub fn google_analytics(&self) -> Option<&str> {
        self.values.get("googleAnalytics").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &ConfigMap {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::HtmlDocument;
    use serde_json::json;

    fn object(value: Value) -> ConfigMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_sidebar_app_url_forwards_everything_but_app() {
        let config = object(json!({
            "app": "https://hypothes.is/app.html",
            "openSidebar": true,
        }));

        let url = sidebar_app_url(&config).unwrap();

        assert!(url.starts_with("https://hypothes.is/app.html?config="));
        let forwarded = host_page_config(&url).unwrap();
        assert_eq!(Value::Object(forwarded), json!({"openSidebar": true}));
    }

    #[test]
    fn test_sidebar_app_url_requires_app() {
        let err = sidebar_app_url(&object(json!({"app": 42}))).unwrap_err();
        assert!(matches!(err, HypothesisConfigError::MissingAppLink));
    }

    #[test]
    fn test_host_page_config_without_param_is_empty() {
        assert!(host_page_config("https://hypothes.is/app.html").unwrap().is_empty());
    }

    #[test]
    fn test_host_page_config_drops_unknown_keys() {
        let location = "https://hypothes.is/app.html?config=%7B%22annotations%22%3A%22abc%22%2C%22evil%22%3A1%7D";
        assert_eq!(
            Value::Object(host_page_config(location).unwrap()),
            json!({"annotations": "abc"})
        );
    }

    #[test]
    fn test_host_page_config_rejects_bad_json() {
        let err = host_page_config("https://hypothes.is/app.html?config=%7Bnope").unwrap_err();
        assert!(matches!(err, HypothesisConfigError::InvalidHostPageConfig(_)));

        let err = host_page_config("https://hypothes.is/app.html?config=%5B%5D").unwrap_err();
        assert!(matches!(err, HypothesisConfigError::InvalidHostPageConfig(_)));
    }

    #[test]
    fn test_load_overlays_host_page_config() {
        let doc = HtmlDocument::parse(
            r#"<script class="js-hypothesis-config">
                 {"raven": {"dsn": "https://sentry.example/1"}, "googleAnalytics": "UA-1", "openSidebar": false}
               </script>"#,
        )
        .unwrap();
        let location = "https://hypothes.is/app.html?config=%7B%22openSidebar%22%3Atrue%7D";

        let settings = SidebarSettings::load(&doc, location).unwrap();

        assert_eq!(settings.get("openSidebar"), Some(&json!(true)));
        assert_eq!(settings.google_analytics(), Some("UA-1"));
        assert_eq!(settings.raven(), Some(&json!({"dsn": "https://sentry.example/1"})));
    }

    #[test]
    fn test_load_fails_on_malformed_settings() {
        let doc = HtmlDocument::parse(r#"<script class="js-hypothesis-config">{oops</script>"#).unwrap();
        let err = SidebarSettings::load(&doc, "https://hypothes.is/app.html").unwrap_err();
        assert!(matches!(err, HypothesisConfigError::Extraction(_)));
    }

    #[test]
    fn test_optional_integrations_absent() {
        let settings = SidebarSettings::default();
        assert!(settings.raven().is_none());
        assert!(settings.google_analytics().is_none());
        assert!(settings.as_map().is_empty());
    }
}
