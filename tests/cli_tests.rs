//! CLI command tests
//!
//! Runs `hconfig` commands against pages written to a temporary directory.

use clap::Parser;
use hypothesis_config::cli::Cli;
use hypothesis_config::HypothesisConfigError;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

const HOST_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <link type="application/annotator+html" href="/embed/app.html">
    <script class="js-hypothesis-config" type="application/json">
      {"showHighlights": false, "openSidebar": true}
    </script>
  </head>
  <body><p>Annotate me</p></body>
</html>"#;

const SIDEBAR_PAGE: &str = r#"<html>
  <head>
    <script class="js-hypothesis-config">{"googleAnalytics": "UA-12345", "openSidebar": false}</script>
  </head>
</html>"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

async fn render(args: &[&str]) -> hypothesis_config::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("hconfig").chain(args.iter().copied())).unwrap();
    cli.render().await
}

#[cfg(test)]
mod resolve_command_tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_prints_json() {
        let dir = TempDir::new().unwrap();
        let page = write(&dir, "page.html", HOST_PAGE);

        let output = render(&[
            "resolve",
            "--page",
            page.to_str().unwrap(),
            "--url",
            "https://example.com/articles/1#annotations:xyz",
        ])
        .await
        .unwrap();

        let config: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            config,
            json!({
                "app": "https://example.com/embed/app.html",
                "showHighlights": "never",
                "openSidebar": true,
                "annotations": "xyz"
            })
        );
    }

    #[tokio::test]
    async fn test_resolve_with_host_config_file() {
        let dir = TempDir::new().unwrap();
        let page = write(&dir, "page.html", HOST_PAGE);
        let host = write(&dir, "host.json", r#"{"openSidebar": false, "appType": "via"}"#);

        let output = render(&[
            "resolve",
            "--page",
            page.to_str().unwrap(),
            "--url",
            "https://example.com/",
            "--host-config",
            host.to_str().unwrap(),
        ])
        .await
        .unwrap();

        let config: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(config["openSidebar"], json!(false));
        assert_eq!(config["appType"], json!("via"));
    }

    #[tokio::test]
    async fn test_resolve_with_literal_host_config_fails() {
        let dir = TempDir::new().unwrap();
        let page = write(&dir, "page.html", HOST_PAGE);
        let host = write(&dir, "host.json", r#""notAFunction""#);

        let err = render(&[
            "resolve",
            "--page",
            page.to_str().unwrap(),
            "--url",
            "https://example.com/",
            "--host-config",
            host.to_str().unwrap(),
            "--host-config-literal",
        ])
        .await
        .unwrap_err();

        assert!(matches!(err, HypothesisConfigError::HostConfigNotCallable { .. }));
    }

    #[tokio::test]
    async fn test_resolve_table_output() {
        let dir = TempDir::new().unwrap();
        let page = write(&dir, "page.html", HOST_PAGE);

        let output = render(&[
            "resolve",
            "--format",
            "table",
            "--page",
            page.to_str().unwrap(),
            "--url",
            "https://example.com/",
        ])
        .await
        .unwrap();

        assert!(output.contains("showHighlights"));
        assert!(output.contains("never"));
    }

    #[tokio::test]
    async fn test_missing_page_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.html");

        let err = render(&[
            "resolve",
            "--page",
            missing.to_str().unwrap(),
            "--url",
            "https://example.com/",
        ])
        .await
        .unwrap_err();

        assert!(matches!(err, HypothesisConfigError::IoError(_)));
    }
}

#[cfg(test)]
mod sidebar_command_tests {
    use super::*;

    #[tokio::test]
    async fn test_sidebar_url_then_sidebar_settings() {
        let dir = TempDir::new().unwrap();
        let host_page = write(&dir, "page.html", HOST_PAGE);
        let sidebar_page = write(&dir, "app.html", SIDEBAR_PAGE);

        let sidebar_url = render(&[
            "sidebar-url",
            "--page",
            host_page.to_str().unwrap(),
            "--url",
            "https://example.com/#annotations:group:abc",
        ])
        .await
        .unwrap();
        assert!(sidebar_url.starts_with("https://example.com/embed/app.html?config="));

        let output = render(&[
            "sidebar",
            "--page",
            sidebar_page.to_str().unwrap(),
            "--url",
            sidebar_url.as_str(),
        ])
        .await
        .unwrap();

        let settings: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            settings,
            json!({
                "googleAnalytics": "UA-12345",
                "openSidebar": true,
                "showHighlights": "never",
                "group": "abc"
            })
        );
    }
}
