//! Lightweight HTML document
//!
//! Extracts just the `<base>`, `<link>` and `<script>` elements the resolvers
//! need. This is not a conforming HTML parser, but it follows the browser on
//! the points the resolvers observe: quoted attribute values may contain `>`,
//! the first of duplicate attributes wins, `type` matching ignores ASCII case
//! and relative `href`s resolve against the first `<base href>`.

use super::{Document, Link};
use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
struct ScriptElement {
    classes: Vec<String>,
    text: String,
}

/// Document backed by an HTML string
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    links: Vec<HashMap<String, String>>,
    scripts: Vec<ScriptElement>,
    base_href: Option<String>,
    base_url: Option<Url>,
}

impl HtmlDocument {
    /// Parse the `<link>` and `<script>` elements out of `html`
    pub fn parse(html: &str) -> Result<Self> {
        let comment_re = Regex::new(r"(?s)<!--.*?-->")?;
        let base_re = Regex::new(r#"(?is)<base\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)?;
        let link_re = Regex::new(r#"(?is)<link\b((?:[^>"']|"[^"]*"|'[^']*')*)>"#)?;
        let script_re =
            Regex::new(r#"(?is)<script\b((?:[^>"']|"[^"]*"|'[^']*')*)>(.*?)</script\s*>"#)?;
        let attr_re = Regex::new(
            r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#,
        )?;

        let html = comment_re.replace_all(html, "");

        let base_href = base_re
            .captures_iter(&html)
            .find_map(|caps| parse_attributes(&attr_re, &caps[1]).remove("href"));

        let links: Vec<_> = link_re
            .captures_iter(&html)
            .map(|caps| parse_attributes(&attr_re, &caps[1]))
            .collect();

        let scripts: Vec<_> = script_re
            .captures_iter(&html)
            .map(|caps| {
                let attrs = parse_attributes(&attr_re, &caps[1]);
                let classes = attrs
                    .get("class")
                    .map(|c| c.split_whitespace().map(str::to_string).collect())
                    .unwrap_or_default();
                ScriptElement {
                    classes,
                    text: caps[2].to_string(),
                }
            })
            .collect();

        debug!(
            "Parsed HTML document: {} link(s), {} script(s)",
            links.len(),
            scripts.len()
        );

        Ok(Self {
            links,
            scripts,
            base_href,
            base_url: None,
        })
    }

    /// Set the document's own URL, used to resolve relative `href`s
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    /// Document URL adjusted by `<base href>`, if either is known
    fn effective_base(&self) -> Option<Url> {
        match (&self.base_url, &self.base_href) {
            (Some(document), Some(href)) => document.join(href).ok().or_else(|| Some(document.clone())),
            (Some(document), None) => Some(document.clone()),
            (None, Some(href)) => Url::parse(href).ok(),
            (None, None) => None,
        }
    }

    fn resolve_href(&self, href: &str) -> String {
        match self.effective_base() {
            Some(base) => base
                .join(href)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => href.to_string(),
        }
    }
}

impl Document for HtmlDocument {
    fn query_link(&self, link_type: &str) -> Option<Link> {
        self.links
            .iter()
            .find(|attrs| {
                attrs
                    .get("type")
                    .is_some_and(|t| t.eq_ignore_ascii_case(link_type))
            })
            .map(|attrs| Link {
                href: attrs
                    .get("href")
                    .map(|href| self.resolve_href(href))
                    .unwrap_or_default(),
            })
    }

    fn script_blocks(&self, class: &str) -> Vec<String> {
        self.scripts
            .iter()
            .filter(|script| script.classes.iter().any(|c| c == class))
            .map(|script| script.text.clone())
            .collect()
    }
}

fn parse_attributes(attr_re: &Regex, raw: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for caps in attr_re.captures_iter(raw) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();
        // First occurrence wins
        attrs.entry(name).or_insert_with(|| decode_entities(value));
    }
    attrs
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
