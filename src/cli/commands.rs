//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, subcommands, and their arguments.

use crate::config::{resolve_config, sidebar_app_url, ConfigMap, SidebarSettings};
use crate::env::{Environment, HostConfig, HtmlDocument};
use crate::error::{HypothesisConfigError, Result};
use crate::utils::format::{format_config, OutputFormat};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Get the full version string with build information
fn get_version() -> &'static str {
    env!("VERSION_WITH_GIT")
}

#[derive(Parser, Debug)]
#[command(name = "hconfig")]
#[command(about = "Resolve the configuration of an embedded Hypothesis client")]
#[command(version = get_version())]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json", env = "HCONFIG_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Inputs describing a host page
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// HTML file of the host page
    #[arg(long, value_name = "FILE")]
    pub page: PathBuf,

    /// Current location of the host page
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// JSON file holding what `hypothesisConfig()` returns
    #[arg(long, value_name = "FILE")]
    pub host_config: Option<PathBuf>,

    /// Treat the host config as a plain value instead of a function
    #[arg(long, requires = "host_config")]
    pub host_config_literal: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the annotator configuration of a host page
    Resolve(PageArgs),
    /// Print the sidebar iframe URL for a host page
    SidebarUrl(PageArgs),
    /// Show the settings the sidebar app would start with
    Sidebar {
        /// HTML file of the sidebar app
        #[arg(long, value_name = "FILE")]
        page: PathBuf,
        /// URL the sidebar app was loaded from
        #[arg(long, value_name = "URL")]
        url: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let output = self.render().await?;
        println!("{}", output);
        Ok(())
    }

    /// Run the command and return what it would print
    pub async fn render(self) -> Result<String> {
        match self.command {
            Commands::Resolve(args) => {
                let config = resolve_page(&args).await?;
                format_config(&config, self.format)
            }
            Commands::SidebarUrl(args) => {
                let config = resolve_page(&args).await?;
                sidebar_app_url(&config)
            }
            Commands::Sidebar { page, url } => {
                let document = load_document(&page, &url).await?;
                let settings = SidebarSettings::load(&document, &url)?;
                info!("Loaded {} sidebar setting(s)", settings.as_map().len());
                format_config(settings.as_map(), self.format)
            }
        }
    }
}

async fn resolve_page(args: &PageArgs) -> Result<ConfigMap> {
    let document = load_document(&args.page, &args.url).await?;
    let mut env = Environment::new(document, args.url.clone());

    if let Some(path) = &args.host_config {
        let value = load_host_config(path).await?;
        let host_config = if args.host_config_literal {
            HostConfig::NotCallable(value)
        } else {
            HostConfig::returning(value)
        };
        env = env.with_host_config(host_config);
    }

    let config = resolve_config(&env)?;
    info!("Resolved {} configuration key(s)", config.len());
    Ok(config)
}

async fn load_document(path: &Path, base_url: &str) -> Result<HtmlDocument> {
    debug!("Reading page from: {}", path.display());
    let html = tokio::fs::read_to_string(path).await?;
    HtmlDocument::parse(&html)?.with_base_url(base_url)
}

async fn load_host_config(path: &Path) -> Result<Value> {
    debug!("Reading host config from: {}", path.display());
    let contents = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&contents).map_err(|e| {
        HypothesisConfigError::invalid_argument(format!(
            "{} is not valid JSON: {}",
            path.display(),
            e
        ))
    })
}
