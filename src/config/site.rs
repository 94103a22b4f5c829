//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::Fallbacks;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// IANA timezone of the restaurant; empty means server local time
    pub timezone: String,

    /// Base URL of the content API read by `--remote`
    pub url: String,

    // Directory
    pub content_dir: String,

    // Fallback data
    /// Also serve fallback data when a content directory exists but is empty
    pub fallback_on_empty: bool,
    pub fallbacks: Fallbacks,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Menuboard".to_string(),
            timezone: String::new(),
            url: "http://localhost:3000".to_string(),
            content_dir: "content".to_string(),
            fallback_on_empty: false,
            fallbacks: Fallbacks::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Parsed restaurant timezone, if one is configured and valid
    pub fn tz(&self) -> Option<Tz> {
        crate::query::parse_timezone(&self.timezone)
    }
}
