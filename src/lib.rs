//! menuboard: content resolution for a restaurant website
//!
//! Reads menu items, categories, tags, team members and weekly lunch menus
//! from markdown/YAML files (or from a running content API), normalizes
//! them into typed records and answers filtered, ordered queries over them.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod query;
pub mod resolver;
pub mod server;
pub mod source;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub use error::ContentError;
pub use resolver::RestaurantContent;

/// The main application handle
#[derive(Clone)]
pub struct Restaurant {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory
    pub content_dir: std::path::PathBuf,
}

impl Restaurant {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Content resolved from the local content directory
    pub fn local_content(&self) -> RestaurantContent {
        let source = source::FileSystemSource::for_restaurant(self);
        RestaurantContent::new(Arc::new(source)).with_timezone(self.config.tz())
    }

    /// Content resolved through the content API at `base_url`, or at the
    /// configured `url` when `None`
    pub fn remote_content(&self, base_url: Option<&str>) -> RestaurantContent {
        let base_url = base_url.unwrap_or(&self.config.url);
        let source = source::HttpApiSource::new(base_url);
        RestaurantContent::new(Arc::new(source)).with_timezone(self.config.tz())
    }
}
