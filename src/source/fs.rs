//! File system content source

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::ContentSource;
use crate::config::Fallbacks;
use crate::content::{
    ContentKind, ContentLoader, LunchMenu, MenuCategory, MenuItem, MenuTag, TeamMember,
};
use crate::error::Result;
use crate::Restaurant;

/// Reads records straight from the content directory.
///
/// Loading runs on the blocking pool; every call reads the files afresh.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    loader: ContentLoader,
    fallbacks: Arc<Fallbacks>,
    fallback_on_empty: bool,
}

impl FileSystemSource {
    pub fn new<P: AsRef<Path>>(content_dir: P, fallbacks: Fallbacks) -> Self {
        Self {
            loader: ContentLoader::new(content_dir),
            fallbacks: Arc::new(fallbacks),
            fallback_on_empty: false,
        }
    }

    /// Source configured from a site's `_config.yml`
    pub fn for_restaurant(restaurant: &Restaurant) -> Self {
        Self::new(&restaurant.content_dir, restaurant.config.fallbacks.clone())
            .with_fallback_on_empty(restaurant.config.fallback_on_empty)
    }

    /// Also serve fallback data when a location exists but holds no records
    pub fn with_fallback_on_empty(mut self, enabled: bool) -> Self {
        self.fallback_on_empty = enabled;
        self
    }

    async fn load<T, F>(&self, kind: ContentKind, load: F, fallback: &[T]) -> Result<Vec<T>>
    where
        T: Clone + Send + 'static,
        F: FnOnce(&ContentLoader) -> Result<Vec<T>> + Send + 'static,
    {
        let loader = self.loader.clone();
        let result = tokio::task::spawn_blocking(move || load(&loader)).await?;

        match result {
            Ok(records) if records.is_empty() && self.fallback_on_empty => {
                tracing::info!(
                    "No {} records found, serving {} fallback records",
                    kind,
                    fallback.len()
                );
                Ok(fallback.to_vec())
            }
            Ok(records) => Ok(records),
            Err(e) if e.serves_fallback() => {
                tracing::warn!("{}, serving {} fallback {}", e, fallback.len(), kind);
                Ok(fallback.to_vec())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ContentSource for FileSystemSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn menu_categories(&self) -> Result<Vec<MenuCategory>> {
        self.load(
            ContentKind::MenuCategories,
            ContentLoader::load_categories,
            &self.fallbacks.categories,
        )
        .await
    }

    async fn menu_tags(&self) -> Result<Vec<MenuTag>> {
        self.load(
            ContentKind::MenuTags,
            ContentLoader::load_tags,
            &self.fallbacks.tags,
        )
        .await
    }

    async fn menu_items(&self) -> Result<Vec<MenuItem>> {
        self.load(
            ContentKind::MenuItems,
            ContentLoader::load_menu_items,
            &self.fallbacks.items,
        )
        .await
    }

    async fn team_members(&self) -> Result<Vec<TeamMember>> {
        self.load(
            ContentKind::TeamMembers,
            ContentLoader::load_team_members,
            &self.fallbacks.team,
        )
        .await
    }

    async fn lunch_menus(&self) -> Result<Vec<LunchMenu>> {
        self.load(
            ContentKind::LunchMenus,
            ContentLoader::load_lunch_menus,
            &self.fallbacks.lunch_menus,
        )
        .await
    }
}
