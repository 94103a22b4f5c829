//! Restaurant content entry points for rendering code
//!
//! Every getter here answers with data, never with an error: failures are
//! logged and degrade to an empty result so a page can always render.

use chrono::NaiveDate;
use chrono_tz::Tz;
use std::sync::Arc;

use crate::content::{LunchMenu, MenuCategory, MenuItem, MenuTag, OrderUpdate, TeamMember};
use crate::error::Result;
use crate::query;
use crate::source::ContentSource;

/// Resolves content through any [`ContentSource`]
#[derive(Clone)]
pub struct RestaurantContent {
    source: Arc<dyn ContentSource>,
    timezone: Option<Tz>,
}

impl RestaurantContent {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            timezone: None,
        }
    }

    /// Use `tz` instead of server local time to decide which lunch menu is
    /// current
    pub fn with_timezone(mut self, tz: Option<Tz>) -> Self {
        self.timezone = tz;
        self
    }

    /// All menu categories, sorted by order
    pub async fn get_menu_categories(&self) -> Vec<MenuCategory> {
        let categories = self.settle("menu categories", self.source.menu_categories().await);
        query::sort_by_order(categories)
    }

    /// All menu tags, in declaration order
    pub async fn get_menu_tags(&self) -> Vec<MenuTag> {
        self.settle("menu tags", self.source.menu_tags().await)
    }

    /// Menu items in `category_id` carrying all of `tag_ids`, sorted by order
    pub async fn get_menu_items(
        &self,
        category_id: Option<&str>,
        tag_ids: Option<&[String]>,
    ) -> Vec<MenuItem> {
        let items = self.settle("menu items", self.source.menu_items().await);
        let items = query::filter_by_category(items, category_id);
        let items = query::filter_by_tags(items, tag_ids);
        let items = query::sort_by_order(items);
        tracing::debug!(
            "Resolved {} menu items (category: {:?}, tags: {:?})",
            items.len(),
            category_id,
            tag_ids
        );
        items
    }

    /// The lunch menu for today in the configured timezone
    pub async fn get_latest_lunch_menu(&self) -> Option<LunchMenu> {
        self.get_lunch_menu_on(query::today(self.timezone)).await
    }

    /// The lunch menu active on `date`, or the most recently started one
    pub async fn get_lunch_menu_on(&self, date: NaiveDate) -> Option<LunchMenu> {
        let menus = self.settle("lunch menus", self.source.lunch_menus().await);
        let menu = query::select_active_lunch_menu(&menus, date).cloned();
        match &menu {
            Some(menu) => tracing::debug!("Lunch menu for {}: {}", date, menu.title),
            None => tracing::warn!("No lunch menus available for {}", date),
        }
        menu
    }

    /// Team members sorted by order, at most `limit` of them
    pub async fn get_team_members(&self, limit: Option<usize>) -> Vec<TeamMember> {
        let members = self.settle("team members", self.source.team_members().await);
        query::limit(query::sort_by_order(members), limit)
    }

    /// Record a requested reordering of `collection`.
    ///
    /// Nothing is written: content files are owned by their authors and
    /// there is no write path yet.
    pub async fn update_content_order(&self, collection: &str, items: &[OrderUpdate]) {
        tracing::info!(
            "Update order for {} requested (not implemented): {:?}",
            collection,
            items
        );
    }

    fn settle<T>(&self, what: &str, result: Result<Vec<T>>) -> Vec<T> {
        match result {
            Ok(records) => records,
            Err(e) if e.is_storage_absent() => {
                tracing::warn!("No {} from {}: {}", what, self.source.name(), e);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Failed to fetch {} from {}: {}", what, self.source.name(), e);
                Vec::new()
            }
        }
    }
}
