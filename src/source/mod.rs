//! Content sources
//!
//! A [`ContentSource`] hands out the full, unsorted record set of each
//! content kind. Callers stay agnostic of where the records come from:
//!
//! - [`FileSystemSource`] reads the content directory directly and answers a
//!   missing storage location with the configured fallback data.
//! - [`HttpApiSource`] fetches the JSON content endpoints of a running server.

mod fs;
mod http;

pub use fs::FileSystemSource;
pub use http::HttpApiSource;

use async_trait::async_trait;

use crate::content::{LunchMenu, MenuCategory, MenuItem, MenuTag, TeamMember};
use crate::error::Result;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short label used in log messages
    fn name(&self) -> &str;

    async fn menu_categories(&self) -> Result<Vec<MenuCategory>>;

    async fn menu_tags(&self) -> Result<Vec<MenuTag>>;

    async fn menu_items(&self) -> Result<Vec<MenuItem>>;

    async fn team_members(&self) -> Result<Vec<TeamMember>>;

    async fn lunch_menus(&self) -> Result<Vec<LunchMenu>>;
}
