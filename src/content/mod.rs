//! Content module - data model, normalization and loading

pub mod frontmatter;
mod kind;
pub mod loader;
mod models;

pub use frontmatter::{DocumentFormat, Record};
pub use kind::{ContentKind, Storage};
pub use loader::ContentLoader;
pub use models::{
    LunchMenu, LunchMenuItem, MenuCategory, MenuItem, MenuTag, OrderUpdate, TeamMember,
    DEFAULT_ORDER,
};
