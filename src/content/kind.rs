//! Content kinds and their storage conventions

use std::fmt;
use std::str::FromStr;

/// Extensions accepted for one-file-per-record kinds
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A logical category of record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    MenuCategories,
    MenuTags,
    MenuItems,
    TeamMembers,
    LunchMenus,
}

/// Where the records of a kind live below the content directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// One front-matter document per record
    PerRecord { extensions: &'static [&'static str] },
    /// A single YAML file (`<stem>.yaml` or `<stem>.yml`) with a list under `key`
    DataFile {
        stem: &'static str,
        key: &'static str,
        id_prefix: &'static str,
    },
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::MenuCategories,
        ContentKind::MenuTags,
        ContentKind::MenuItems,
        ContentKind::TeamMembers,
        ContentKind::LunchMenus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::MenuCategories => "categories",
            ContentKind::MenuTags => "tags",
            ContentKind::MenuItems => "items",
            ContentKind::TeamMembers => "team",
            ContentKind::LunchMenus => "lunch-menus",
        }
    }

    /// Directory below the content root
    pub fn relative_dir(&self) -> &'static str {
        match self {
            ContentKind::MenuCategories => "menu/categories",
            ContentKind::MenuTags => "menu/tags",
            ContentKind::MenuItems => "menu/items",
            ContentKind::TeamMembers => "team",
            ContentKind::LunchMenus => "lunch-menus",
        }
    }

    /// Path of the HTTP endpoint serving this kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            ContentKind::MenuCategories => "/content/menu/categories",
            ContentKind::MenuTags => "/content/menu/tags",
            ContentKind::MenuItems => "/content/menu/items",
            ContentKind::TeamMembers => "/content/team",
            ContentKind::LunchMenus => "/content/lunch-menus",
        }
    }

    /// Key holding the empty fallback array in an error response
    pub fn collection_key(&self) -> &'static str {
        match self {
            ContentKind::MenuCategories => "categories",
            ContentKind::MenuTags => "tags",
            ContentKind::MenuItems => "items",
            ContentKind::TeamMembers => "members",
            ContentKind::LunchMenus => "menus",
        }
    }

    pub fn storage(&self) -> Storage {
        match self {
            ContentKind::MenuCategories => Storage::DataFile {
                stem: "categories",
                key: "categories",
                id_prefix: "category",
            },
            ContentKind::MenuTags => Storage::DataFile {
                stem: "tags",
                key: "tags",
                id_prefix: "tag",
            },
            ContentKind::MenuItems | ContentKind::TeamMembers | ContentKind::LunchMenus => {
                Storage::PerRecord {
                    extensions: DOCUMENT_EXTENSIONS,
                }
            }
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" | "categories" => Ok(ContentKind::MenuCategories),
            "tag" | "tags" => Ok(ContentKind::MenuTags),
            "item" | "items" | "menu" => Ok(ContentKind::MenuItems),
            "team" | "member" | "members" => Ok(ContentKind::TeamMembers),
            "lunch" | "lunch-menu" | "lunch-menus" => Ok(ContentKind::LunchMenus),
            other => {
                let available: Vec<&str> = ContentKind::ALL.iter().map(|k| k.as_str()).collect();
                Err(format!(
                    "Unknown content type: {}. Available: {}",
                    other,
                    available.join(", ")
                ))
            }
        }
    }
}
