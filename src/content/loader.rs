//! Content loader - reads every record of one content kind from disk

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::{self, DocumentFormat, Record};
use super::{ContentKind, LunchMenu, MenuCategory, MenuItem, MenuTag, Storage, TeamMember};
use crate::error::{ContentError, Result};

/// File name prefixes marking templates, partials and hidden files
const RESERVED_PREFIXES: &[char] = &['_', '.'];

/// Loads content from the content directory.
///
/// Records come back unsorted, in file-name order. A missing storage
/// location is reported as [`ContentError::StorageAbsent`] and a data file
/// without a readable list as [`ContentError::InvalidData`]; per-record
/// files that fail to parse are logged and skipped.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the records of `kind`
    pub fn dir_for(&self, kind: ContentKind) -> PathBuf {
        self.content_dir.join(kind.relative_dir())
    }

    pub fn load_categories(&self) -> Result<Vec<MenuCategory>> {
        self.load_typed(ContentKind::MenuCategories)
    }

    pub fn load_tags(&self) -> Result<Vec<MenuTag>> {
        self.load_typed(ContentKind::MenuTags)
    }

    pub fn load_menu_items(&self) -> Result<Vec<MenuItem>> {
        self.load_typed(ContentKind::MenuItems)
    }

    pub fn load_team_members(&self) -> Result<Vec<TeamMember>> {
        self.load_typed(ContentKind::TeamMembers)
    }

    /// Load lunch menus, dropping any whose start date is after its end date
    pub fn load_lunch_menus(&self) -> Result<Vec<LunchMenu>> {
        let menus: Vec<LunchMenu> = self.load_typed(ContentKind::LunchMenus)?;
        Ok(menus
            .into_iter()
            .filter(|menu| {
                if menu.has_valid_range() {
                    true
                } else {
                    tracing::warn!(
                        "Skipping lunch menu {}: startDate {} is after endDate {}",
                        menu.id,
                        menu.start_date,
                        menu.end_date
                    );
                    false
                }
            })
            .collect())
    }

    /// Load the normalized, untyped records of `kind`
    pub fn load_records(&self, kind: ContentKind) -> Result<Vec<Record>> {
        let dir = self.dir_for(kind);
        if !dir.is_dir() {
            return Err(ContentError::StorageAbsent(dir));
        }

        match kind.storage() {
            Storage::PerRecord { extensions } => self.load_documents(&dir, extensions),
            Storage::DataFile {
                stem,
                key,
                id_prefix,
            } => self.load_data_file(&dir, stem, key, id_prefix),
        }
    }

    fn load_typed<T: DeserializeOwned>(&self, kind: ContentKind) -> Result<Vec<T>> {
        let records = self.load_records(kind)?;
        let total = records.len();

        let typed: Vec<T> = records
            .into_iter()
            .filter_map(|record| {
                let id = record
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                match serde_json::from_value(Value::Object(record)) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!("Skipping {} record {:?}: {}", kind, id, e);
                        None
                    }
                }
            })
            .collect();

        tracing::debug!("Loaded {}/{} {} records", typed.len(), total, kind);
        Ok(typed)
    }

    fn load_documents(&self, dir: &Path, extensions: &[&str]) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        for path in list_files(dir, extensions)? {
            let file_name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    continue;
                }
            };

            if let Some(record) =
                frontmatter::normalize_file(&text, DocumentFormat::Frontmatter, &file_name)
            {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn load_data_file(
        &self,
        dir: &Path,
        stem: &str,
        key: &str,
        id_prefix: &str,
    ) -> Result<Vec<Record>> {
        let path = ["yaml", "yml"]
            .iter()
            .map(|ext| dir.join(format!("{}.{}", stem, ext)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ContentError::StorageAbsent(dir.join(format!("{}.yaml", stem))))?;

        let text = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
        let file_name = path.to_string_lossy().to_string();

        frontmatter::parse_data_list(&text, key, id_prefix, &file_name).map_err(|e| {
            let message = match e {
                ContentError::Parse { message, .. } => message,
                other => other.to_string(),
            };
            ContentError::InvalidData {
                path: path.clone(),
                message,
            }
        })
    }
}

/// Files directly inside `dir` with one of `extensions`, sorted by name
fn list_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("failed to list directory"));
                return Err(ContentError::io(dir, source));
            }
            Err(e) => {
                tracing::warn!("Failed to inspect entry in {:?}: {}", dir, e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || is_reserved(path) {
            continue;
        }
        if has_extension(path, extensions) {
            files.push(path.to_path_buf());
        } else {
            tracing::debug!("Ignoring {:?}: unexpected extension", path);
        }
    }

    Ok(files)
}

fn is_reserved(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with(RESERVED_PREFIXES))
        .unwrap_or(true)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
