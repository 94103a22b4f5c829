//! HTTP content source, reading the JSON endpoints of a running server

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::ContentSource;
use crate::content::{ContentKind, LunchMenu, MenuCategory, MenuItem, MenuTag, TeamMember};
use crate::error::{ContentError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches records from `<base_url>/content/...`
#[derive(Debug, Clone)]
pub struct HttpApiSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApiSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, kind: ContentKind) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, kind.endpoint());
        tracing::debug!("Fetching {} from {}", kind, url);

        let transport = |message: String| ContentError::Transport {
            url: url.clone(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;
        let status = response.status();

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => return Err(transport(format!("status {}", status))),
            Err(e) => return Err(transport(format!("invalid JSON body: {}", e))),
        };

        match body {
            Value::Array(entries) => Ok(entries
                .into_iter()
                .filter_map(|entry| match serde_json::from_value(entry) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!("Skipping malformed {} record from {}: {}", kind, url, e);
                        None
                    }
                })
                .collect()),
            Value::Object(map) => {
                let message = map
                    .get("error")
                    .or_else(|| map.get("message"))
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));
                match message {
                    Some(message) => Err(ContentError::Remote(message)),
                    None => Err(transport(format!("status {}: unexpected object body", status))),
                }
            }
            _ => Err(transport(format!("status {}: unexpected body", status))),
        }
    }
}

#[async_trait]
impl ContentSource for HttpApiSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn menu_categories(&self) -> Result<Vec<MenuCategory>> {
        self.fetch(ContentKind::MenuCategories).await
    }

    async fn menu_tags(&self) -> Result<Vec<MenuTag>> {
        self.fetch(ContentKind::MenuTags).await
    }

    async fn menu_items(&self) -> Result<Vec<MenuItem>> {
        self.fetch(ContentKind::MenuItems).await
    }

    async fn team_members(&self) -> Result<Vec<TeamMember>> {
        self.fetch(ContentKind::TeamMembers).await
    }

    async fn lunch_menus(&self) -> Result<Vec<LunchMenu>> {
        self.fetch(ContentKind::LunchMenus).await
    }
}
