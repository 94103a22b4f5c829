//! JSON content API

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::ContentKind;
use crate::error::ContentError;
use crate::query;
use crate::source::{ContentSource, FileSystemSource};
use crate::Restaurant;

/// Server state
struct ServerState {
    source: Arc<dyn ContentSource>,
    timezone: Option<Tz>,
}

#[derive(Debug, Default, Deserialize)]
struct ItemsQuery {
    category: Option<String>,
    /// Comma separated tag ids
    tags: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamQuery {
    /// Kept as text so a malformed value lists everyone instead of
    /// rejecting the request
    limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ActiveQuery {
    date: Option<String>,
}

/// Build the content API router over `source`
pub fn router(source: Arc<dyn ContentSource>, timezone: Option<Tz>) -> Router {
    let state = Arc::new(ServerState { source, timezone });

    Router::new()
        .route(ContentKind::MenuCategories.endpoint(), get(categories_handler))
        .route(ContentKind::MenuTags.endpoint(), get(tags_handler))
        .route(ContentKind::MenuItems.endpoint(), get(items_handler))
        .route(ContentKind::TeamMembers.endpoint(), get(team_handler))
        .route(ContentKind::LunchMenus.endpoint(), get(lunch_menus_handler))
        .route("/content/lunch-menus/active", get(active_lunch_menu_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the content server for a site
pub async fn start(restaurant: &Restaurant, ip: &str, port: u16) -> Result<()> {
    let source = FileSystemSource::for_restaurant(restaurant);
    let app = router(Arc::new(source), restaurant.config.tz());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving {} content at http://{}:{}", restaurant.config.title, ip, port);
    println!("Content directory: {}", restaurant.content_dir.display());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn categories_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.source.menu_categories().await {
        Ok(categories) => Json(query::sort_by_order(categories)).into_response(),
        Err(e) => error_response(ContentKind::MenuCategories, e),
    }
}

async fn tags_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.source.menu_tags().await {
        Ok(tags) => Json(tags).into_response(),
        Err(e) => error_response(ContentKind::MenuTags, e),
    }
}

async fn items_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ItemsQuery>,
) -> Response {
    let items = match state.source.menu_items().await {
        Ok(items) => items,
        Err(e) => return error_response(ContentKind::MenuItems, e),
    };

    let tag_ids: Vec<String> = params
        .tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    let category = params.category.as_deref().filter(|c| !c.is_empty());
    let items = query::filter_by_category(items, category);
    let items = query::filter_by_tags(items, Some(tag_ids.as_slice()));
    Json(query::sort_by_order(items)).into_response()
}

async fn team_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<TeamQuery>,
) -> Response {
    match state.source.team_members().await {
        Ok(members) => {
            let limit = params
                .limit
                .as_deref()
                .and_then(|n| n.trim().parse::<i64>().ok())
                .and_then(|n| usize::try_from(n).ok());
            Json(query::limit(query::sort_by_order(members), limit)).into_response()
        }
        Err(e) => error_response(ContentKind::TeamMembers, e),
    }
}

async fn lunch_menus_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.source.lunch_menus().await {
        Ok(menus) => Json(query::sort_lunch_menus_newest_first(menus)).into_response(),
        Err(e) => error_response(ContentKind::LunchMenus, e),
    }
}

async fn active_lunch_menu_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ActiveQuery>,
) -> Response {
    let date = match params.date.as_deref().map(str::trim) {
        None | Some("") => query::today(state.timezone),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                let body = ErrorBody::new(format!("Invalid date {:?}: {}", raw, e));
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
        },
    };

    match state.source.lunch_menus().await {
        Ok(menus) => Json(query::select_active_lunch_menu(&menus, date)).into_response(),
        Err(e) => error_response(ContentKind::LunchMenus, e),
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(flatten)]
    fallback: serde_json::Map<String, serde_json::Value>,
}

impl ErrorBody {
    fn new(error: String) -> Self {
        Self {
            error,
            fallback: serde_json::Map::new(),
        }
    }

    fn with_empty(mut self, key: &str) -> Self {
        self.fallback
            .insert(key.to_string(), serde_json::Value::Array(Vec::new()));
        self
    }
}

/// Error object carrying the message and an empty collection under the
/// kind's conventional key
fn error_response(kind: ContentKind, error: ContentError) -> Response {
    tracing::error!("Failed to fetch {}: {}", kind, error);
    let body = ErrorBody::new(format!("Failed to fetch {}: {}", kind, error))
        .with_empty(kind.collection_key());
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
