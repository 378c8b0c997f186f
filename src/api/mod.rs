use axum::{Router, http::HeaderValue, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod error;
pub mod events;
pub mod location;
pub mod movies;
pub mod restaurants;
pub mod system;
pub mod trails;
mod types;
pub mod weather;

pub use error::ApiError;
pub use types::*;

use serde::Deserialize;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared).await)
}

/// Query string shared by every category endpoint: the raw place name.
#[derive(Debug, Deserialize)]
pub struct PlaceQuery {
    pub query: Option<String>,
}

impl PlaceQuery {
    /// Rejects missing or blank place names before any lookup happens.
    pub fn place(&self) -> Result<&str, ApiError> {
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => Ok(q),
            _ => Err(ApiError::validation("missing 'query' parameter")),
        }
    }
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let api_router = Router::new()
        .route("/location", get(location::get_location))
        .route("/weather", get(weather::get_weather))
        .route("/restaurants", get(restaurants::get_restaurants))
        .route("/events", get(events::get_events))
        .route("/trails", get(trails::get_trails))
        .route("/movies", get(movies::get_movies))
        .route("/system/status", get(system::get_status))
        .route("/system/config", get(system::get_config))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .fallback(fallback)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn fallback() -> ApiError {
    ApiError::NotFound("no such route".to_string())
}
