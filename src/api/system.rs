use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, StatusDto};
use crate::config::Config;

pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<StatusDto>>, ApiError> {
    let database = state.store().ping().await.is_ok();

    let status = StatusDto {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database,
    };

    Ok(Json(ApiResponse::success(status)))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Config>>, ApiError> {
    let mut config = state.config().read().await.clone();

    for key in [
        &mut config.providers.geocode_api_key,
        &mut config.providers.darksky_api_key,
        &mut config.providers.yelp_api_key,
        &mut config.providers.eventbrite_api_key,
        &mut config.providers.hiking_api_key,
        &mut config.providers.tmdb_api_key,
    ] {
        if !key.is_empty() {
            *key = "*****".to_string();
        }
    }

    Ok(Json(ApiResponse::success(config)))
}
