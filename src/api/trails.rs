use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlaceQuery};
use crate::cache::TrailCategory;
use crate::models::Trail;

pub async fn get_trails(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<ApiResponse<Vec<Trail>>>, ApiError> {
    let query = params.place()?;
    let location = state.shared.locations.resolve(query).await?;
    let ttl = state.config().read().await.cache.trails_ttl();

    let hiking = state.shared.hiking.clone();
    let (latitude, longitude) = (location.latitude, location.longitude);

    let trails = state
        .shared
        .resolver
        .resolve(&TrailCategory, location.id, ttl, move || async move {
            hiking.trails(latitude, longitude).await
        })
        .await?;

    Ok(Json(ApiResponse::success(trails)))
}
