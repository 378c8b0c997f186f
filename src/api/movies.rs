use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlaceQuery};
use crate::models::Film;

/// Films are read-through only: the location is still resolved through the
/// store, but the TMDb results are never persisted and carry no TTL.
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<ApiResponse<Vec<Film>>>, ApiError> {
    let query = params.place()?;
    let location = state.shared.locations.resolve(query).await?;

    let films = state
        .shared
        .tmdb
        .search_by_city(location.city_name())
        .await
        .map_err(|e| ApiError::ExternalApiError {
            service: "tmdb".to_string(),
            message: e.to_string(),
        })?;

    Ok(Json(ApiResponse::success(films)))
}
