use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlaceQuery};
use crate::models::Location;

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<ApiResponse<Location>>, ApiError> {
    let query = params.place()?;
    let location = state.shared.locations.resolve(query).await?;
    Ok(Json(ApiResponse::success(location)))
}
