use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlaceQuery};
use crate::cache::PlaceCategory;
use crate::models::Place;

pub async fn get_restaurants(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<ApiResponse<Vec<Place>>>, ApiError> {
    let query = params.place()?;
    let location = state.shared.locations.resolve(query).await?;
    let ttl = state.config().read().await.cache.places_ttl();

    let yelp = state.shared.yelp.clone();
    let (latitude, longitude) = (location.latitude, location.longitude);

    let places = state
        .shared
        .resolver
        .resolve(&PlaceCategory, location.id, ttl, move || async move {
            yelp.restaurants(latitude, longitude).await
        })
        .await?;

    Ok(Json(ApiResponse::success(places)))
}
