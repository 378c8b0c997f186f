use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlaceQuery};
use crate::cache::EventCategory;
use crate::models::Event;

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let query = params.place()?;
    let location = state.shared.locations.resolve(query).await?;
    let ttl = state.config().read().await.cache.events_ttl();

    let eventbrite = state.shared.eventbrite.clone();
    let (latitude, longitude) = (location.latitude, location.longitude);

    let events = state
        .shared
        .resolver
        .resolve(&EventCategory, location.id, ttl, move || async move {
            eventbrite.events(latitude, longitude).await
        })
        .await?;

    Ok(Json(ApiResponse::success(events)))
}
