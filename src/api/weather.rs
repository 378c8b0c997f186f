use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlaceQuery};
use crate::cache::ForecastCategory;
use crate::models::Forecast;

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<ApiResponse<Vec<Forecast>>>, ApiError> {
    let query = params.place()?;
    let location = state.shared.locations.resolve(query).await?;
    let ttl = state.config().read().await.cache.forecast_ttl();

    let darksky = state.shared.darksky.clone();
    let (latitude, longitude) = (location.latitude, location.longitude);

    let forecasts = state
        .shared
        .resolver
        .resolve(&ForecastCategory, location.id, ttl, move || async move {
            darksky.daily_forecast(latitude, longitude).await
        })
        .await?;

    Ok(Json(ApiResponse::success(forecasts)))
}
