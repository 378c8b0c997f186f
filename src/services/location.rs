//! One-shot location resolution: a degenerate cache-aside with no TTL.
//! Locations never expire, so a stored query is served forever.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::clients::geocode::Geocoder;
use crate::db::Store;
use crate::models::Location;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("no geocoding results for '{0}'")]
    NoResults(String),

    #[error("database error: {0}")]
    Store(#[from] sea_orm::DbErr),

    #[error("geocoding provider error: {0}")]
    Provider(#[source] anyhow::Error),
}

pub struct LocationService {
    store: Store,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationService {
    #[must_use]
    pub fn new(store: Store, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Returns the stored location for `search_query`, geocoding and
    /// persisting it on first sight. The geocoder is never consulted for a
    /// query that already has a row.
    pub async fn resolve(&self, search_query: &str) -> Result<Location, LocationError> {
        let repo = self.store.locations();

        if let Some(found) = repo.find_by_query(search_query).await? {
            debug!(search_query, "location served from store");
            return Ok(found);
        }

        let mut candidates = self
            .geocoder
            .geocode(search_query)
            .await
            .map_err(LocationError::Provider)?;

        if candidates.is_empty() {
            return Err(LocationError::NoResults(search_query.to_string()));
        }

        let location = candidates.remove(0).into_location(search_query);

        info!(
            search_query,
            formatted = %location.formatted_query,
            "geocoded new location"
        );

        // On a lost insert race the first writer's row comes back instead.
        repo.insert_or_keep(&location).await?.ok_or_else(|| {
            LocationError::Store(sea_orm::DbErr::RecordNotFound(format!(
                "location row missing after insert for '{search_query}'"
            )))
        })
    }
}
