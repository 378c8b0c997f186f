use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Location;

const GEOCODE_API: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeCandidate {
    /// Maps the first geocoding candidate into a [`Location`] for `query`.
    /// The id is filled in by the store on insert.
    #[must_use]
    pub fn into_location(self, query: &str) -> Location {
        Location {
            id: 0,
            search_query: query.to_string(),
            formatted_query: self.formatted_address,
            latitude: self.geometry.location.lat,
            longitude: self.geometry.location.lng,
        }
    }
}

/// Seam over the geocoding provider so the location resolver can be
/// exercised without the network.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>>;
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl Geocoder for GeocodeClient {
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>> {
        let url = format!(
            "{}?address={}&key={}",
            GEOCODE_API,
            urlencoding::encode(query),
            self.api_key
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Geocoding API error: {} - {}", status, body));
        }

        let response: GeocodeResponse = response.json().await?;

        Ok(response.results)
    }
}
