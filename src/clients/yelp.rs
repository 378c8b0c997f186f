use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Place;

const YELP_API: &str = "https://api.yelp.com/v3/businesses/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
struct Business {
    name: String,
    image_url: Option<String>,
    price: Option<String>,
    rating: Option<f64>,
    url: String,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    api_key: String,
}

impl YelpClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    pub async fn restaurants(&self, latitude: f64, longitude: f64) -> Result<Vec<Place>> {
        let url = format!(
            "{}?term=restaurants&latitude={}&longitude={}&limit=20",
            YELP_API, latitude, longitude
        );
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Yelp API error: {} - {}", status, body));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response
            .businesses
            .into_iter()
            .map(|business| Place {
                name: business.name,
                image_url: business.image_url,
                price: business.price,
                rating: business.rating,
                url: business.url,
            })
            .collect())
    }
}
