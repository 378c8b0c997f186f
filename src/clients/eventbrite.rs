use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Event;

const EVENTBRITE_API: &str = "https://www.eventbriteapi.com/v3/events/search/";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    events: Vec<EventEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    url: String,
    name: TextField,
    start: Option<StartBlock>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextField {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StartBlock {
    local: String,
}

#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    api_key: String,
}

impl EventbriteClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    pub async fn events(&self, latitude: f64, longitude: f64) -> Result<Vec<Event>> {
        let url = format!(
            "{}?location.latitude={}&location.longitude={}&expand=venue",
            EVENTBRITE_API, latitude, longitude
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
            return Err(anyhow::anyhow!(
                "Eventbrite API error: {} - {}",
                status,
                body
            ));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response
            .events
            .into_iter()
            .map(|entry| Event {
                link: entry.url,
                name: entry.name.text.unwrap_or_default(),
                event_date: entry.start.map(|s| s.local).unwrap_or_default(),
                summary: entry.summary.unwrap_or_default(),
            })
            .collect())
    }
}
