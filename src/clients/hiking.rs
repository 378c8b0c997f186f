use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Trail;

const HIKING_API: &str = "https://www.hikingproject.com/data/get-trails";

#[derive(Debug, Deserialize)]
struct TrailsResponse {
    trails: Vec<TrailEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrailEntry {
    name: String,
    location: String,
    length: f64,
    stars: f64,
    star_votes: i32,
    summary: String,
    url: String,
    condition_status: Option<String>,
    /// "YYYY-MM-DD HH:MM:SS", or absent when no conditions were reported.
    condition_date: Option<String>,
}

#[derive(Clone)]
pub struct HikingClient {
    client: Client,
    api_key: String,
}

impl HikingClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    pub async fn trails(&self, latitude: f64, longitude: f64) -> Result<Vec<Trail>> {
        let url = format!(
            "{}?lat={}&lon={}&maxDistance=200&key={}",
            HIKING_API, latitude, longitude, self.api_key
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Hiking Project API error: {} - {}",
                status,
                body
            ));
        }

        let response: TrailsResponse = response.json().await?;

        Ok(response.trails.into_iter().map(map_trail).collect())
    }
}

fn map_trail(entry: TrailEntry) -> Trail {
    let (condition_date, condition_time) = entry
        .condition_date
        .as_deref()
        .and_then(|stamp| stamp.split_once(' '))
        .map_or_else(
            || (String::new(), String::new()),
            |(date, time)| (date.to_string(), time.to_string()),
        );

    Trail {
        name: entry.name,
        location: entry.location,
        length: entry.length,
        stars: entry.stars,
        star_votes: entry.star_votes,
        summary: entry.summary,
        trail_url: entry.url,
        conditions: entry.condition_status.unwrap_or_default(),
        condition_date,
        condition_time,
    }
}

#[cfg(test)]
mod tests {
    use super::{TrailEntry, map_trail};

    #[test]
    fn splits_condition_timestamp_into_date_and_time() {
        let entry = TrailEntry {
            name: "Rattlesnake Ledge".to_string(),
            location: "North Bend, Washington".to_string(),
            length: 4.3,
            stars: 4.4,
            star_votes: 84,
            summary: "A steady climb to a ledge view.".to_string(),
            url: "https://www.hikingproject.com/trail/7021679".to_string(),
            condition_status: Some("All Clear".to_string()),
            condition_date: Some("2026-08-20 14:05:00".to_string()),
        };

        let trail = map_trail(entry);
        assert_eq!(trail.condition_date, "2026-08-20");
        assert_eq!(trail.condition_time, "14:05:00");
        assert_eq!(trail.conditions, "All Clear");
    }

    #[test]
    fn missing_conditions_map_to_empty_strings() {
        let entry = TrailEntry {
            name: "Unknown".to_string(),
            location: String::new(),
            length: 0.0,
            stars: 0.0,
            star_votes: 0,
            summary: String::new(),
            url: String::new(),
            condition_status: None,
            condition_date: None,
        };

        let trail = map_trail(entry);
        assert!(trail.conditions.is_empty());
        assert!(trail.condition_date.is_empty());
        assert!(trail.condition_time.is_empty());
    }
}
