use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Forecast;

const DARKSKY_API: &str = "https://api.darksky.net/forecast";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    data: Vec<DailyForecast>,
}

#[derive(Debug, Deserialize)]
struct DailyForecast {
    summary: String,
    /// Epoch seconds.
    time: i64,
}

#[derive(Clone)]
pub struct DarkskyClient {
    client: Client,
    api_key: String,
}

impl DarkskyClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Fetches the daily forecast block and maps each day into the canonical
    /// [`Forecast`] shape.
    pub async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<Forecast>> {
        let url = format!(
            "{}/{}/{},{}",
            DARKSKY_API, self.api_key, latitude, longitude
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Darksky API error: {} - {}", status, body));
        }

        let response: ForecastResponse = response.json().await?;

        Ok(response
            .daily
            .data
            .into_iter()
            .map(|day| Forecast {
                forecast: day.summary,
                time: format_day(day.time),
            })
            .collect())
    }
}

fn format_day(epoch_seconds: i64) -> String {
    chrono::DateTime::from_timestamp(epoch_seconds, 0)
        .map(|dt| dt.format("%a %b %d %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::format_day;

    #[test]
    fn formats_epoch_seconds_as_date_string() {
        // 2026-08-24 12:00:00 UTC
        assert_eq!(format_day(1_787_572_800), "Mon Aug 24 2026");
    }
}
