use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::models::Film;

const TMDB_API: &str = "https://api.themoviedb.org/3/search/movie";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w200_and_h300_bestv2";
const MAX_RESULTS: usize = 20;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<MovieEntry>,
}

#[derive(Debug, Deserialize)]
struct MovieEntry {
    title: String,
    overview: Option<String>,
    vote_average: f64,
    vote_count: i64,
    poster_path: Option<String>,
    popularity: f64,
    release_date: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Searches films by city name, most popular first, capped at 20.
    pub async fn search_by_city(&self, city: &str) -> Result<Vec<Film>> {
        let url = format!(
            "{}?api_key={}&query={}",
            TMDB_API,
            self.api_key,
            urlencoding::encode(city)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDb API error: {} - {}", status, body));
        }

        let response: SearchResponse = response.json().await?;

        let mut movies = response.results;
        movies.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(movies
            .into_iter()
            .take(MAX_RESULTS)
            .map(|movie| Film {
                title: movie.title,
                overview: movie.overview.unwrap_or_default(),
                average_votes: movie.vote_average,
                total_votes: movie.vote_count,
                image_url: movie
                    .poster_path
                    .map(|path| format!("{POSTER_BASE}{path}")),
                popularity: movie.popularity,
                released_on: movie.release_date.unwrap_or_default(),
            })
            .collect())
    }
}
