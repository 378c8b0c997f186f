use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::CacheResolver;
use crate::clients::darksky::DarkskyClient;
use crate::clients::eventbrite::EventbriteClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::hiking::HikingClient;
use crate::clients::tmdb::TmdbClient;
use crate::clients::yelp::YelpClient;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::db::Store;
use crate::services::LocationService;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across all provider clients for connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub resolver: CacheResolver,

    pub locations: Arc<LocationService>,

    pub darksky: Arc<DarkskyClient>,

    pub yelp: Arc<YelpClient>,

    pub eventbrite: Arc<EventbriteClient>,

    pub hiking: Arc<HikingClient>,

    pub tmdb: Arc<TmdbClient>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.providers.request_timeout_seconds)?;

        let geocode = Arc::new(GeocodeClient::new(
            http_client.clone(),
            config.providers.geocode_api_key.clone(),
        ));
        let darksky = Arc::new(DarkskyClient::new(
            http_client.clone(),
            config.providers.darksky_api_key.clone(),
        ));
        let yelp = Arc::new(YelpClient::new(
            http_client.clone(),
            config.providers.yelp_api_key.clone(),
        ));
        let eventbrite = Arc::new(EventbriteClient::new(
            http_client.clone(),
            config.providers.eventbrite_api_key.clone(),
        ));
        let hiking = Arc::new(HikingClient::new(
            http_client.clone(),
            config.providers.hiking_api_key.clone(),
        ));
        let tmdb = Arc::new(TmdbClient::new(
            http_client,
            config.providers.tmdb_api_key.clone(),
        ));

        let resolver = CacheResolver::new(store.conn.clone());
        let locations = Arc::new(LocationService::new(store.clone(), geocode));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            resolver,
            locations,
            darksky,
            yelp,
            eventbrite,
            hiking,
            tmdb,
        })
    }
}
