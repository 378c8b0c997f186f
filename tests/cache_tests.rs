//! Integration tests for the cache-aside resolver against an in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use cityscout::cache::{
    CacheCategory, CacheResolver, CachedRow, ForecastCategory, PlaceCategory, ResolveError, now_ms,
};
use cityscout::db::Store;
use cityscout::models::{Forecast, Place};

const TTL: Duration = Duration::from_millis(15_000);
const LOCATION_ID: i32 = 1;

async fn spawn_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("failed to create in-memory store")
}

fn sample_forecasts() -> Vec<Forecast> {
    vec![
        Forecast {
            forecast: "Partly cloudy".to_string(),
            time: "Mon Aug 24 2026".to_string(),
        },
        Forecast {
            forecast: "Light rain".to_string(),
            time: "Tue Aug 25 2026".to_string(),
        },
    ]
}

fn fresh_forecasts() -> Vec<Forecast> {
    vec![Forecast {
        forecast: "Clear skies".to_string(),
        time: "Wed Aug 26 2026".to_string(),
    }]
}

/// Fetch function that counts invocations and returns a fixed item set.
fn counting_fetch<T: Clone + Send + 'static>(
    calls: &Arc<AtomicUsize>,
    items: Vec<T>,
) -> impl FnOnce() -> std::pin::Pin<Box<dyn Future<Output = anyhow::Result<Vec<T>>> + Send>> {
    let calls = Arc::clone(calls);
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(items) })
    }
}

#[tokio::test]
async fn cold_miss_fetches_persists_and_returns() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());
    let calls = Arc::new(AtomicUsize::new(0));

    let items = resolver
        .resolve(
            &ForecastCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, sample_forecasts()),
        )
        .await
        .expect("cold miss should succeed");

    assert_eq!(items, sample_forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let rows = ForecastCategory
        .load(&store.conn, LOCATION_ID)
        .await
        .expect("load should succeed");
    assert_eq!(rows.len(), 2);
    // The whole batch shares one timestamp.
    assert_eq!(rows[0].created_at, rows[1].created_at);
}

#[tokio::test]
async fn warm_hit_within_ttl_returns_stored_rows_without_fetching() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());
    let calls = Arc::new(AtomicUsize::new(0));

    resolver
        .resolve(
            &ForecastCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, sample_forecasts()),
        )
        .await
        .expect("cold miss should succeed");

    let warm = resolver
        .resolve(
            &ForecastCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, fresh_forecasts()),
        )
        .await
        .expect("warm hit should succeed");

    // Round trip: the warm read returns the identical item set, and the
    // provider was only consulted for the initial miss.
    assert_eq!(warm, sample_forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rows_older_than_ttl_are_replaced_by_a_single_refetch() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());

    // Seed a batch written 20s ago against a 15s TTL.
    let stale_at = now_ms() - 20_000;
    for item in sample_forecasts() {
        ForecastCategory
            .insert(&store.conn, LOCATION_ID, &item, stale_at)
            .await
            .expect("seed insert should succeed");
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let items = resolver
        .resolve(
            &ForecastCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, fresh_forecasts()),
        )
        .await
        .expect("stale resolution should succeed");

    assert_eq!(items, fresh_forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Only the fresh batch remains: no mixing of stale and fresh rows.
    let rows = ForecastCategory
        .load(&store.conn, LOCATION_ID)
        .await
        .expect("load should succeed");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].created_at > stale_at);
    assert_eq!(rows[0].item, fresh_forecasts()[0]);
}

#[tokio::test]
async fn rows_within_ttl_survive_a_resolution_at_two_thirds_of_the_ttl() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());

    // Batch written 10s ago against a 15s TTL: still warm.
    let seeded_at = now_ms() - 10_000;
    for item in sample_forecasts() {
        ForecastCategory
            .insert(&store.conn, LOCATION_ID, &item, seeded_at)
            .await
            .expect("seed insert should succeed");
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let items = resolver
        .resolve(
            &ForecastCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, fresh_forecasts()),
        )
        .await
        .expect("warm resolution should succeed");

    assert_eq!(items, sample_forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn provider_failure_on_cold_miss_propagates_and_writes_nothing() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());

    let result = resolver
        .resolve(&ForecastCategory, LOCATION_ID, TTL, || async {
            Err(anyhow::anyhow!("connection refused"))
        })
        .await;

    match result {
        Err(ResolveError::Provider { category, .. }) => assert_eq!(category, "forecasts"),
        other => panic!("expected provider error, got {other:?}"),
    }

    let rows = ForecastCategory
        .load(&store.conn, LOCATION_ID)
        .await
        .expect("load should succeed");
    assert!(rows.is_empty(), "failed fetch must not leave partial rows");
}

#[tokio::test]
async fn categories_are_isolated_per_table() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());
    let forecast_calls = Arc::new(AtomicUsize::new(0));
    let place_calls = Arc::new(AtomicUsize::new(0));

    resolver
        .resolve(
            &ForecastCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(&forecast_calls, sample_forecasts()),
        )
        .await
        .expect("forecast resolution should succeed");

    // A warm forecast batch does not satisfy a places lookup for the same
    // location; each category misses independently.
    let places = resolver
        .resolve(
            &PlaceCategory,
            LOCATION_ID,
            TTL,
            counting_fetch(
                &place_calls,
                vec![Place {
                    name: "Paseo".to_string(),
                    image_url: None,
                    price: Some("$$".to_string()),
                    rating: Some(4.5),
                    url: "https://example.com/paseo".to_string(),
                }],
            ),
        )
        .await
        .expect("place resolution should succeed");

    assert_eq!(places.len(), 1);
    assert_eq!(place_calls.load(Ordering::SeqCst), 1);
}

/// Category whose inserts always fail, for exercising best-effort writes.
struct BrokenWrites;

#[async_trait]
impl CacheCategory for BrokenWrites {
    type Item = Forecast;

    const NAME: &'static str = "broken";

    async fn load(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
    ) -> Result<Vec<CachedRow<Forecast>>, DbErr> {
        Ok(Vec::new())
    }

    async fn delete_batch(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
    ) -> Result<u64, DbErr> {
        Ok(0)
    }

    async fn insert(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
        _item: &Forecast,
        _created_at: i64,
    ) -> Result<(), DbErr> {
        Err(DbErr::Custom("disk full".to_string()))
    }
}

/// Category whose cache lookup always fails, for exercising the fatal-read
/// side of the contract.
struct BrokenReads;

#[async_trait]
impl CacheCategory for BrokenReads {
    type Item = Forecast;

    const NAME: &'static str = "broken-reads";

    async fn load(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
    ) -> Result<Vec<CachedRow<Forecast>>, DbErr> {
        Err(DbErr::Custom("connection pool exhausted".to_string()))
    }

    async fn delete_batch(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
    ) -> Result<u64, DbErr> {
        Ok(0)
    }

    async fn insert(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
        _item: &Forecast,
        _created_at: i64,
    ) -> Result<(), DbErr> {
        Ok(())
    }
}

#[tokio::test]
async fn store_read_failure_is_fatal_and_never_reaches_the_provider() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());
    let calls = Arc::new(AtomicUsize::new(0));

    let result = resolver
        .resolve(
            &BrokenReads,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, sample_forecasts()),
        )
        .await;

    assert!(matches!(result, Err(ResolveError::Store(_))));
    assert_eq!(
        calls.load(Ordering::SeqCst),
        0,
        "a failed lookup must not trigger a fetch"
    );
}

/// Category that serves a stale batch but cannot delete it. Invalidation is
/// part of the read path: if it fails, serving or repopulating could mix two
/// batches, so the resolution must abort.
struct UndeletableBatch;

#[async_trait]
impl CacheCategory for UndeletableBatch {
    type Item = Forecast;

    const NAME: &'static str = "undeletable";

    async fn load(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
    ) -> Result<Vec<CachedRow<Forecast>>, DbErr> {
        Ok(sample_forecasts()
            .into_iter()
            .map(|item| CachedRow {
                item,
                created_at: now_ms() - 20_000,
            })
            .collect())
    }

    async fn delete_batch(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
    ) -> Result<u64, DbErr> {
        Err(DbErr::Custom("table is locked".to_string()))
    }

    async fn insert(
        &self,
        _conn: &DatabaseConnection,
        _location_id: i32,
        _item: &Forecast,
        _created_at: i64,
    ) -> Result<(), DbErr> {
        Ok(())
    }
}

#[tokio::test]
async fn failed_invalidation_delete_is_fatal_and_skips_the_refetch() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());
    let calls = Arc::new(AtomicUsize::new(0));

    let result = resolver
        .resolve(
            &UndeletableBatch,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, fresh_forecasts()),
        )
        .await;

    assert!(matches!(result, Err(ResolveError::Store(_))));
    assert_eq!(
        calls.load(Ordering::SeqCst),
        0,
        "the stale rows must not be refetched past a failed delete"
    );
}

#[tokio::test]
async fn insert_failures_are_swallowed_and_items_still_returned() {
    let store = spawn_store().await;
    let resolver = CacheResolver::new(store.conn.clone());
    let calls = Arc::new(AtomicUsize::new(0));

    let items = resolver
        .resolve(
            &BrokenWrites,
            LOCATION_ID,
            TTL,
            counting_fetch(&calls, sample_forecasts()),
        )
        .await
        .expect("write failures must not fail the resolution");

    assert_eq!(items, sample_forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
