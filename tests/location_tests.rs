//! Integration tests for one-shot location resolution with a fake geocoder.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use cityscout::clients::geocode::{GeocodeCandidate, Geocoder, Geometry, LatLng};
use cityscout::db::Store;
use cityscout::models::Location;
use cityscout::services::{LocationError, LocationService};

async fn spawn_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("failed to create in-memory store")
}

fn seattle_candidate() -> GeocodeCandidate {
    GeocodeCandidate {
        formatted_address: "Seattle, WA, USA".to_string(),
        geometry: Geometry {
            location: LatLng {
                lat: 47.6062,
                lng: -122.3321,
            },
        },
    }
}

/// Geocoder returning a canned candidate list and counting calls.
struct FakeGeocoder {
    calls: AtomicUsize,
    fail: bool,
    empty: bool,
}

impl FakeGeocoder {
    fn returning_seattle() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
            empty: false,
        }
    }

    const fn count(&self) -> &AtomicUsize {
        &self.calls
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, _query: &str) -> anyhow::Result<Vec<GeocodeCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow::anyhow!("dns failure"));
        }
        if self.empty {
            return Ok(Vec::new());
        }
        Ok(vec![seattle_candidate()])
    }
}

#[tokio::test]
async fn first_lookup_geocodes_inserts_and_returns_populated_id() {
    let store = spawn_store().await;
    let geocoder = Arc::new(FakeGeocoder::returning_seattle());
    let service = LocationService::new(store.clone(), geocoder.clone());

    let location = service
        .resolve("seattle")
        .await
        .expect("first lookup should succeed");

    assert!(location.id > 0, "id must be populated by the store");
    assert_eq!(location.search_query, "seattle");
    assert_eq!(location.formatted_query, "Seattle, WA, USA");
    assert_eq!(geocoder.count().load(Ordering::SeqCst), 1);

    let stored = store
        .locations()
        .find_by_query("seattle")
        .await
        .expect("find should succeed")
        .expect("row should exist");
    assert_eq!(stored, location);
}

#[tokio::test]
async fn stored_query_never_calls_the_geocoder() {
    let store = spawn_store().await;
    let geocoder = Arc::new(FakeGeocoder::returning_seattle());
    let service = LocationService::new(store.clone(), geocoder.clone());

    let first = service.resolve("seattle").await.expect("first lookup");
    let second = service.resolve("seattle").await.expect("second lookup");

    assert_eq!(first, second);
    assert_eq!(geocoder.count().load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_candidate_list_is_a_not_found_error() {
    let store = spawn_store().await;
    let geocoder = Arc::new(FakeGeocoder {
        calls: AtomicUsize::new(0),
        fail: false,
        empty: true,
    });
    let service = LocationService::new(store, geocoder);

    match service.resolve("nowhere").await {
        Err(LocationError::NoResults(query)) => assert_eq!(query, "nowhere"),
        other => panic!("expected NoResults, got {other:?}"),
    }
}

#[tokio::test]
async fn geocoder_failure_propagates() {
    let store = spawn_store().await;
    let geocoder = Arc::new(FakeGeocoder {
        calls: AtomicUsize::new(0),
        fail: true,
        empty: false,
    });
    let service = LocationService::new(store, geocoder);

    assert!(matches!(
        service.resolve("seattle").await,
        Err(LocationError::Provider(_))
    ));
}

#[tokio::test]
async fn duplicate_inserts_converge_on_the_first_writer() {
    let store = spawn_store().await;
    let repo = store.locations();

    let location = Location {
        id: 0,
        search_query: "portland".to_string(),
        formatted_query: "Portland, OR, USA".to_string(),
        latitude: 45.5152,
        longitude: -122.6784,
    };

    let first = repo
        .insert_or_keep(&location)
        .await
        .expect("insert should succeed")
        .expect("row should exist");

    // A racing second writer keeps the existing row.
    let mut rival = location.clone();
    rival.formatted_query = "Portland, Oregon".to_string();
    let second = repo
        .insert_or_keep(&rival)
        .await
        .expect("insert should succeed")
        .expect("row should exist");

    assert_eq!(first.id, second.id);
    assert_eq!(second.formatted_query, "Portland, OR, USA");
}
