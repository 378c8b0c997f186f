//! Cache-aside layer fronting every provider call.
//!
//! The resolver is category-agnostic: everything category-specific (table,
//! item shape, TTL) lives behind [`CacheCategory`], implemented once per
//! cached data domain in [`categories`].

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub mod categories;

pub use categories::{EventCategory, ForecastCategory, PlaceCategory, TrailCategory};

/// Errors surfaced by a cache resolution.
///
/// Reads (including the invalidation delete) are fatal; repopulation writes
/// are not part of this taxonomy because they are logged and swallowed.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("store error: {0}")]
    Store(#[from] DbErr),

    #[error("{category} provider error: {source}")]
    Provider {
        category: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// A stored item together with its batch timestamp.
pub struct CachedRow<T> {
    pub item: T,
    /// Epoch milliseconds at which the batch was written.
    pub created_at: i64,
}

/// Per-category persistence operations driven by the resolver.
///
/// Implementations are zero-sized; the trait doubles as the declarative
/// per-category configuration (table, shape, TTL source).
#[async_trait]
pub trait CacheCategory: Send + Sync {
    type Item: Clone + Send + Sync;

    const NAME: &'static str;

    async fn load(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<Vec<CachedRow<Self::Item>>, DbErr>;

    async fn delete_batch(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<u64, DbErr>;

    async fn insert(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
        item: &Self::Item,
        created_at: i64,
    ) -> Result<(), DbErr>;
}

/// Current time in epoch milliseconds, the unit all TTL math uses.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Clone)]
pub struct CacheResolver {
    conn: DatabaseConnection,
}

impl CacheResolver {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Resolves `(category, location_id)` against the store, refetching from
    /// the provider on a cold or stale miss.
    ///
    /// Staleness is judged from the first stored row only; batches are always
    /// written with one shared timestamp, so the first row stands for the set.
    /// The comparison is plain epoch-millisecond subtraction.
    pub async fn resolve<C, F, Fut>(
        &self,
        category: &C,
        location_id: i32,
        ttl: Duration,
        fetch: F,
    ) -> Result<Vec<C::Item>, ResolveError>
    where
        C: CacheCategory,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = anyhow::Result<Vec<C::Item>>> + Send,
    {
        let rows = category.load(&self.conn, location_id).await?;

        if let Some(first) = rows.first() {
            let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
            let age_ms = now_ms().saturating_sub(first.created_at);

            if age_ms <= ttl_ms {
                debug!(
                    category = C::NAME,
                    location_id, age_ms, "warm hit, serving stored rows"
                );
                return Ok(rows.into_iter().map(|row| row.item).collect());
            }

            debug!(
                category = C::NAME,
                location_id, age_ms, "stale batch, invalidating"
            );

            // The delete must finish before the refetch starts; serving or
            // repopulating alongside stale rows could mix two batches.
            category.delete_batch(&self.conn, location_id).await?;
        }

        self.fetch_and_store(category, location_id, fetch).await
    }

    /// Cold-miss path: fetch from the provider, then persist best-effort.
    ///
    /// A provider failure propagates before anything is written. Individual
    /// insert failures are logged and swallowed; the fetched items are
    /// returned to the caller either way (fatal read, non-fatal write).
    async fn fetch_and_store<C, F, Fut>(
        &self,
        category: &C,
        location_id: i32,
        fetch: F,
    ) -> Result<Vec<C::Item>, ResolveError>
    where
        C: CacheCategory,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = anyhow::Result<Vec<C::Item>>> + Send,
    {
        let items = fetch().await.map_err(|source| ResolveError::Provider {
            category: C::NAME,
            source,
        })?;

        debug!(
            category = C::NAME,
            location_id,
            count = items.len(),
            "fetched from provider, repopulating cache"
        );

        let created_at = now_ms();
        for item in &items {
            if let Err(err) = category
                .insert(&self.conn, location_id, item, created_at)
                .await
            {
                warn!(
                    category = C::NAME,
                    location_id, "failed to persist cached row: {err}"
                );
            }
        }

        Ok(items)
    }
}
