//! The per-category configuration table: one zero-sized [`CacheCategory`]
//! implementation per cached data domain, mapping between the canonical item
//! shape and its sea-orm entity.
//!
//! Films are deliberately absent: they are read-through only and never touch
//! the store.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{CacheCategory, CachedRow};
use crate::entities::{events, forecasts, places, prelude::*, trails};
use crate::models::{Event, Forecast, Place, Trail};

pub struct ForecastCategory;

#[async_trait]
impl CacheCategory for ForecastCategory {
    type Item = Forecast;

    const NAME: &'static str = "forecasts";

    async fn load(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<Vec<CachedRow<Forecast>>, DbErr> {
        let rows = Forecasts::find()
            .filter(forecasts::Column::LocationId.eq(location_id))
            .order_by_asc(forecasts::Column::Id)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CachedRow {
                item: Forecast {
                    forecast: row.forecast,
                    time: row.time,
                },
                created_at: row.created_at,
            })
            .collect())
    }

    async fn delete_batch(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<u64, DbErr> {
        let result = Forecasts::delete_many()
            .filter(forecasts::Column::LocationId.eq(location_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
        item: &Forecast,
        created_at: i64,
    ) -> Result<(), DbErr> {
        let active_model = forecasts::ActiveModel {
            location_id: Set(location_id),
            forecast: Set(item.forecast.clone()),
            time: Set(item.time.clone()),
            created_at: Set(created_at),
            ..Default::default()
        };
        Forecasts::insert(active_model).exec(conn).await?;
        Ok(())
    }
}

pub struct PlaceCategory;

#[async_trait]
impl CacheCategory for PlaceCategory {
    type Item = Place;

    const NAME: &'static str = "places";

    async fn load(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<Vec<CachedRow<Place>>, DbErr> {
        let rows = Places::find()
            .filter(places::Column::LocationId.eq(location_id))
            .order_by_asc(places::Column::Id)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CachedRow {
                item: Place {
                    name: row.name,
                    image_url: row.image_url,
                    price: row.price,
                    rating: row.rating,
                    url: row.url,
                },
                created_at: row.created_at,
            })
            .collect())
    }

    async fn delete_batch(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<u64, DbErr> {
        let result = Places::delete_many()
            .filter(places::Column::LocationId.eq(location_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
        item: &Place,
        created_at: i64,
    ) -> Result<(), DbErr> {
        let active_model = places::ActiveModel {
            location_id: Set(location_id),
            name: Set(item.name.clone()),
            image_url: Set(item.image_url.clone()),
            price: Set(item.price.clone()),
            rating: Set(item.rating),
            url: Set(item.url.clone()),
            created_at: Set(created_at),
            ..Default::default()
        };
        Places::insert(active_model).exec(conn).await?;
        Ok(())
    }
}

pub struct EventCategory;

#[async_trait]
impl CacheCategory for EventCategory {
    type Item = Event;

    const NAME: &'static str = "events";

    async fn load(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<Vec<CachedRow<Event>>, DbErr> {
        let rows = Events::find()
            .filter(events::Column::LocationId.eq(location_id))
            .order_by_asc(events::Column::Id)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CachedRow {
                item: Event {
                    link: row.link,
                    name: row.name,
                    event_date: row.event_date,
                    summary: row.summary,
                },
                created_at: row.created_at,
            })
            .collect())
    }

    async fn delete_batch(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<u64, DbErr> {
        let result = Events::delete_many()
            .filter(events::Column::LocationId.eq(location_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
        item: &Event,
        created_at: i64,
    ) -> Result<(), DbErr> {
        let active_model = events::ActiveModel {
            location_id: Set(location_id),
            link: Set(item.link.clone()),
            name: Set(item.name.clone()),
            event_date: Set(item.event_date.clone()),
            summary: Set(item.summary.clone()),
            created_at: Set(created_at),
            ..Default::default()
        };
        Events::insert(active_model).exec(conn).await?;
        Ok(())
    }
}

pub struct TrailCategory;

#[async_trait]
impl CacheCategory for TrailCategory {
    type Item = Trail;

    const NAME: &'static str = "trails";

    async fn load(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<Vec<CachedRow<Trail>>, DbErr> {
        let rows = Trails::find()
            .filter(trails::Column::LocationId.eq(location_id))
            .order_by_asc(trails::Column::Id)
            .all(conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CachedRow {
                item: Trail {
                    name: row.name,
                    location: row.location,
                    length: row.length,
                    stars: row.stars,
                    star_votes: row.star_votes,
                    summary: row.summary,
                    trail_url: row.trail_url,
                    conditions: row.conditions,
                    condition_date: row.condition_date,
                    condition_time: row.condition_time,
                },
                created_at: row.created_at,
            })
            .collect())
    }

    async fn delete_batch(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
    ) -> Result<u64, DbErr> {
        let result = Trails::delete_many()
            .filter(trails::Column::LocationId.eq(location_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        conn: &DatabaseConnection,
        location_id: i32,
        item: &Trail,
        created_at: i64,
    ) -> Result<(), DbErr> {
        let active_model = trails::ActiveModel {
            location_id: Set(location_id),
            name: Set(item.name.clone()),
            location: Set(item.location.clone()),
            length: Set(item.length),
            stars: Set(item.stars),
            star_votes: Set(item.star_votes),
            summary: Set(item.summary.clone()),
            trail_url: Set(item.trail_url.clone()),
            conditions: Set(item.conditions.clone()),
            condition_date: Set(item.condition_date.clone()),
            condition_time: Set(item.condition_time.clone()),
            created_at: Set(created_at),
            ..Default::default()
        };
        Trails::insert(active_model).exec(conn).await?;
        Ok(())
    }
}
