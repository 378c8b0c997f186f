use crate::entities::{locations, prelude::*};
use crate::models::Location;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: locations::Model) -> Location {
        Location {
            id: model.id,
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }

    pub async fn find_by_query(
        &self,
        search_query: &str,
    ) -> Result<Option<Location>, sea_orm::DbErr> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    /// Inserts a location, leaving any existing row for the same query in
    /// place. Returns the surviving row, so concurrent first lookups of one
    /// query all converge on the first writer's id.
    pub async fn insert_or_keep(
        &self,
        location: &Location,
    ) -> Result<Option<Location>, sea_orm::DbErr> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        Locations::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.find_by_query(&location.search_query).await
    }
}
