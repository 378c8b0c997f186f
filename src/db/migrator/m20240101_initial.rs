use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locations::SearchQuery).string().not_null())
                    .col(
                        ColumnDef::new(Locations::FormattedQuery)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::Latitude).double().not_null())
                    .col(ColumnDef::new(Locations::Longitude).double().not_null())
                    .to_owned(),
            )
            .await?;

        // First-writer-wins for concurrent geocode lookups of the same query.
        manager
            .create_index(
                Index::create()
                    .name("idx_locations_search_query")
                    .table(Locations::Table)
                    .col(Locations::SearchQuery)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Forecasts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Forecasts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Forecasts::LocationId).integer().not_null())
                    .col(ColumnDef::new(Forecasts::Forecast).string().not_null())
                    .col(ColumnDef::new(Forecasts::Time).string().not_null())
                    .col(
                        ColumnDef::new(Forecasts::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forecasts_location_id")
                    .table(Forecasts::Table)
                    .col(Forecasts::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::LocationId).integer().not_null())
                    .col(ColumnDef::new(Places::Name).string().not_null())
                    .col(ColumnDef::new(Places::ImageUrl).string())
                    .col(ColumnDef::new(Places::Price).string())
                    .col(ColumnDef::new(Places::Rating).double())
                    .col(ColumnDef::new(Places::Url).string().not_null())
                    .col(ColumnDef::new(Places::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_places_location_id")
                    .table(Places::Table)
                    .col(Places::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::LocationId).integer().not_null())
                    .col(ColumnDef::new(Events::Link).string().not_null())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(ColumnDef::new(Events::EventDate).string().not_null())
                    .col(ColumnDef::new(Events::Summary).text().not_null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_location_id")
                    .table(Events::Table)
                    .col(Events::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Trails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trails::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trails::LocationId).integer().not_null())
                    .col(ColumnDef::new(Trails::Name).string().not_null())
                    .col(ColumnDef::new(Trails::Location).string().not_null())
                    .col(ColumnDef::new(Trails::Length).double().not_null())
                    .col(ColumnDef::new(Trails::Stars).double().not_null())
                    .col(ColumnDef::new(Trails::StarVotes).integer().not_null())
                    .col(ColumnDef::new(Trails::Summary).text().not_null())
                    .col(ColumnDef::new(Trails::TrailUrl).string().not_null())
                    .col(ColumnDef::new(Trails::Conditions).string().not_null())
                    .col(ColumnDef::new(Trails::ConditionDate).string().not_null())
                    .col(ColumnDef::new(Trails::ConditionTime).string().not_null())
                    .col(ColumnDef::new(Trails::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trails_location_id")
                    .table(Trails::Table)
                    .col(Trails::LocationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Forecasts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    SearchQuery,
    FormattedQuery,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum Forecasts {
    Table,
    Id,
    LocationId,
    Forecast,
    Time,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Places {
    Table,
    Id,
    LocationId,
    Name,
    ImageUrl,
    Price,
    Rating,
    Url,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    LocationId,
    Link,
    Name,
    EventDate,
    Summary,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Trails {
    Table,
    Id,
    LocationId,
    Name,
    Location,
    Length,
    Stars,
    StarVotes,
    Summary,
    TrailUrl,
    Conditions,
    ConditionDate,
    ConditionTime,
    CreatedAt,
}
