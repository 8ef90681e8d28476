use crate::m20250801_create_rental_tables::{Games, LocationGames, Locations};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Available games and the catalog search
        manager
            .create_index(
                Index::create()
                    .name("idx_games_is_rented")
                    .table(Games::Table)
                    .col(Games::IsRented)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_name")
                    .table(Games::Table)
                    .col(Games::Name)
                    .to_owned(),
            )
            .await?;

        // Open and finished location listings
        manager
            .create_index(
                Index::create()
                    .name("idx_locations_finished_date_begin")
                    .table(Locations::Table)
                    .col(Locations::Finished)
                    .col(Locations::DateBegin)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_locations_finished_date_end")
                    .table(Locations::Table)
                    .col(Locations::Finished)
                    .col(Locations::DateEnd)
                    .to_owned(),
            )
            .await?;

        // Indexes on location_games for faster many-to-many lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_location_games_location_id")
                    .table(LocationGames::Table)
                    .col(LocationGames::LocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_location_games_game_id")
                    .table(LocationGames::Table)
                    .col(LocationGames::GameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_location_games_game_id",
            "idx_location_games_location_id",
            "idx_locations_finished_date_end",
            "idx_locations_finished_date_begin",
            "idx_games_name",
            "idx_games_is_rented",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
