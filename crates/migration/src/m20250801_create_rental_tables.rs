use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create games table
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Games::PlayersMin).integer().not_null())
                    .col(ColumnDef::new(Games::PlayersMax).integer().not_null())
                    .col(ColumnDef::new(Games::DurationMin).integer().not_null())
                    .col(ColumnDef::new(Games::DurationMax).integer().not_null())
                    .col(ColumnDef::new(Games::Picture).string())
                    .col(
                        ColumnDef::new(Games::NbRented)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::Description).text().not_null())
                    .col(ColumnDef::new(Games::Comments).text())
                    .col(ColumnDef::new(Games::Date).date_time().not_null())
                    .col(
                        ColumnDef::new(Games::IsRented)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // Create locations table
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locations::DateBegin).date_time().not_null())
                    .col(ColumnDef::new(Locations::ExpectedDateEnd).date().not_null())
                    .col(ColumnDef::new(Locations::DateEnd).date())
                    .col(
                        ColumnDef::new(Locations::RenterFirstName)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Locations::RenterLastName)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::RenterAddress).string().not_null())
                    .col(ColumnDef::new(Locations::RenterEmail).string().not_null())
                    .col(
                        ColumnDef::new(Locations::RenterPhone)
                            .string_len(13)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::RenterGuarantee).text().not_null())
                    .col(ColumnDef::new(Locations::RenterGroup).string())
                    .col(ColumnDef::new(Locations::Comments).text())
                    .col(ColumnDef::new(Locations::Price).integer())
                    .col(
                        ColumnDef::new(Locations::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    // Filled from the token subject, which has no fixed width
                    .col(ColumnDef::new(Locations::RentorFirst).text().not_null())
                    .col(ColumnDef::new(Locations::RentorLast).text())
                    .to_owned(),
            )
            .await?;

        // Create location_games junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(LocationGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LocationGames::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LocationGames::LocationId).uuid().not_null())
                    .col(ColumnDef::new(LocationGames::GameId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-location_games-location_id")
                            .from(LocationGames::Table, LocationGames::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-location_games-game_id")
                            .from(LocationGames::Table, LocationGames::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LocationGames::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Games {
    Table,
    Id,
    Name,
    PlayersMin,
    PlayersMax,
    DurationMin,
    DurationMax,
    Picture,
    NbRented,
    Description,
    Comments,
    Date,
    IsRented,
}

#[derive(Iden)]
pub(crate) enum Locations {
    Table,
    Id,
    DateBegin,
    ExpectedDateEnd,
    DateEnd,
    RenterFirstName,
    RenterLastName,
    RenterAddress,
    RenterEmail,
    RenterPhone,
    RenterGuarantee,
    RenterGroup,
    Comments,
    Price,
    Finished,
    RentorFirst,
    RentorLast,
}

#[derive(Iden)]
pub(crate) enum LocationGames {
    Table,
    Id,
    LocationId,
    GameId,
}
