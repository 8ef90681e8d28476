#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use database::{
    entities::games,
    services::{
        game::{GameService, NewGame},
        location::NewLocation,
    },
};
use migration::{Migrator, MigratorTrait};
use models::guarantee::Guarantee;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh in-memory SQLite database with the schema applied
pub async fn setup() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection would get its own in-memory database
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
}

pub async fn add_game(db: &DatabaseConnection, name: &str) -> games::Model {
    GameService::create_game(
        db,
        NewGame {
            name: name.to_string(),
            players_min: 2,
            players_max: 4,
            duration_min: 30,
            duration_max: 60,
            picture: None,
            description: format!("{name} description"),
            comments: None,
        },
        at(date(2023, 9, 1), 12),
    )
    .await
    .expect("create game")
}

pub fn new_location(game_ids: Vec<Uuid>, expected_date_end: NaiveDate) -> NewLocation {
    NewLocation {
        renter_first_name: "Camille".to_string(),
        renter_last_name: "Martin".to_string(),
        renter_address: "12 rue des Lilas".to_string(),
        renter_email: "camille@example.org".to_string(),
        renter_phone: "0601020304".to_string(),
        renter_guarantee: Guarantee::Access,
        renter_group: Some("KAP".to_string()),
        comments: None,
        expected_date_end,
        game_ids,
    }
}
