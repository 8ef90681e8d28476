mod common;

use common::{add_game, at, date, new_location, setup};
use database::{
    entities::{games, location_games, locations},
    error::ServiceError,
    services::{
        game::GameService,
        location::{LocationService, NewLocation},
    },
};
use models::{guarantee::Guarantee, rental::RentalStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

#[tokio::test]
async fn test_create_marks_games_rented() {
    let db = setup().await;
    let g1 = add_game(&db, "Carcassonne").await;
    let g2 = add_game(&db, "Azul").await;

    let details = LocationService::create_location(
        &db,
        new_location(vec![g1.id, g2.id], date(2024, 1, 8)),
        "alice".to_string(),
        at(date(2024, 1, 1), 18),
    )
    .await
    .unwrap();

    assert_eq!(details.number_of_games(), 2);
    assert_eq!(details.location.rentor_first, "alice");
    assert_eq!(details.location.renter_guarantee, Guarantee::Access);
    assert_eq!(details.location.price, None);
    assert_eq!(details.location.date_end, None);
    assert!(!details.location.finished);

    for id in [g1.id, g2.id] {
        let game = GameService::get_game(&db, id).await.unwrap();
        assert!(game.is_rented);
        assert_eq!(game.nb_rented, 0);
    }

    assert_eq!(
        LocationService::number_of_games(&db, details.location.id)
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_create_rejects_expected_end_in_the_past() {
    let db = setup().await;
    let game = add_game(&db, "Dixit").await;

    let err = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 1)),
        "alice".to_string(),
        at(date(2024, 1, 2), 10),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(ref msg) if msg == "expected end date in the past"));
    assert!(!GameService::get_game(&db, game.id).await.unwrap().is_rented);
}

#[tokio::test]
async fn test_create_rejects_rented_game_without_side_effects() {
    let db = setup().await;
    let taken = add_game(&db, "Catan").await;
    let free = add_game(&db, "Hanabi").await;

    LocationService::create_location(
        &db,
        new_location(vec![taken.id], date(2024, 1, 5)),
        "alice".to_string(),
        at(date(2024, 1, 1), 10),
    )
    .await
    .unwrap();

    let err = LocationService::create_location(
        &db,
        new_location(vec![free.id, taken.id], date(2024, 1, 5)),
        "bob".to_string(),
        at(date(2024, 1, 2), 10),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(!GameService::get_game(&db, free.id).await.unwrap().is_rented);
    assert_eq!(locations::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_rejects_unknown_or_duplicate_games() {
    let db = setup().await;
    let game = add_game(&db, "Codenames").await;
    let now = at(date(2024, 1, 1), 10);

    let err = LocationService::create_location(
        &db,
        new_location(vec![game.id, Uuid::new_v4()], date(2024, 1, 3)),
        "alice".to_string(),
        now,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = LocationService::create_location(
        &db,
        new_location(vec![game.id, game.id], date(2024, 1, 3)),
        "alice".to_string(),
        now,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = LocationService::create_location(
        &db,
        new_location(vec![], date(2024, 1, 3)),
        "alice".to_string(),
        now,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert!(!GameService::get_game(&db, game.id).await.unwrap().is_rented);
}

#[tokio::test]
async fn test_finish_bills_a_week_with_weekend_compressed() {
    let db = setup().await;
    let g1 = add_game(&db, "Carcassonne").await;
    let g2 = add_game(&db, "Azul").await;

    // Monday to the following Monday
    let opened = LocationService::create_location(
        &db,
        new_location(vec![g1.id, g2.id], date(2024, 1, 8)),
        "alice".to_string(),
        at(date(2024, 1, 1), 18),
    )
    .await
    .unwrap();

    let finished = LocationService::finish_location(
        &db,
        opened.location.id,
        "bob".to_string(),
        date(2024, 1, 8),
    )
    .await
    .unwrap();

    assert!(finished.location.finished);
    assert_eq!(finished.location.date_end, Some(date(2024, 1, 8)));
    assert_eq!(finished.location.price, Some(10));
    assert_eq!(finished.location.rentor_last.as_deref(), Some("bob"));
    assert!(!finished.location.is_late(date(2024, 2, 1)));
    assert_eq!(finished.location.status(date(2024, 2, 1)), RentalStatus::Finished);
    assert_eq!(finished.price(date(2024, 2, 1)), 10);

    for id in [g1.id, g2.id] {
        let game = GameService::get_game(&db, id).await.unwrap();
        assert!(!game.is_rented);
        assert_eq!(game.nb_rented, 1);
    }
}

#[tokio::test]
async fn test_finish_twice_does_not_count_twice() {
    let db = setup().await;
    let game = add_game(&db, "Skull").await;

    let opened = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 9)),
        "alice".to_string(),
        at(date(2024, 1, 5), 17),
    )
    .await
    .unwrap();
    let id = opened.location.id;

    LocationService::finish_location(&db, id, "bob".to_string(), date(2024, 1, 9))
        .await
        .unwrap();
    let err = LocationService::finish_location(&db, id, "carol".to_string(), date(2024, 1, 10))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));

    let game = GameService::get_game(&db, game.id).await.unwrap();
    assert_eq!(game.nb_rented, 1);

    let location = LocationService::get_location(&db, id).await.unwrap().location;
    // Friday to Tuesday
    assert_eq!(location.price, Some(2));
    assert_eq!(location.date_end, Some(date(2024, 1, 9)));
    assert_eq!(location.rentor_last.as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_late_return_is_billed_and_delayed() {
    let db = setup().await;
    let game = add_game(&db, "7 Wonders").await;

    let opened = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 2)),
        "alice".to_string(),
        at(date(2024, 1, 1), 9),
    )
    .await
    .unwrap();

    // Still out on Thursday: late by two days, billed Monday to Thursday
    let open = LocationService::get_location(&db, opened.location.id)
        .await
        .unwrap();
    assert_eq!(open.location.status(date(2024, 1, 4)), RentalStatus::Late);
    assert_eq!(open.location.delay(date(2024, 1, 4)), 2);
    assert_eq!(open.price(date(2024, 1, 4)), 3);

    let finished = LocationService::finish_location(
        &db,
        opened.location.id,
        "bob".to_string(),
        date(2024, 1, 4),
    )
    .await
    .unwrap();
    assert!(finished.location.is_late(date(2024, 3, 1)));
    assert_eq!(finished.location.delay(date(2024, 3, 1)), 2);
    assert_eq!(finished.location.price, Some(3));
}

#[tokio::test]
async fn test_delete_releases_games_without_counting() {
    let db = setup().await;
    let mut ids = Vec::new();
    for name in ["Dixit", "Splendor", "Patchwork"] {
        ids.push(add_game(&db, name).await.id);
    }

    let opened = LocationService::create_location(
        &db,
        new_location(ids.clone(), date(2024, 1, 10)),
        "alice".to_string(),
        at(date(2024, 1, 8), 14),
    )
    .await
    .unwrap();

    LocationService::delete_location(&db, opened.location.id)
        .await
        .unwrap();

    for id in ids {
        let game = GameService::get_game(&db, id).await.unwrap();
        assert!(!game.is_rented);
        assert_eq!(game.nb_rented, 0);
    }

    assert!(matches!(
        LocationService::get_location(&db, opened.location.id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert_eq!(location_games::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_finished_location_cannot_be_deleted() {
    let db = setup().await;
    let game = add_game(&db, "Love Letter").await;

    let opened = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 3)),
        "alice".to_string(),
        at(date(2024, 1, 2), 14),
    )
    .await
    .unwrap();
    LocationService::finish_location(&db, opened.location.id, "bob".to_string(), date(2024, 1, 3))
        .await
        .unwrap();

    let err = LocationService::delete_location(&db, opened.location.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(
        LocationService::get_location(&db, opened.location.id)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_unknown_location_is_not_found() {
    let db = setup().await;
    let id = Uuid::new_v4();

    assert!(matches!(
        LocationService::get_location(&db, id).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        LocationService::finish_location(&db, id, "bob".to_string(), date(2024, 1, 1)).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        LocationService::delete_location(&db, id).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_listings_split_open_and_finished() {
    let db = setup().await;
    let a = add_game(&db, "Azul").await;
    let b = add_game(&db, "Bohnanza").await;
    let c = add_game(&db, "Citadelles").await;

    let first = LocationService::create_location(
        &db,
        new_location(vec![a.id], date(2024, 1, 5)),
        "alice".to_string(),
        at(date(2024, 1, 1), 9),
    )
    .await
    .unwrap();
    let second = LocationService::create_location(
        &db,
        new_location(vec![b.id, c.id], date(2024, 1, 5)),
        "alice".to_string(),
        at(date(2024, 1, 2), 9),
    )
    .await
    .unwrap();

    let open = LocationService::list_open_locations(&db).await.unwrap();
    assert_eq!(open.len(), 2);
    assert_eq!(open[0].location.id, second.location.id);
    assert_eq!(open[0].number_of_games(), 2);
    assert_eq!(open[1].location.id, first.location.id);

    LocationService::finish_location(&db, first.location.id, "bob".to_string(), date(2024, 1, 3))
        .await
        .unwrap();

    let open = LocationService::list_open_locations(&db).await.unwrap();
    assert_eq!(open.len(), 1);

    let (finished, total) = LocationService::list_finished_locations(&db, 1, 20)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(finished[0].location.id, first.location.id);
    assert_eq!(finished[0].games[0].id, a.id);

    // Past the end falls back to the last page
    let (finished, _) = LocationService::list_finished_locations(&db, 7, 20)
        .await
        .unwrap();
    assert_eq!(finished.len(), 1);

    let rented = games::Entity::find_by_id(b.id).one(&db).await.unwrap().unwrap();
    assert!(rented.is_rented);
}

/// Makes every `event` on `table` abort, the way a failing write would
async fn fail_on(db: &DatabaseConnection, event: &str, table: &str) {
    db.execute_unprepared(&format!(
        "CREATE TRIGGER fail_{table} BEFORE {event} ON {table} \
         BEGIN SELECT RAISE(ABORT, 'write refused'); END"
    ))
    .await
    .unwrap();
}

async fn stop_failing(db: &DatabaseConnection, table: &str) {
    db.execute_unprepared(&format!("DROP TRIGGER fail_{table}"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_token_subject_is_stored_as_rentor() {
    let db = setup().await;
    let game = add_game(&db, "Time's Up").await;
    let subject = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6";
    let federated = "oauth2|google-workspace|104623918273645501928";

    let opened = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 3)),
        subject.to_string(),
        at(date(2024, 1, 2), 10),
    )
    .await
    .unwrap();
    let finished = LocationService::finish_location(
        &db,
        opened.location.id,
        federated.to_string(),
        date(2024, 1, 3),
    )
    .await
    .unwrap();

    assert_eq!(finished.location.rentor_first, subject);
    assert_eq!(finished.location.rentor_last.as_deref(), Some(federated));
}

#[tokio::test]
async fn test_create_rejects_fields_wider_than_their_column() {
    let db = setup().await;
    let game = add_game(&db, "Mysterium").await;
    let now = at(date(2024, 1, 2), 10);

    let too_long = [
        NewLocation {
            renter_first_name: "Marie-Christine-Alexandra".to_string(),
            ..new_location(vec![game.id], date(2024, 1, 3))
        },
        NewLocation {
            renter_last_name: "de La Tour d'Auvergne-Lauraguais".to_string(),
            ..new_location(vec![game.id], date(2024, 1, 3))
        },
        NewLocation {
            renter_phone: "+33 6 01 02 03 04".to_string(),
            ..new_location(vec![game.id], date(2024, 1, 3))
        },
    ];
    for new in too_long {
        let err = LocationService::create_location(&db, new, "alice".to_string(), now)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
    assert_eq!(locations::Entity::find().count(&db).await.unwrap(), 0);
    assert!(!GameService::get_game(&db, game.id).await.unwrap().is_rented);

    // Widths are counted in characters, not bytes
    let accented = NewLocation {
        renter_first_name: "Éléonore-Bénédicte".to_string(),
        renter_phone: "+330601020304".to_string(),
        ..new_location(vec![game.id], date(2024, 1, 3))
    };
    assert!(
        LocationService::create_location(&db, accented, "alice".to_string(), now)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_failed_create_leaves_nothing_behind() {
    let db = setup().await;
    let g1 = add_game(&db, "Pandemic").await;
    let g2 = add_game(&db, "Kingdomino").await;

    // Games are flipped and the location inserted before the links fail
    fail_on(&db, "INSERT", "location_games").await;
    let err = LocationService::create_location(
        &db,
        new_location(vec![g1.id, g2.id], date(2024, 1, 5)),
        "alice".to_string(),
        at(date(2024, 1, 2), 10),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));

    for id in [g1.id, g2.id] {
        assert!(!GameService::get_game(&db, id).await.unwrap().is_rented);
    }
    assert_eq!(locations::Entity::find().count(&db).await.unwrap(), 0);

    stop_failing(&db, "location_games").await;
    let opened = LocationService::create_location(
        &db,
        new_location(vec![g1.id, g2.id], date(2024, 1, 5)),
        "alice".to_string(),
        at(date(2024, 1, 2), 11),
    )
    .await
    .unwrap();
    assert_eq!(opened.number_of_games(), 2);
}

#[tokio::test]
async fn test_failed_finish_keeps_location_open() {
    let db = setup().await;
    let game = add_game(&db, "Azul").await;

    let opened = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 3)),
        "alice".to_string(),
        at(date(2024, 1, 1), 10),
    )
    .await
    .unwrap();
    let id = opened.location.id;

    // The location is closed before the games update fails
    fail_on(&db, "UPDATE", "games").await;
    let err = LocationService::finish_location(&db, id, "bob".to_string(), date(2024, 1, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));

    let location = LocationService::get_location(&db, id).await.unwrap().location;
    assert!(!location.finished);
    assert_eq!(location.price, None);
    assert_eq!(location.date_end, None);
    assert_eq!(location.rentor_last, None);
    let rented = GameService::get_game(&db, game.id).await.unwrap();
    assert!(rented.is_rented);
    assert_eq!(rented.nb_rented, 0);

    stop_failing(&db, "games").await;
    let finished = LocationService::finish_location(&db, id, "bob".to_string(), date(2024, 1, 3))
        .await
        .unwrap();
    assert_eq!(finished.location.price, Some(2));
    assert_eq!(GameService::get_game(&db, game.id).await.unwrap().nb_rented, 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_games_rented() {
    let db = setup().await;
    let game = add_game(&db, "Dobble").await;

    let opened = LocationService::create_location(
        &db,
        new_location(vec![game.id], date(2024, 1, 3)),
        "alice".to_string(),
        at(date(2024, 1, 1), 10),
    )
    .await
    .unwrap();

    // Games are released and links removed before the location delete fails
    fail_on(&db, "DELETE", "locations").await;
    let err = LocationService::delete_location(&db, opened.location.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));

    assert!(GameService::get_game(&db, game.id).await.unwrap().is_rented);
    assert_eq!(location_games::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(
        LocationService::number_of_games(&db, opened.location.id)
            .await
            .unwrap(),
        1
    );
}
