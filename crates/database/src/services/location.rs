use crate::{
    entities::{games, location_games, locations},
    error::ServiceError,
    services::check_len,
};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use models::guarantee::Guarantee;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::Expr,
};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A rental as entered at checkout
#[derive(Debug, Clone, Deserialize)]
pub struct NewLocation {
    pub renter_first_name: String,
    pub renter_last_name: String,
    pub renter_address: String,
    pub renter_email: String,
    pub renter_phone: String,
    pub renter_guarantee: Guarantee,
    pub renter_group: Option<String>,
    pub comments: Option<String>,
    pub expected_date_end: NaiveDate,
    pub game_ids: Vec<Uuid>,
}

impl NewLocation {
    /// Widest renter name the `locations` table holds
    pub const NAME_MAX_LEN: usize = 20;
    /// Widest phone number the `locations` table holds
    pub const PHONE_MAX_LEN: usize = 13;

    fn validate(&self, today: NaiveDate) -> Result<(), ServiceError> {
        if self.expected_date_end < today {
            return Err(ServiceError::Validation(
                "expected end date in the past".into(),
            ));
        }

        for (field, value, max) in [
            ("renter_first_name", &self.renter_first_name, Self::NAME_MAX_LEN),
            ("renter_last_name", &self.renter_last_name, Self::NAME_MAX_LEN),
            ("renter_phone", &self.renter_phone, Self::PHONE_MAX_LEN),
        ] {
            check_len(field, value, max)?;
        }

        if self.game_ids.is_empty() {
            return Err(ServiceError::Validation(
                "a location needs at least one game".into(),
            ));
        }
        let unique: HashSet<Uuid> = self.game_ids.iter().copied().collect();
        if unique.len() != self.game_ids.len() {
            return Err(ServiceError::Validation(
                "the same game is listed twice".into(),
            ));
        }

        Ok(())
    }
}

/// A location together with the games it covers
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDetails {
    pub location: locations::Model,
    pub games: Vec<games::Model>,
}

impl LocationDetails {
    pub fn number_of_games(&self) -> usize {
        self.games.len()
    }

    /// Stored price once finished, otherwise what the rental costs as of `today`
    pub fn price(&self, today: NaiveDate) -> i32 {
        self.location.price.unwrap_or_else(|| {
            self.location
                .compute_price(self.number_of_games() as u64, today)
        })
    }
}

pub struct LocationService;

impl LocationService {
    /// Opens a rental and marks its games as rented.
    ///
    /// The expected end date may not be before `now`'s day, renter fields
    /// must fit their columns, and every game must exist and be available. Either the location, its game links and
    /// every game flag are written, or nothing is.
    pub async fn create_location(
        db: &DatabaseConnection,
        new: NewLocation,
        rentor_first: String,
        now: NaiveDateTime,
    ) -> Result<LocationDetails, ServiceError> {
        new.validate(now.date())?;

        let txn = db.begin().await?;

        let rented_games = games::Entity::find()
            .filter(games::Column::Id.is_in(new.game_ids.clone()))
            .all(&txn)
            .await?;

        if let Some(missing) = new
            .game_ids
            .iter()
            .find(|id| !rented_games.iter().any(|game| game.id == **id))
        {
            return Err(ServiceError::game_not_found(missing));
        }
        if let Some(game) = rented_games.iter().find(|game| game.is_rented) {
            return Err(ServiceError::Conflict(format!(
                "{} is already rented",
                game.name
            )));
        }

        // Flip only games still available so a concurrent checkout cannot
        // take the same game twice
        let flipped = games::Entity::update_many()
            .col_expr(games::Column::IsRented, Expr::value(true))
            .filter(games::Column::Id.is_in(new.game_ids.clone()))
            .filter(games::Column::IsRented.eq(false))
            .exec(&txn)
            .await?;
        if flipped.rows_affected != new.game_ids.len() as u64 {
            return Err(ServiceError::Conflict(
                "a game was rented in the meantime".into(),
            ));
        }

        let location_id = Uuid::new_v4();
        let location = locations::ActiveModel {
            id: Set(location_id),
            date_begin: Set(now),
            expected_date_end: Set(new.expected_date_end),
            date_end: Set(None),
            renter_first_name: Set(new.renter_first_name),
            renter_last_name: Set(new.renter_last_name),
            renter_address: Set(new.renter_address),
            renter_email: Set(new.renter_email),
            renter_phone: Set(new.renter_phone),
            renter_guarantee: Set(new.renter_guarantee),
            renter_group: Set(new.renter_group),
            comments: Set(new.comments),
            price: Set(None),
            finished: Set(false),
            rentor_first: Set(rentor_first),
            rentor_last: Set(None),
        }
        .insert(&txn)
        .await?;

        let links = new.game_ids.iter().map(|game_id| location_games::ActiveModel {
            id: Set(Uuid::new_v4()),
            location_id: Set(location_id),
            game_id: Set(*game_id),
        });
        location_games::Entity::insert_many(links).exec(&txn).await?;

        let games = location.find_related(games::Entity).all(&txn).await?;

        txn.commit().await?;

        info!(
            "Opened location {} with {} game(s), due {}",
            location.id,
            games.len(),
            location.expected_date_end
        );
        Ok(LocationDetails { location, games })
    }

    /// Get a single location with its games
    pub async fn get_location(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<LocationDetails, ServiceError> {
        let location = Self::find_location(db, id).await?;
        let games = location.find_related(games::Entity).all(db).await?;

        Ok(LocationDetails { location, games })
    }

    /// Number of games covered by a location
    pub async fn number_of_games(db: &DatabaseConnection, id: Uuid) -> Result<u64, ServiceError> {
        let location = Self::find_location(db, id).await?;
        let count = location.find_related(games::Entity).count(db).await?;

        Ok(count)
    }

    /// Rentals still out, most recent first
    pub async fn list_open_locations(
        db: &DatabaseConnection,
    ) -> Result<Vec<LocationDetails>, ServiceError> {
        let locations = locations::Entity::find()
            .filter(locations::Column::Finished.eq(false))
            .order_by_desc(locations::Column::DateBegin)
            .all(db)
            .await?;

        Self::with_games(db, locations).await
    }

    /// Returned rentals, most recently returned first.
    ///
    /// A page past the end falls back to the last page.
    pub async fn list_finished_locations(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<LocationDetails>, u64), ServiceError> {
        if page == 0 || per_page == 0 {
            return Err(ServiceError::Validation(
                "page and per_page must be at least 1".into(),
            ));
        }

        let query = locations::Entity::find()
            .filter(locations::Column::Finished.eq(true))
            .order_by_desc(locations::Column::DateEnd)
            .order_by_desc(locations::Column::DateBegin);

        let total_items = query.clone().count(db).await?;
        let last_page = total_items.div_ceil(per_page).max(1);
        let paginator = query.paginate(db, per_page);
        let locations = paginator.fetch_page(page.min(last_page) - 1).await?; // SeaORM uses 0-based pages

        Ok((Self::with_games(db, locations).await?, total_items))
    }

    /// Closes a rental: stamps the return date, bills it and gives the games back.
    ///
    /// Finishing twice is rejected with a conflict, so `nb_rented` is only
    /// ever incremented once per rental.
    pub async fn finish_location(
        db: &DatabaseConnection,
        id: Uuid,
        rentor_last: String,
        today: NaiveDate,
    ) -> Result<LocationDetails, ServiceError> {
        let txn = db.begin().await?;

        let location = Self::find_location(&txn, id).await?;
        if location.finished {
            warn!("Location {id} is already finished");
            return Err(ServiceError::Conflict(format!(
                "location {id} is already finished"
            )));
        }

        let game_ids = Self::game_ids(&txn, id).await?;

        let mut period = location.period();
        period.date_end = Some(today);
        let price = period.compute_price(game_ids.len() as u64, today);

        // Guard on `finished` again so two concurrent finishes cannot both apply
        let closed = locations::Entity::update_many()
            .set(locations::ActiveModel {
                date_end: Set(Some(today)),
                price: Set(Some(price)),
                finished: Set(true),
                rentor_last: Set(Some(rentor_last)),
                ..Default::default()
            })
            .filter(locations::Column::Id.eq(id))
            .filter(locations::Column::Finished.eq(false))
            .exec(&txn)
            .await?;
        if closed.rows_affected != 1 {
            return Err(ServiceError::Conflict(format!(
                "location {id} is already finished"
            )));
        }

        if !game_ids.is_empty() {
            games::Entity::update_many()
                .col_expr(
                    games::Column::NbRented,
                    Expr::col(games::Column::NbRented).add(1),
                )
                .col_expr(games::Column::IsRented, Expr::value(false))
                .filter(games::Column::Id.is_in(game_ids))
                .exec(&txn)
                .await?;
        }

        let location = Self::find_location(&txn, id).await?;
        let games = location.find_related(games::Entity).all(&txn).await?;

        txn.commit().await?;

        info!(
            "Finished location {id}: {} game(s), price {price}, delay {} day(s)",
            games.len(),
            location.delay(today)
        );
        Ok(LocationDetails { location, games })
    }

    /// Cancels an open rental: its games become available again and the
    /// record is removed without billing. Finished rentals cannot be deleted.
    pub async fn delete_location(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let location = Self::find_location(&txn, id).await?;
        if location.finished {
            return Err(ServiceError::Conflict(format!(
                "location {id} is finished and cannot be deleted"
            )));
        }

        let game_ids = Self::game_ids(&txn, id).await?;
        if !game_ids.is_empty() {
            games::Entity::update_many()
                .col_expr(games::Column::IsRented, Expr::value(false))
                .filter(games::Column::Id.is_in(game_ids.clone()))
                .exec(&txn)
                .await?;
        }

        location_games::Entity::delete_many()
            .filter(location_games::Column::LocationId.eq(id))
            .exec(&txn)
            .await?;
        location.delete(&txn).await?;

        txn.commit().await?;

        info!("Deleted location {id}, released {} game(s)", game_ids.len());
        Ok(())
    }

    async fn find_location<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<locations::Model, ServiceError> {
        locations::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::location_not_found(id))
    }

    async fn game_ids<C: ConnectionTrait>(db: &C, location_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        let links = location_games::Entity::find()
            .filter(location_games::Column::LocationId.eq(location_id))
            .all(db)
            .await?;

        Ok(links.into_iter().map(|link| link.game_id).collect())
    }

    /// Batch fetch the games of several locations, keeping their order
    async fn with_games(
        db: &DatabaseConnection,
        locations: Vec<locations::Model>,
    ) -> Result<Vec<LocationDetails>, ServiceError> {
        if locations.is_empty() {
            return Ok(vec![]);
        }

        let location_ids: Vec<Uuid> = locations.iter().map(|l| l.id).collect();

        let links: Vec<(location_games::Model, games::Model)> = location_games::Entity::find()
            .filter(location_games::Column::LocationId.is_in(location_ids))
            .find_also_related(games::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(link, game)| game.map(|g| (link, g)))
            .collect();

        let mut games_by_location: HashMap<Uuid, Vec<games::Model>> = HashMap::new();
        for (link, game) in links {
            games_by_location
                .entry(link.location_id)
                .or_default()
                .push(game);
        }

        let results = locations
            .into_iter()
            .map(|location| {
                let games = games_by_location.remove(&location.id).unwrap_or_default();
                LocationDetails { location, games }
            })
            .collect();

        Ok(results)
    }
}
