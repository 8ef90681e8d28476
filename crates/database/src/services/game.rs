use crate::{entities::games, error::ServiceError, services::check_len};
use chrono::NaiveDateTime;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, Func, LikeExpr},
};
use serde::Deserialize;
use uuid::Uuid;

/// A catalog entry to be added
#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    pub name: String,
    pub players_min: i32,
    pub players_max: i32,
    pub duration_min: i32,
    pub duration_max: i32,
    pub picture: Option<String>,
    pub description: String,
    pub comments: Option<String>,
}

impl NewGame {
    /// Widest name the `games` table holds
    pub const NAME_MAX_LEN: usize = 50;

    fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("game name is empty".into()));
        }
        check_len("name", &self.name, Self::NAME_MAX_LEN)?;
        if self.players_min < 1 || self.players_min > self.players_max {
            return Err(ServiceError::Validation(format!(
                "invalid player range {}-{}",
                self.players_min, self.players_max
            )));
        }
        if self.duration_min < 0 || self.duration_min > self.duration_max {
            return Err(ServiceError::Validation(format!(
                "invalid duration range {}-{}",
                self.duration_min, self.duration_max
            )));
        }

        Ok(())
    }
}

pub struct GameService;

impl GameService {
    /// Maximum number of games returned by the autocomplete lookup
    const AVAILABLE_LIMIT: u64 = 20;

    pub async fn create_game(
        db: &DatabaseConnection,
        game: NewGame,
        now: NaiveDateTime,
    ) -> Result<games::Model, ServiceError> {
        game.validate()?;

        let model = games::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(game.name),
            players_min: Set(game.players_min),
            players_max: Set(game.players_max),
            duration_min: Set(game.duration_min),
            duration_max: Set(game.duration_max),
            picture: Set(game.picture),
            nb_rented: Set(0),
            description: Set(game.description),
            comments: Set(game.comments),
            date: Set(now),
            is_rented: Set(false),
        }
        .insert(db)
        .await?;

        info!("Added game {} ({})", model.name, model.id);
        Ok(model)
    }

    pub async fn get_game(db: &DatabaseConnection, id: Uuid) -> Result<games::Model, ServiceError> {
        games::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::game_not_found(id))
    }

    /// Query the catalog, most rented first, optionally filtered by a
    /// case-insensitive substring of the name.
    ///
    /// A page past the end falls back to the last page.
    pub async fn list_games(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        search: Option<String>,
    ) -> Result<(Vec<games::Model>, u64), ServiceError> {
        if page == 0 || per_page == 0 {
            return Err(ServiceError::Validation(
                "page and per_page must be at least 1".into(),
            ));
        }

        let mut condition = Condition::all();

        if let Some(search) = search
            && !search.trim().is_empty()
        {
            condition = condition.add(name_matches(format!(
                "%{}%",
                escape_like(&search.trim().to_lowercase())
            )));
        }

        let query = games::Entity::find()
            .filter(condition)
            .order_by_desc(games::Column::NbRented)
            .order_by_asc(games::Column::Name);

        let total_items = query.clone().count(db).await?;
        let last_page = total_items.div_ceil(per_page).max(1);
        let paginator = query.paginate(db, per_page);
        let games = paginator.fetch_page(page.min(last_page) - 1).await?; // SeaORM uses 0-based pages

        Ok((games, total_items))
    }

    /// Games that can be put in a new rental, optionally restricted to names
    /// starting with `prefix`
    pub async fn available_games(
        db: &DatabaseConnection,
        prefix: Option<String>,
    ) -> Result<Vec<games::Model>, ServiceError> {
        let mut query = games::Entity::find().filter(games::Column::IsRented.eq(false));

        if let Some(prefix) = prefix
            && !prefix.trim().is_empty()
        {
            query = query.filter(name_matches(format!(
                "{}%",
                escape_like(&prefix.trim().to_lowercase())
            )));
        }

        let games = query
            .order_by_asc(games::Column::Name)
            .paginate(db, Self::AVAILABLE_LIMIT)
            .fetch_page(0)
            .await?;

        Ok(games)
    }
}

const LIKE_ESCAPE: char = '!';

/// Makes user input match literally inside a LIKE pattern
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive LIKE on the game name; `pattern` must be lowercase
fn name_matches(pattern: String) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col((games::Entity, games::Column::Name))))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}
