use super::pagination::{PaginationMeta, default_page};
use chrono::NaiveDateTime;
use database::{entities::games, services::game::NewGame};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct GameResponse {
    pub id: Uuid,
    pub name: String,
    pub players_min: i32,
    pub players_max: i32,
    /// e.g. "2 à 4 joueurs"
    pub players: String,
    pub duration_min: i32,
    pub duration_max: i32,
    /// e.g. "30 minutes"
    pub duration: String,
    pub picture: Option<String>,
    pub nb_rented: i32,
    pub description: String,
    pub comments: Option<String>,
    pub date: NaiveDateTime,
    pub is_rented: bool,
}

impl From<games::Model> for GameResponse {
    fn from(game: games::Model) -> Self {
        Self {
            players: game.players(),
            duration: game.duration(),
            id: game.id,
            name: game.name,
            players_min: game.players_min,
            players_max: game.players_max,
            duration_min: game.duration_min,
            duration_max: game.duration_max,
            picture: game.picture,
            nb_rented: game.nb_rented,
            description: game.description,
            comments: game.comments,
            date: game.date,
            is_rented: game.is_rented,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedGamesResponse {
    pub games: Vec<GameResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    pub name: String,
    pub players_min: i32,
    pub players_max: i32,
    pub duration_min: i32,
    pub duration_max: i32,
    pub picture: Option<String>,
    pub description: String,
    pub comments: Option<String>,
}

impl From<CreateGameRequest> for NewGame {
    fn from(req: CreateGameRequest) -> Self {
        Self {
            name: req.name,
            players_min: req.players_min,
            players_max: req.players_max,
            duration_min: req.duration_min,
            duration_max: req.duration_max,
            picture: req.picture,
            description: req.description,
            comments: req.comments,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct GameQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Case-insensitive substring of the game name
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct AvailableGamesParams {
    /// Case-insensitive prefix of the game name
    pub q: Option<String>,
}

fn default_per_page() -> u64 {
    5
}
