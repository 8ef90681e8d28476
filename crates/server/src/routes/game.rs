use crate::{
    dtos::{
        game::{
            AvailableGamesParams, CreateGameRequest, GameQueryParams, GameResponse,
            PaginatedGamesResponse,
        },
        pagination::PaginationMeta,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Local;
use database::services::game::GameService;
use sea_orm::prelude::Uuid;

/// Get paginated list of games, most rented first
#[utoipa::path(
    get,
    path = "/games",
    params(GameQueryParams),
    responses(
        (status = 200, description = "List of games retrieved successfully", body = PaginatedGamesResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Games"
)]
pub async fn get_games(
    State(state): State<AppState>,
    Query(params): Query<GameQueryParams>,
) -> Result<Json<PaginatedGamesResponse>, ApiError> {
    let (games, total_items) =
        GameService::list_games(&state.db, params.page, params.per_page, params.q).await?;

    Ok(Json(PaginatedGamesResponse {
        games: games.into_iter().map(GameResponse::from).collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific game by ID
#[utoipa::path(
    get,
    path = "/games/{id}",
    params(
        ("id" = Uuid, Path, description = "Game ID")
    ),
    responses(
        (status = 200, description = "Game found", body = GameResponse),
        (status = 404, description = "Game not found", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Games"
)]
pub async fn get_game_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = GameService::get_game(&state.db, id).await?;

    Ok(Json(game.into()))
}

/// Games that can be added to a new rental
#[utoipa::path(
    get,
    path = "/games/available",
    params(AvailableGamesParams),
    responses(
        (status = 200, description = "Available games", body = [GameResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Games"
)]
pub async fn get_available_games(
    State(state): State<AppState>,
    Query(params): Query<AvailableGamesParams>,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = GameService::available_games(&state.db, params.q).await?;

    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

/// Add a game to the catalog
#[utoipa::path(
    post,
    path = "/admin/games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created", body = GameResponse),
        (status = 400, description = "Invalid game", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Games"
)]
pub async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    let game = GameService::create_game(&state.db, req.into(), Local::now().naive_local()).await?;

    Ok((StatusCode::CREATED, Json(game.into())))
}
