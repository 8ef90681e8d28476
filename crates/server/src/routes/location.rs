use crate::{
    dtos::{
        location::{
            CreateLocationRequest, FinishedLocationsParams, LocationResponse,
            PaginatedLocationsResponse,
        },
        pagination::PaginationMeta,
    },
    error::{ApiError, ErrorResponse},
    routes::auth::rentor_name,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Local;
use database::services::location::{LocationService, NewLocation};
use log::info;
use sea_orm::prelude::Uuid;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Get the rentals currently out, most recent first
#[utoipa::path(
    get,
    path = "/locations",
    responses(
        (status = 200, description = "Open locations", body = [LocationResponse]),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Locations"
)]
pub async fn get_open_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    let today = Local::now().date_naive();
    let locations = LocationService::list_open_locations(&state.db).await?;

    Ok(Json(
        locations
            .into_iter()
            .map(|details| LocationResponse::new(details, today, state.price_per_unit))
            .collect(),
    ))
}

/// Get paginated list of returned rentals, most recently returned first
#[utoipa::path(
    get,
    path = "/locations/finished",
    params(FinishedLocationsParams),
    responses(
        (status = 200, description = "Finished locations", body = PaginatedLocationsResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Locations"
)]
pub async fn get_finished_locations(
    State(state): State<AppState>,
    Query(params): Query<FinishedLocationsParams>,
) -> Result<Json<PaginatedLocationsResponse>, ApiError> {
    let today = Local::now().date_naive();
    let (locations, total_items) =
        LocationService::list_finished_locations(&state.db, params.page, params.per_page).await?;

    Ok(Json(PaginatedLocationsResponse {
        locations: locations
            .into_iter()
            .map(|details| LocationResponse::new(details, today, state.price_per_unit))
            .collect(),
        pagination: PaginationMeta::new(params.page, params.per_page, total_items),
    }))
}

/// Get a specific location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location found", body = LocationResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Locations"
)]
pub async fn get_location_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationResponse>, ApiError> {
    let today = Local::now().date_naive();
    let details = LocationService::get_location(&state.db, id).await?;

    Ok(Json(LocationResponse::new(
        details,
        today,
        state.price_per_unit,
    )))
}

/// Open a rental; the authenticated user is recorded as the rentor
#[utoipa::path(
    post,
    path = "/locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Invalid location (e.g. expected end date in the past)", body = ErrorResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "A game does not exist", body = ErrorResponse),
        (status = 409, description = "A game is already rented", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Locations"
)]
pub async fn create_location(
    State(state): State<AppState>,
    claims: Extension<DefaultClaims>,
    Json(req): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), ApiError> {
    let rentor = rentor_name(&claims)?;
    let new = NewLocation::try_from(req)?;
    let now = Local::now().naive_local();

    let details = LocationService::create_location(&state.db, new, rentor, now).await?;
    info!(
        "Location {} created by {}",
        details.location.id, details.location.rentor_first
    );

    Ok((
        StatusCode::CREATED,
        Json(LocationResponse::new(
            details,
            now.date(),
            state.price_per_unit,
        )),
    ))
}

/// Close a rental: games come back and the price is stored
#[utoipa::path(
    post,
    path = "/locations/{id}/finish",
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location finished", body = LocationResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 409, description = "Location already finished", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Locations"
)]
pub async fn finish_location(
    State(state): State<AppState>,
    claims: Extension<DefaultClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationResponse>, ApiError> {
    let rentor = rentor_name(&claims)?;
    let today = Local::now().date_naive();

    let details = LocationService::finish_location(&state.db, id, rentor, today).await?;

    Ok(Json(LocationResponse::new(
        details,
        today,
        state.price_per_unit,
    )))
}

/// Cancel an open rental without billing it
#[utoipa::path(
    delete,
    path = "/locations/{id}",
    params(
        ("id" = Uuid, Path, description = "Location ID")
    ),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Location not found", body = ErrorResponse),
        (status = 409, description = "Location already finished", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Locations"
)]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    LocationService::delete_location(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
