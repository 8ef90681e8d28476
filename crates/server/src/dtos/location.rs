use super::{
    game::GameResponse,
    pagination::{PaginationMeta, default_page},
};
use crate::error::ApiError;
use chrono::{NaiveDate, NaiveDateTime};
use database::services::location::{LocationDetails, NewLocation};
use models::guarantee::Guarantee;
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationResponse {
    pub id: Uuid,
    pub date_begin: NaiveDateTime,
    pub expected_date_end: NaiveDate,
    pub date_end: Option<NaiveDate>,
    pub renter_first_name: String,
    pub renter_last_name: String,
    pub renter_address: String,
    pub renter_email: String,
    pub renter_phone: String,
    /// Guarantee code: ID, ACCESS, DRIVER, KEY, MONEY or Autre
    pub renter_guarantee: String,
    pub renter_guarantee_label: String,
    pub renter_group: Option<String>,
    pub comments: Option<String>,
    pub rentor_first: String,
    pub rentor_last: Option<String>,
    pub finished: bool,
    /// open, late or finished
    pub status: String,
    pub is_late: bool,
    /// Days past the expected end date
    pub delay: i64,
    pub number_of_games: usize,
    /// Price in units (games × billable days): stored once finished, as of today otherwise
    pub price: i32,
    /// `price` multiplied by the configured unit price
    pub amount: i64,
    pub games: Vec<GameResponse>,
}

impl LocationResponse {
    pub fn new(details: LocationDetails, today: NaiveDate, price_per_unit: i64) -> Self {
        let number_of_games = details.number_of_games();
        let price = details.price(today);
        let location = details.location;

        Self {
            status: location.status(today).to_string(),
            is_late: location.is_late(today),
            delay: location.delay(today),
            number_of_games,
            price,
            amount: i64::from(price) * price_per_unit,
            renter_guarantee: location.renter_guarantee.code().to_string(),
            renter_guarantee_label: location.renter_guarantee.label().to_string(),
            id: location.id,
            date_begin: location.date_begin,
            expected_date_end: location.expected_date_end,
            date_end: location.date_end,
            renter_first_name: location.renter_first_name,
            renter_last_name: location.renter_last_name,
            renter_address: location.renter_address,
            renter_email: location.renter_email,
            renter_phone: location.renter_phone,
            renter_group: location.renter_group,
            comments: location.comments,
            rentor_first: location.rentor_first,
            rentor_last: location.rentor_last,
            finished: location.finished,
            games: details.games.into_iter().map(GameResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedLocationsResponse {
    pub locations: Vec<LocationResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLocationRequest {
    pub renter_first_name: String,
    pub renter_last_name: String,
    pub renter_address: String,
    pub renter_email: String,
    pub renter_phone: String,
    /// Guarantee code: ID, ACCESS, DRIVER, KEY, MONEY or Autre
    pub renter_guarantee: String,
    pub renter_group: Option<String>,
    pub comments: Option<String>,
    pub expected_date_end: NaiveDate,
    pub rented_games: Vec<Uuid>,
}

impl TryFrom<CreateLocationRequest> for NewLocation {
    type Error = ApiError;

    fn try_from(req: CreateLocationRequest) -> Result<Self, Self::Error> {
        let renter_guarantee: Guarantee = req.renter_guarantee.parse().map_err(ApiError::BadRequest)?;

        Ok(Self {
            renter_first_name: req.renter_first_name,
            renter_last_name: req.renter_last_name,
            renter_address: req.renter_address,
            renter_email: req.renter_email,
            renter_phone: req.renter_phone,
            renter_guarantee,
            renter_group: req.renter_group.filter(|group| !group.trim().is_empty()),
            comments: req.comments,
            expected_date_end: req.expected_date_end,
            game_ids: req.rented_games,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuaranteeResponse {
    pub code: String,
    pub label: String,
}

impl From<Guarantee> for GuaranteeResponse {
    fn from(guarantee: Guarantee) -> Self {
        Self {
            code: guarantee.code().to_string(),
            label: guarantee.label().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct FinishedLocationsParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    20
}
