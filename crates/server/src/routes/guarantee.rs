use crate::dtos::location::GuaranteeResponse;
use axum::Json;
use models::guarantee::Guarantee;
use strum::IntoEnumIterator;

/// List the accepted guarantee codes with their labels
#[utoipa::path(
    get,
    path = "/guarantees",
    responses(
        (status = 200, description = "Guarantee kinds", body = [GuaranteeResponse])
    ),
    tag = "Locations"
)]
pub async fn get_guarantees() -> Json<Vec<GuaranteeResponse>> {
    Json(Guarantee::iter().map(GuaranteeResponse::from).collect())
}
