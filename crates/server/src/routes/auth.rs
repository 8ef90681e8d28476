use crate::error::ApiError;
use axum::{Extension, http::StatusCode};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Name recorded as the rentor for checkouts and returns
pub fn rentor_name(claims: &DefaultClaims) -> Result<String, ApiError> {
    claims
        .sub
        .as_ref()
        .filter(|sub| !sub.trim().is_empty())
        .cloned()
        .ok_or(ApiError::Unauthorized)
}

/// Returns a greeting with the user's subject identifier from their JWT claims
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Successfully authenticated", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorized - invalid or missing JWT, or no subject in claims")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn auth(claims: Extension<DefaultClaims>) -> Result<(StatusCode, String), ApiError> {
    let sub = rentor_name(&claims)?;

    Ok((StatusCode::OK, format!("Hello, {sub}")))
}
