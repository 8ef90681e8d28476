use axum::http::StatusCode;

/// Names the service and its version
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, String) {
    (
        StatusCode::OK,
        format!("Board game rentals API v{}", env!("CARGO_PKG_VERSION")),
    )
}
