use sea_orm::DatabaseConnection;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub price_per_unit: i64,
}
