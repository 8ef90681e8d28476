use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the rental services.
///
/// Every variant is final: nothing in this crate retries. A transaction that
/// fails part-way is dropped, which rolls it back.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced game or location does not exist
    #[error("{0} not found")]
    NotFound(String),
    /// The request itself is invalid (e.g. an expected end date in the past)
    #[error("{0}")]
    Validation(String),
    /// The request conflicts with the current state (e.g. a game already rented)
    #[error("{0}")]
    Conflict(String),
    /// The backing store failed or could not be reached
    #[error("storage unavailable: {0}")]
    Storage(#[from] DbErr),
}

impl ServiceError {
    pub fn location_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Location {id}"))
    }

    pub fn game_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Game {id}"))
    }
}
