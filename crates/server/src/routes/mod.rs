pub mod auth;
pub mod game;
pub mod guarantee;
pub mod health;
pub mod location;
pub mod root;
