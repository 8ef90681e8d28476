pub mod games;
pub mod location_games;
pub mod locations;
