pub mod game;
pub mod guarantee;
pub mod pricing;
pub mod rental;
