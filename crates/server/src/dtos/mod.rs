pub mod game;
pub mod location;
pub mod pagination;
