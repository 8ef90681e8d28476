use crate::routes::{auth, game, guarantee, health, location, root};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::auth,
        game::get_games,
        game::get_game_by_id,
        game::get_available_games,
        game::create_game,
        guarantee::get_guarantees,
        location::get_open_locations,
        location::get_finished_locations,
        location::get_location_by_id,
        location::create_location,
        location::finish_location,
        location::delete_location
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Authentication", description = "Authentication related endpoints"),
        (name = "Games", description = "Game catalog endpoints"),
        (name = "Locations", description = "Rental endpoints"),
    ),
    info(
        title = "Board Game Rentals API",
        version = "1.0.0",
        description = "Game catalog and rentals of the club",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
