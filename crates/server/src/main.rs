mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{config::Config, doc::ApiDoc, state::AppState, utils::shutdown::shutdown_signal};
use axum::{
    Router,
    routing::{get, post},
};
use database::db::create_connection;
use log::{error, info};
use routes::{auth, game, guarantee, health, location, root};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let db = create_connection(&config.database_url).await?;
    let state = AppState {
        db,
        price_per_unit: config.price_per_unit,
    };

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(config.oidc_issuer_url.as_str())
        .build()
        .await
        .map_err(|e| format!("Failed to build OAuth2ResourceServer: {e:?}"))?;

    let public = Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/guarantees", get(guarantee::get_guarantees))
        .route("/games", get(game::get_games))
        .route("/games/{id}", get(game::get_game_by_id));

    // Everything touching rentals needs a signed-in club member
    let protected = Router::new()
        .route("/me", get(auth::auth))
        .route("/games/available", get(game::get_available_games))
        .route("/admin/games", post(game::create_game))
        .route(
            "/locations",
            get(location::get_open_locations).post(location::create_location),
        )
        .route("/locations/finished", get(location::get_finished_locations))
        .route(
            "/locations/{id}",
            get(location::get_location_by_id).delete(location::delete_location),
        )
        .route("/locations/{id}/finish", post(location::finish_location))
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = public
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Running axum on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
