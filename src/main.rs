use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use crate::secrets::SECRET_MANAGER;

mod controllers;
mod db;
mod models;
mod routers;
mod secrets;

use controllers::spotify::{SpotifyClient, TokenHolder, spawn_token_refresher};
use db::Database;
use routers::{health_check_route, root_route, wedding_routes};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub spotify: SpotifyClient,
    pub tokens: TokenHolder,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::DEBUG.into()))
        .with_target(false)
        .init();

    // Initialize database
    let database = match Database::new().await {
        Ok(db) => {
            info!("📊 Connected to PostgreSQL database");
            db
        }
        Err(e) => {
            error!("❌ Failed to connect to database: {}", e);
            panic!("Database connection required");
        }
    };

    // Run migrations before the listener binds
    if let Err(e) = sqlx::migrate!("./migrations").run(database.pool()).await {
        error!("❌ Failed to run database migrations: {}", e);
        panic!("Database migrations failed");
    }
    info!("📊 Database migrations completed");

    let spotify = match SpotifyClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Failed to build spotify client: {}", e);
            panic!("Spotify client required");
        }
    };
    let tokens = TokenHolder::new();

    // Keeps the shared access token fresh for the search endpoint
    let refresher = spawn_token_refresher(spotify.clone(), tokens.clone());

    let state = AppState {
        db: database,
        spotify,
        tokens,
    };

    let port = SECRET_MANAGER.get("PORT");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app: Router = Router::new()
        // Core routes
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        // RSVP form endpoints
        .nest("/wedding", wedding_routes())
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("💒 Wedding backend listening on 0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    refresher.abort();
    info!("💒 Wedding backend shut down");
}
