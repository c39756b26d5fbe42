// Wedding routes
use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;
use crate::controllers::wedding::{wedding_register_route, wedding_search_route};

pub fn wedding_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(wedding_search_route))
        .route("/register", post(wedding_register_route))
}
