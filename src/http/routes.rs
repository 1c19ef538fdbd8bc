use axum::{Router, routing::get};

use crate::{http::handlers::get_google_reviews_handler, state::AppState};

pub const REVIEWS_PATH: &str = "/api/google-reviews";

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route(REVIEWS_PATH, get(get_google_reviews_handler))
        .with_state(state)
}
