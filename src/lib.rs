pub mod config;
pub mod errors;
pub mod feed;
pub mod http;
pub mod middleware;
pub mod models;
pub mod places;
pub mod reviews;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use middleware::{
    IpRateLimiter, RATE_LIMIT_PRUNE_INTERVAL, cors_layer, create_rate_limiter,
    rate_limit_middleware, spawn_rate_limit_pruning,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::{config::Config, errors::AppError, places::GooglePlacesClient, state::AppState};

/// Full router: reviews routes plus rate limiting, CORS and request tracing.
pub fn create_app(state: AppState, rate_limiter: IpRateLimiter) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { "404 Not Found" })
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    if let Err(AppError::ConfigurationMissing { missing }) = config.credentials() {
        tracing::warn!(
            "Reviews endpoint will fail until these are set: {:?}",
            missing
        );
    }

    let places = GooglePlacesClient::new(&config)?;
    let port = config.port;
    let rate_limiter = create_rate_limiter(&config);
    spawn_rate_limit_pruning(rate_limiter.clone(), RATE_LIMIT_PRUNE_INTERVAL);

    let state = AppState::new(config, Arc::new(places));
    let app = create_app(state, rate_limiter);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {port}: {e}")))?;

    tracing::info!("Salon reviews server running at http://127.0.0.1:{}", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::UnexpectedFailure(e.to_string()))
}
