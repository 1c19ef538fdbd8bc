#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::Router;
use salon_reviews::{
    config::Config, create_app, errors::AppError, middleware::create_rate_limiter, models::Review,
    models::places::PlaceDetailsReply, places::PlacesApi, state::AppState,
};

/// Upstream stand-in that replays one canned reply and counts calls.
pub struct StubPlaces {
    pub status: u16,
    pub body: String,
    /// 1-based call numbers that get a 503 instead of the canned reply.
    pub failing_calls: Vec<usize>,
    calls: AtomicUsize,
}

impl StubPlaces {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            failing_calls: Vec::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing_on(status: u16, body: impl Into<String>, failing_calls: Vec<usize>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            failing_calls,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesApi for StubPlaces {
    async fn place_details(
        &self,
        _place_id: &str,
        _api_key: &str,
    ) -> Result<PlaceDetailsReply, AppError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_calls.contains(&call) {
            return Ok(PlaceDetailsReply {
                status: 503,
                body: r#"{"error_message":"Backend unavailable"}"#.into(),
            });
        }
        Ok(PlaceDetailsReply {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub fn configured() -> Config {
    Config {
        place_id: Some("test-place".into()),
        api_key: Some("test-key".into()),
        ..Config::default()
    }
}

pub fn app_with(config: Config, places: Arc<StubPlaces>) -> Router {
    let rate_limiter = create_rate_limiter(&config);
    create_app(AppState::new(config, places), rate_limiter)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    format!("http://{addr}")
}

pub fn review(author: &str, rating: u8, label: &str, text: &str, time: Option<i64>) -> Review {
    Review {
        author_name: author.into(),
        rating,
        relative_time_description: label.into(),
        text: text.into(),
        profile_photo_url: String::new(),
        time,
    }
}
