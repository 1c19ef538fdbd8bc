use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    errors::FeedError,
    http::REVIEWS_PATH,
    models::{Review, ReviewsEnvelope},
};

/// The feed's view of `/api/google-reviews`.
#[async_trait]
pub trait ReviewsEndpoint: Send + Sync {
    async fn get_reviews(&self) -> Result<Vec<Review>, FeedError>;
}

pub struct HttpReviewsEndpoint {
    http: Client,
    url: String,
}

impl HttpReviewsEndpoint {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), REVIEWS_PATH),
        })
    }
}

#[async_trait]
impl ReviewsEndpoint for HttpReviewsEndpoint {
    async fn get_reviews(&self) -> Result<Vec<Review>, FeedError> {
        let res = self.http.get(&self.url).send().await?;

        if res.status() != StatusCode::OK {
            return Err(FeedError::Status(res.status().as_u16()));
        }

        let envelope: ReviewsEnvelope = res
            .json()
            .await
            .map_err(|e| FeedError::Payload(e.to_string()))?;

        Ok(envelope.reviews)
    }
}
