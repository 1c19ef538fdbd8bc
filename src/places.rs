use async_trait::async_trait;
use reqwest::Client;

use crate::{config::Config, errors::AppError, models::places::PlaceDetailsReply};

const DETAILS_PATH: &str = "/maps/api/place/details/json";

/// Source of place-details payloads. Handlers only see this trait so tests
/// can swap in a stub upstream.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn place_details(
        &self,
        place_id: &str,
        api_key: &str,
    ) -> Result<PlaceDetailsReply, AppError>;
}

#[derive(Clone)]
pub struct GooglePlacesClient {
    http: Client,
    base_url: String,
    language: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| AppError::EnvError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.places_base_url.clone(),
            language: config.reviews_language.clone(),
        })
    }

    fn query<'a>(&'a self, place_id: &'a str, api_key: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![
            ("place_id", place_id),
            ("fields", "reviews"),
            ("key", api_key),
        ];
        if let Some(language) = self.language.as_deref() {
            query.push(("language", language));
        }
        query
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn place_details(
        &self,
        place_id: &str,
        api_key: &str,
    ) -> Result<PlaceDetailsReply, AppError> {
        let url = format!("{}{}", self.base_url, DETAILS_PATH);
        tracing::debug!(
            "Fetching reviews from: {}?place_id={}&fields=reviews&key=<redacted>",
            url,
            place_id
        );

        let res = self
            .http
            .get(&url)
            .query(&self.query(place_id, api_key))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Google Places API: {}", e);
                AppError::UnexpectedFailure(e.without_url().to_string())
            })?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| {
            tracing::error!("Failed to read Google Places API response: {}", e);
            AppError::UnexpectedFailure(e.without_url().to_string())
        })?;

        Ok(PlaceDetailsReply { status, body })
    }
}
