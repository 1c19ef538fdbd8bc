use axum::http::StatusCode;

use crate::{
    config::Config,
    errors::AppError,
    models::{
        Review,
        places::{PlaceDetailsResponse, PlacesErrorBody},
    },
    places::PlacesApi,
};

/// Fetches, validates and orders the reviews for the configured place.
///
/// The credential gate runs before the upstream is touched; every other
/// failure is scoped to this one call.
pub async fn fetch_reviews(config: &Config, places: &dyn PlacesApi) -> Result<Vec<Review>, AppError> {
    let (place_id, api_key) = config.credentials().inspect_err(|e| {
        if let AppError::ConfigurationMissing { missing } = e {
            tracing::error!("Missing environment variables: {:?}", missing);
        }
    })?;

    let reply = places.place_details(place_id, api_key).await?;
    let status = StatusCode::from_u16(reply.status).map_err(|e| {
        tracing::error!("Google API returned an invalid status {}: {}", reply.status, e);
        AppError::UnexpectedFailure(e.to_string())
    })?;

    if !status.is_success() {
        tracing::error!(
            "Google API error: status={}, body={}",
            status.as_u16(),
            reply.body
        );
        return Err(upstream_error(status, &reply.body));
    }

    let mut reviews = parse_reviews(&reply.body)?;
    sort_by_time_desc(&mut reviews);

    tracing::info!("Fetched {} reviews", reviews.len());
    Ok(reviews)
}

fn upstream_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<PlacesErrorBody>(body)
        .ok()
        .and_then(|b| b.error_message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string())
        });

    AppError::UpstreamError { status, message }
}

/// Decodes a successful place-details body and validates `result.reviews`.
///
/// A body that is not JSON at all is an unexpected failure; JSON without a
/// well-formed reviews array is a malformed response.
pub fn parse_reviews(body: &str) -> Result<Vec<Review>, AppError> {
    let response: PlaceDetailsResponse = serde_json::from_str(body).map_err(|e| {
        if e.is_data() {
            tracing::error!("Invalid response format ({}): {}", e, body);
            AppError::MalformedUpstreamResponse
        } else {
            tracing::error!("Unexpected error in Google Reviews API: {}", e);
            AppError::UnexpectedFailure(e.to_string())
        }
    })?;

    match response.result.and_then(|result| result.reviews) {
        Some(reviews) => Ok(reviews),
        None => {
            tracing::error!(
                "Invalid response format (api status: {}, message: {}): {}",
                response.status.as_deref().unwrap_or("none"),
                response.error_message.as_deref().unwrap_or("none"),
                body
            );
            Err(AppError::MalformedUpstreamResponse)
        }
    }
}

/// Most recent first, but only when every record carries a timestamp.
/// Otherwise the upstream order is kept.
pub fn sort_by_time_desc(reviews: &mut [Review]) {
    if reviews.iter().all(|r| r.time.is_some()) {
        reviews.sort_by(|a, b| b.time.cmp(&a.time));
    }
}
