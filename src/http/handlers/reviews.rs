use axum::{Json, extract::State};

use crate::{errors::AppError, models::ReviewsEnvelope, reviews::fetch_reviews, state::AppState};

pub async fn get_google_reviews_handler(
    State(state): State<AppState>,
) -> Result<Json<ReviewsEnvelope>, AppError> {
    match fetch_reviews(&state.config, state.places.as_ref()).await {
        Ok(reviews) => Ok(Json(ReviewsEnvelope { reviews })),
        Err(err) => {
            tracing::warn!("Serving reviews error: {}", err);
            Err(err)
        }
    }
}
