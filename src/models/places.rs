use serde::Deserialize;

use crate::models::Review;

/// Error body of the place-details API. Only the message matters to us.
#[derive(Debug, Default, Deserialize)]
pub struct PlacesErrorBody {
    pub error_message: Option<String>,
}

/// Raw reply from the place-details endpoint before any validation.
#[derive(Debug, Clone)]
pub struct PlaceDetailsReply {
    pub status: u16,
    pub body: String,
}

/// Successful place-details payload, requested with `fields=reviews`.
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub result: Option<PlaceResult>,
    /// Request-level outcome (`OK`, `REQUEST_DENIED`, `INVALID_REQUEST`), sent next to an HTTP 200.
    pub status: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub reviews: Option<Vec<Review>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(payload: serde_json::Value) -> Option<PlaceDetailsResponse> {
        serde_json::from_value(payload).ok()
    }

    fn reviews_of(response: PlaceDetailsResponse) -> Option<Vec<Review>> {
        response.result?.reviews
    }

    #[test]
    fn reviews_require_result_and_array() {
        let ok = decode(json!({"result": {"reviews": []}})).unwrap();
        assert_eq!(reviews_of(ok), Some(vec![]));

        assert!(decode(json!({"result": {"reviews": {}}})).is_none());
        assert!(reviews_of(decode(json!({"result": {}})).unwrap()).is_none());
        assert!(decode(json!([1, 2])).is_none());
    }

    #[test]
    fn denied_request_keeps_status() {
        let denied = decode(json!({"status": "REQUEST_DENIED", "error_message": "bad key"})).unwrap();
        assert_eq!(denied.status.as_deref(), Some("REQUEST_DENIED"));
        assert!(reviews_of(denied).is_none());
    }

    #[test]
    fn error_message_is_optional() {
        let body: PlacesErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error_message.is_none());
    }
}
