use serde::{Deserialize, Serialize};

/// One customer review as returned by the Places API and re-exposed by
/// `/api/google-reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub relative_time_description: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub profile_photo_url: String,
    /// Unix timestamp. Some place-details shapes omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl Review {
    /// First run of digits in `relative_time_description`, e.g. "3 weeks ago" -> 3.
    /// Labels without a number ("a week ago") rank as 0, the most recent;
    /// numbers too large for `u64` rank last.
    pub fn recency_rank(&self) -> u64 {
        self.relative_time_description
            .split(|c: char| !c.is_ascii_digit())
            .find(|token| !token.is_empty())
            .map(|token| token.parse().unwrap_or(u64::MAX))
            .unwrap_or(0)
    }

    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsEnvelope {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
