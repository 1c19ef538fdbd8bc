use std::str::FromStr;

use crate::{errors::AppError, models::Review};

/// Selection and ordering applied to fetched reviews before they are shown.
///
/// Exactly one policy is active per feed. Every variant is a pure function of
/// its input and all sorts are stable, so equal keys keep upstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPolicy {
    /// All reviews, newest first, optionally truncated. Uses `time` when every
    /// record has one and the recency label otherwise.
    Chronological { limit: Option<usize> },
    /// Five-star reviews only, most recent label first, longer text breaking ties.
    FiveStarRecent,
    /// All reviews, longest text first.
    LongestFirst,
}

impl DisplayPolicy {
    /// Applies a display cap. Zero means no cap; policies without a cap ignore it.
    pub fn with_limit(self, limit: usize) -> Self {
        match self {
            DisplayPolicy::Chronological { .. } => DisplayPolicy::Chronological {
                limit: (limit > 0).then_some(limit),
            },
            other => other,
        }
    }

    pub fn apply(&self, reviews: &[Review]) -> Vec<Review> {
        match self {
            DisplayPolicy::Chronological { limit } => {
                let mut shown = reviews.to_vec();
                if shown.iter().all(|r| r.time.is_some()) {
                    shown.sort_by(|a, b| b.time.cmp(&a.time));
                } else {
                    shown.sort_by_key(Review::recency_rank);
                }
                if let Some(limit) = limit {
                    shown.truncate(*limit);
                }
                shown
            }
            DisplayPolicy::FiveStarRecent => {
                let mut shown: Vec<Review> =
                    reviews.iter().filter(|r| r.rating == 5).cloned().collect();
                shown.sort_by(|a, b| {
                    a.recency_rank()
                        .cmp(&b.recency_rank())
                        .then_with(|| b.text_len().cmp(&a.text_len()))
                });
                shown
            }
            DisplayPolicy::LongestFirst => {
                let mut shown = reviews.to_vec();
                shown.sort_by(|a, b| b.text_len().cmp(&a.text_len()));
                shown
            }
        }
    }
}

impl FromStr for DisplayPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chronological" => Ok(DisplayPolicy::Chronological { limit: None }),
            "five-star" | "five_star" => Ok(DisplayPolicy::FiveStarRecent),
            "longest" => Ok(DisplayPolicy::LongestFirst),
            other => Err(AppError::EnvError(format!(
                "REVIEWS_DISPLAY_POLICY must be chronological, five-star or longest, got {other:?}"
            ))),
        }
    }
}
