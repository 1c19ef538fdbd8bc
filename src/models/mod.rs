pub mod places;
pub mod review;

pub use review::{ErrorEnvelope, Review, ReviewsEnvelope};
