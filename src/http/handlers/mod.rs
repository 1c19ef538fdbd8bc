pub mod reviews;

pub use reviews::get_google_reviews_handler;
