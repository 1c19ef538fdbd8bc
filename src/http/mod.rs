pub mod handlers;
pub mod routes;

pub use handlers::get_google_reviews_handler;
pub use routes::{REVIEWS_PATH, create_http_routes};
