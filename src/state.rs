use std::sync::Arc;

use crate::{config::Config, places::PlacesApi};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub places: SharedPlacesApi,
}

pub type SharedPlacesApi = Arc<dyn PlacesApi>;

impl AppState {
    pub fn new(config: Config, places: SharedPlacesApi) -> Self {
        Self {
            config: Arc::new(config),
            places,
        }
    }
}
