//! Loader that drives one reviews fetch per mount and exposes the result to
//! a render surface.
//!
//! A feed starts in [`FeedState::Loading`] and moves once to either
//! [`FeedState::Ready`] or [`FeedState::Error`]. There is no refresh; a new
//! fetch needs a new mount. Results arriving after [`ReviewsFeed::unmount`]
//! (or drop) are discarded.

pub mod client;
pub mod policy;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::models::Review;

pub use client::{HttpReviewsEndpoint, ReviewsEndpoint};
pub use policy::DisplayPolicy;

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load reviews";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Ready(Vec<Review>),
    Error(String),
}

/// What the render surface should draw.
///
/// A failed load hides the reviews section entirely.
#[derive(Debug, PartialEq, Eq)]
pub enum FeedView<'a> {
    Placeholder,
    Reviews(&'a [Review]),
    Hidden,
}

impl FeedState {
    pub fn view(&self) -> FeedView<'_> {
        match self {
            FeedState::Loading => FeedView::Placeholder,
            FeedState::Ready(reviews) => FeedView::Reviews(reviews),
            FeedState::Error(_) => FeedView::Hidden,
        }
    }
}

#[derive(Debug)]
struct Slot {
    mounted: bool,
    state: FeedState,
}

type SharedSlot = Arc<Mutex<Slot>>;

fn lock(slot: &SharedSlot) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct ReviewsFeed {
    slot: SharedSlot,
    task: Option<JoinHandle<()>>,
}

impl ReviewsFeed {
    /// Enters `Loading` and starts the single fetch for this mount.
    /// Must be called inside a tokio runtime.
    pub fn mount(endpoint: Arc<dyn ReviewsEndpoint>, policy: DisplayPolicy) -> Self {
        let slot = Arc::new(Mutex::new(Slot {
            mounted: true,
            state: FeedState::Loading,
        }));
        let task = tokio::spawn(load(endpoint, policy, slot.clone()));

        Self {
            slot,
            task: Some(task),
        }
    }

    pub fn state(&self) -> FeedState {
        lock(&self.slot).state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.slot).mounted
    }

    /// Waits for the fetch to finish and returns the terminal state.
    pub async fn settled(&mut self) -> FeedState {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Reviews fetch task failed: {}", e);
                let mut slot = lock(&self.slot);
                if slot.mounted && slot.state == FeedState::Loading {
                    slot.state = FeedState::Error(LOAD_ERROR_MESSAGE.to_string());
                }
            }
        }
        self.state()
    }

    /// Marks the feed unmounted. The in-flight request keeps running but its
    /// result is dropped; the returned handle lets callers wait for it.
    pub fn unmount(mut self) -> Option<JoinHandle<()>> {
        lock(&self.slot).mounted = false;
        self.task.take()
    }
}

impl Drop for ReviewsFeed {
    fn drop(&mut self) {
        lock(&self.slot).mounted = false;
    }
}

async fn load(endpoint: Arc<dyn ReviewsEndpoint>, policy: DisplayPolicy, slot: SharedSlot) {
    let next = match endpoint.get_reviews().await {
        Ok(reviews) => FeedState::Ready(policy.apply(&reviews)),
        Err(err) => {
            tracing::error!("Error fetching reviews: {}", err);
            FeedState::Error(LOAD_ERROR_MESSAGE.to_string())
        }
    };

    let mut slot = lock(&slot);
    if !slot.mounted {
        tracing::debug!("Discarding reviews result for an unmounted feed");
        return;
    }
    slot.state = next;
}
