//! Shared handler state

use crate::domain::call::CallRegistry;
use crate::domain::feedback::FeedbackStore;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub registry: CallRegistry,
    pub feedback: Arc<FeedbackStore>,
}

impl AppState {
    pub fn new(registry: CallRegistry) -> Self {
        Self {
            registry,
            feedback: Arc::new(FeedbackStore::new()),
        }
    }
}
