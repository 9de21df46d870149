//! User feedback collection
//!
//! Append-only, in-memory, kept for the lifetime of the process.

use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Submitted feedback as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// Feedback as submitted, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFeedback {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: i32,
}

impl NewFeedback {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(DomainError::ValidationError(
                "Name, email, and message are required".to_string(),
            ));
        }

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(DomainError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        Ok(())
    }
}

#[derive(Debug)]
struct FeedbackLog {
    entries: Vec<Feedback>,
    next_id: u64,
}

#[derive(Debug)]
pub struct FeedbackStore {
    log: RwLock<FeedbackLog>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self {
            log: RwLock::new(FeedbackLog {
                entries: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Validate and store a submission
    pub async fn submit(&self, submission: NewFeedback) -> Result<Feedback> {
        submission.validate()?;

        let feedback = {
            let mut log = self.log.write().await;
            let feedback = Feedback {
                id: format!("feedback-{}", log.next_id),
                name: submission.name,
                email: submission.email,
                message: submission.message,
                rating: submission.rating,
                created_at: Utc::now(),
            };
            log.next_id += 1;
            log.entries.push(feedback.clone());
            feedback
        };

        info!("Feedback {} received (rating {})", feedback.id, feedback.rating);
        counter!("feedback_submitted_total").increment(1);

        Ok(feedback)
    }

    /// All feedback in submission order
    pub async fn list(&self) -> Vec<Feedback> {
        self.log.read().await.entries.clone()
    }
}

impl Default for FeedbackStore {
    fn default() -> Self {
        Self::new()
    }
}
