//! Call aggregate root

use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::CallId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call aggregate root
///
/// One logical call attempt. The registry hands out clones of this type, so a
/// value held by a caller is a snapshot and never changes underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    id: CallId,
    from: String,
    to: String,
    status: CallStatus,
    start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<DateTime<Utc>>,
}

impl Call {
    /// Create a new call in the `dialing` state
    pub fn new(id: CallId, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id,
            from: from.into(),
            to: to.into(),
            status: CallStatus::Dialing,
            start_time: Utc::now(),
            answer_time: None,
            end_time: None,
        }
    }

    /// Callee is being alerted
    pub fn ring(&mut self) -> Result<()> {
        self.transition_to(CallStatus::Ringing)
    }

    /// Callee picked up
    pub fn answer(&mut self) -> Result<()> {
        self.transition_to(CallStatus::Answered)?;
        self.answer_time = Some(Utc::now());
        Ok(())
    }

    /// Hang the call up.
    ///
    /// Always succeeds. Hanging up an already ended call keeps it `ended` and
    /// moves `end_time` forward to now.
    pub fn end(&mut self) {
        self.status = CallStatus::Ended;
        self.end_time = Some(Utc::now());
    }

    fn transition_to(&mut self, new_status: CallStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidStateTransition(format!(
                "Cannot transition call {} from {} to {}",
                self.id, self.status, new_status
            )));
        }

        self.status = new_status;
        Ok(())
    }

    // Getters
    pub fn id(&self) -> &CallId {
        &self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn answer_time(&self) -> Option<DateTime<Utc>> {
        self.answer_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }
}
