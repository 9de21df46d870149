//! Call value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Call status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Call has been placed, callee not yet alerted
    Dialing,
    /// Callee is being alerted
    Ringing,
    /// Call has been answered
    Answered,
    /// Call has been hung up
    Ended,
}

impl CallStatus {
    /// Check if state transition is valid
    pub fn can_transition_to(&self, new_status: CallStatus) -> bool {
        use CallStatus::*;

        match (self, new_status) {
            (Dialing, Ringing) => true,
            (Ringing, Answered) => true,

            // Hangup is accepted from anywhere, including a repeated hangup
            (_, Ended) => true,

            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Ended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Dialing => "dialing",
            CallStatus::Ringing => "ringing",
            CallStatus::Answered => "answered",
            CallStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
