//! Call API DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /api/call/make`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MakeCallRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// Body of `POST /api/call/hangup`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HangupRequest {
    #[serde(default)]
    pub call_id: String,
}

/// Query of `GET /api/call/status`
#[derive(Debug, Default, Deserialize)]
pub struct CallStatusQuery {
    pub call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HangupResponse {
    pub status: String,
}

impl HangupResponse {
    pub fn ended() -> Self {
        Self {
            status: "call ended".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// A SIP extension as listed by `GET /api/extensions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionInfo {
    pub extension: String,
    pub status: String,
}

impl ExtensionInfo {
    pub fn new(extension: &str, status: &str) -> Self {
        Self {
            extension: extension.to_string(),
            status: status.to_string(),
        }
    }
}
