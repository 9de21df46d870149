//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints
//! - WebSocket call event stream
//! - Request/response formatting

pub mod api;
