//! catiSip - an HTTP front end over a placeholder telephony client
//!
//! Calls are placed, hung up and queried over a small JSON API. There is no
//! signaling behind them yet: each placed call is advanced through
//! `dialing -> ringing -> answered` by a background simulator, and all call
//! state lives in an in-memory registry for the lifetime of the process.

pub mod config;
pub mod domain;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::result::Result;
