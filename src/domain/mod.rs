//! Domain layer - Core business logic and rules
//!
//! - `call`: the call registry and its lifecycle simulator
//! - `feedback`: user feedback collection
//! - `shared`: errors, ids and event plumbing used by both

pub mod call;
pub mod feedback;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
