//! API interface implementations

pub mod call_dto;
pub mod calls_handler;
pub mod error;
pub mod feedback_handler;
pub mod metrics_handler;
pub mod router;
pub mod state;
pub mod ws_handler;

pub use error::ApiError;
pub use metrics_handler::{detached_handle, init_metrics};
pub use router::build_router;
pub use state::AppState;
