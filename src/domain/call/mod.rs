//! Call bounded context - placed calls and their simulated lifecycle

pub mod aggregate;
pub mod event;
pub mod registry;
pub mod simulator;
pub mod value_object;

pub use aggregate::Call;
pub use event::{CallEvent, EventBroadcaster};
pub use registry::{Advance, CallRegistry};
pub use simulator::LifecycleSimulator;
pub use value_object::CallStatus;
