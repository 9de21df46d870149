//! Call lifecycle simulator
//!
//! There is no signaling behind a placed call, so each one gets a task that
//! walks it through `dialing -> ringing -> answered` on a fixed timer. A
//! hangup can land at any point; every step re-checks the call under the
//! registry's write lock and gives up once the call has moved on.

use crate::config::SimulationConfig;
use crate::domain::call::registry::{Advance, CallRegistry};
use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::value_objects::CallId;
use tracing::debug;

pub struct LifecycleSimulator {
    registry: CallRegistry,
    call_id: CallId,
    timings: SimulationConfig,
}

impl LifecycleSimulator {
    pub fn new(registry: CallRegistry, call_id: CallId, timings: SimulationConfig) -> Self {
        Self {
            registry,
            call_id,
            timings,
        }
    }

    /// Run the simulated sequence to completion
    pub async fn run(self) {
        for (delay, next) in [
            (self.timings.ringing_delay(), CallStatus::Ringing),
            (self.timings.answer_delay(), CallStatus::Answered),
        ] {
            tokio::time::sleep(delay).await;

            match self.registry.advance(&self.call_id, next).await {
                Advance::Applied(_) => {
                    debug!("Simulated call {} is now {}", self.call_id, next);
                }
                Advance::Skipped(current) => {
                    debug!(
                        "Simulation of call {} stopped, call is already {}",
                        self.call_id, current
                    );
                    return;
                }
                Advance::Missing => {
                    debug!("Simulation of call {} stopped, call is gone", self.call_id);
                    return;
                }
            }
        }
    }
}
