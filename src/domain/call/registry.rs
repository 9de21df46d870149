//! In-memory call registry
//!
//! Every call placed through the registry stays in it until the process
//! exits; there is no eviction of ended calls. All reads and writes go through
//! one readers-writer lock over the whole map, held for a single map operation
//! at a time, so a reader never sees half of a transition.

use crate::config::{SimulationConfig, SipConfig};
use crate::domain::call::aggregate::Call;
use crate::domain::call::event::{CallEvent, EventBroadcaster};
use crate::domain::call::simulator::LifecycleSimulator;
use crate::domain::call::value_object::CallStatus;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::result::Result;
use crate::domain::shared::value_objects::CallId;
use chrono::Utc;
use metrics::{counter, gauge};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Outcome of a simulator-driven transition
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The call moved to the requested status
    Applied(Call),
    /// The call had already moved elsewhere; nothing was written
    Skipped(CallStatus),
    /// No such call
    Missing,
}

struct RegistryInner {
    calls: RwLock<HashMap<CallId, Call>>,
    sip: SipConfig,
    simulation: SimulationConfig,
    events: EventBroadcaster,
    simulations: Mutex<JoinSet<()>>,
}

/// Concurrency-safe store of call records
///
/// Cheap to clone; clones share the same calls.
#[derive(Clone)]
pub struct CallRegistry {
    inner: Arc<RegistryInner>,
}

impl CallRegistry {
    pub fn new(sip: SipConfig, simulation: SimulationConfig) -> Self {
        info!(
            "Call registry created for SIP endpoint {}:{} (domain {})",
            sip.host, sip.port, sip.domain
        );

        Self {
            inner: Arc::new(RegistryInner {
                calls: RwLock::new(HashMap::new()),
                sip,
                simulation,
                events: EventBroadcaster::new(),
                simulations: Mutex::new(JoinSet::new()),
            }),
        }
    }

    /// Place a call from `from` to `to`.
    ///
    /// Both parties are expected to be non-empty; that is checked at the API
    /// boundary. Starts the lifecycle simulator for the new call.
    pub async fn place_call(&self, from: &str, to: &str) -> Call {
        let call = Call::new(CallId::new(), from, to);
        let call_id = call.id().clone();

        let tracked = {
            let mut calls = self.inner.calls.write().await;
            calls.insert(call_id.clone(), call.clone());
            calls.len()
        };

        info!("Call {} placed: {} -> {}", call_id, from, to);
        counter!("calls_placed_total").increment(1);
        gauge!("calls_tracked").set(tracked as f64);

        self.inner.events.publish(CallEvent::CallPlaced {
            call_id: call_id.clone(),
            from: call.from().to_string(),
            to: call.to().to_string(),
            occurred_at: call.start_time(),
        });

        let simulator = LifecycleSimulator::new(self.clone(), call_id, self.inner.simulation);
        {
            let mut simulations = self.simulations();
            while simulations.try_join_next().is_some() {}
            simulations.spawn(simulator.run());
        }

        call
    }

    /// Hang up a call.
    ///
    /// Hanging up a call that has already ended succeeds again and moves its
    /// `end_time` forward.
    pub async fn hangup(&self, call_id: &CallId) -> Result<Call> {
        let call = {
            let mut calls = self.inner.calls.write().await;
            let call = calls
                .get_mut(call_id)
                .ok_or_else(|| not_found(call_id))?;
            if call.status().is_terminal() {
                debug!("Call {} already ended, hanging up again", call_id);
            }
            call.end();
            call.clone()
        };

        info!("Call {} hung up", call_id);
        counter!("calls_ended_total").increment(1);

        self.inner.events.publish(CallEvent::CallEnded {
            call_id: call_id.clone(),
            occurred_at: call.end_time().unwrap_or_else(Utc::now),
        });

        Ok(call)
    }

    /// Snapshot of a single call
    pub async fn get_status(&self, call_id: &CallId) -> Result<Call> {
        let calls = self.inner.calls.read().await;
        calls
            .get(call_id)
            .cloned()
            .ok_or_else(|| not_found(call_id))
    }

    /// Snapshot of every call, in no particular order
    pub async fn list_calls(&self) -> Vec<Call> {
        let calls = self.inner.calls.read().await;
        calls.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.calls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.calls.read().await.is_empty()
    }

    /// Move a call to `ringing` or `answered` if its current status allows it.
    ///
    /// Status is re-read under the write lock, so a hangup that got there first
    /// wins and the transition is skipped.
    pub(crate) async fn advance(&self, call_id: &CallId, to: CallStatus) -> Advance {
        let (old_status, call) = {
            let mut calls = self.inner.calls.write().await;
            let Some(call) = calls.get_mut(call_id) else {
                return Advance::Missing;
            };

            let old_status = call.status();
            let transition = match to {
                CallStatus::Ringing => call.ring(),
                CallStatus::Answered => call.answer(),
                other => Err(DomainError::InvalidStateTransition(format!(
                    "simulator cannot move a call to {}",
                    other
                ))),
            };

            if let Err(e) = transition {
                debug!("Skipping transition of call {}: {}", call_id, e);
                return Advance::Skipped(old_status);
            }

            (old_status, call.clone())
        };

        if to == CallStatus::Answered {
            counter!("calls_answered_total").increment(1);
        }

        self.inner.events.publish(CallEvent::CallStatusChanged {
            call_id: call_id.clone(),
            old_status,
            new_status: to,
            occurred_at: Utc::now(),
        });

        Advance::Applied(call)
    }

    /// Subscribe to call lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.inner.events.subscribe()
    }

    /// Number of live event subscribers
    pub fn event_subscribers(&self) -> usize {
        self.inner.events.subscriber_count()
    }

    /// SIP endpoint the registry was configured with
    pub fn sip_config(&self) -> &SipConfig {
        &self.inner.sip
    }

    /// Number of simulator tasks still running
    pub fn pending_simulations(&self) -> usize {
        let mut simulations = self.simulations();
        while simulations.try_join_next().is_some() {}
        simulations.len()
    }

    /// Abort every simulator task still in flight.
    ///
    /// Calls keep whatever status they had reached.
    pub fn shutdown(&self) {
        let mut simulations = self.simulations();
        let pending = simulations.len();
        simulations.abort_all();
        info!("Call registry shut down, {} simulator task(s) aborted", pending);
    }

    fn simulations(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.inner
            .simulations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn not_found(call_id: &CallId) -> DomainError {
    DomainError::NotFound(format!("call not found: {}", call_id))
}
