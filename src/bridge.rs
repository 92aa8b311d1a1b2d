//! Application-facing bridge surface.
//!
//! The async request/response operations mirror the host bridge contract:
//! booleans for idempotent start/stop, a never-failing availability probe,
//! and listener reference counting driven by the host's own attach/detach
//! bookkeeping. Step updates are pushed fire-and-forget to the attached
//! emitter as JSON payloads under the `StepCounterUpdate` event name.

use crate::error::Result;
use crate::events::StepEvent;
use crate::session::StepSession;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Event name the host listens on for step updates.
pub const STEP_COUNTER_UPDATE_EVENT: &str = "StepCounterUpdate";

/// Sink for fire-and-forget event emission across the bridge boundary.
/// Invoked with the event name and the serialized payload
/// `{ steps, totalSteps, timestamp }`.
pub type EventEmitter = Arc<dyn Fn(&str, Value) + Send + Sync>;

/// In-process stand-in for the host RPC boundary.
pub struct PedometerBridge {
    session: Arc<StepSession>,
}

impl PedometerBridge {
    /// Wire `emitter` to the session's event stream and expose the bridge
    /// operations over it.
    pub fn new(session: Arc<StepSession>, emitter: EventEmitter) -> Self {
        session.channel().subscribe(Arc::new(move |event: &StepEvent| {
            match serde_json::to_value(event) {
                Ok(payload) => emitter(STEP_COUNTER_UPDATE_EVENT, payload),
                Err(e) => warn!("Failed to serialize step event: {}", e),
            }
        }));
        Self { session }
    }

    /// `true` if newly started, `false` if already running. Rejects with
    /// the `E_STEP_COUNTER` code when no hardware sensor exists.
    pub async fn start_step_counter_update(&self) -> Result<bool> {
        self.session.start()
    }

    /// `true` if stopped, `false` if not running.
    pub async fn stop_step_counter_update(&self) -> bool {
        self.session.stop()
    }

    /// Availability probe; never fails.
    pub async fn is_step_counting_available(&self) -> bool {
        self.session.is_available()
    }

    /// One logical listener attached on the host side. The event name is
    /// recorded for diagnostics only; the host multiplexes its own
    /// callbacks.
    pub fn add_listener(&self, event_name: &str) {
        debug!("Listener attached for '{}'", event_name);
        self.session.add_subscriber();
    }

    /// `count` logical listeners detached on the host side; saturates at
    /// zero and auto-stops the session when the last one goes.
    pub fn remove_listeners(&self, count: usize) {
        self.session.remove_subscribers(count);
    }
}
