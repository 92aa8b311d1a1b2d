//! Sensor session state machine.
//!
//! `StepSession` is the single authority over the hardware registration: it
//! is the only component that calls register/unregister on the port. Raw
//! readings flow through calibration here and fan out to subscribers via the
//! event channel.
//!
//! Hardware registration is derived from two independent axes - "logically
//! started" (explicit start/stop calls) and "foregrounded" (host lifecycle) -
//! combined in one place, [`apply_registration`](StepSession). Both call
//! sites that touch the port go through it, so the two axes cannot drift.

use crate::calibration::{CalibrationState, ResetPolicy};
use crate::error::{PedometerError, Result};
use crate::events::{EventChannel, StepEvent};
use crate::port::{RawReadingCallback, SensorPort};
use crate::subscription::SubscriptionRegistry;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

/// All mutable session state, guarded by a single lock so a raw-reading
/// callback and a concurrent start/stop can never interleave partially.
struct SessionState {
    /// True iff an active hardware registration exists.
    registered: bool,
    /// True between a successful `start()` and the matching `stop()`.
    started: bool,
    /// Host application foreground state, driven by the lifecycle layer.
    foreground: bool,
    /// Terminal teardown flag. No registration can be armed once set.
    destroyed: bool,
    calibration: CalibrationState,
    registry: SubscriptionRegistry,
}

impl SessionState {
    /// The registration state table: armed iff logically started, in the
    /// foreground, and not torn down.
    fn wants_registration(&self) -> bool {
        self.started && self.foreground && !self.destroyed
    }
}

/// Owns one [`SensorPort`] registration and the calibrated event stream.
///
/// Created once for the process lifetime of the owning module; stopped but
/// not recreated on host teardown.
pub struct StepSession {
    port: Arc<dyn SensorPort>,
    channel: Arc<EventChannel>,
    state: Arc<Mutex<SessionState>>,
    callback: RawReadingCallback,
}

impl StepSession {
    pub fn new(port: Arc<dyn SensorPort>, reset_policy: ResetPolicy) -> Arc<Self> {
        let channel = Arc::new(EventChannel::new());
        let state = Arc::new(Mutex::new(SessionState {
            registered: false,
            started: false,
            // Mirrors the lifecycle of a freshly launched host application.
            foreground: true,
            destroyed: false,
            calibration: CalibrationState::new(reset_policy),
            registry: SubscriptionRegistry::new(),
        }));

        let callback_state = state.clone();
        let callback_channel = channel.clone();
        let callback: RawReadingCallback = Arc::new(move |raw| {
            Self::on_raw_reading(&callback_state, &callback_channel, raw);
        });

        Arc::new(Self {
            port,
            channel,
            state,
            callback,
        })
    }

    /// The fan-out channel delivering calibrated [`StepEvent`]s.
    pub fn channel(&self) -> &Arc<EventChannel> {
        &self.channel
    }

    /// True iff the hardware exposes a step-counter sensor. Never fails.
    pub fn is_available(&self) -> bool {
        self.port.is_available()
    }

    /// Begin counting: re-baseline calibration and arm the hardware
    /// registration (subject to the foreground axis).
    ///
    /// Returns `Ok(false)` if already started - a deliberate idempotence
    /// guarantee, not an error. Fails with [`PedometerError::SensorUnavailable`]
    /// when no step-counter hardware exists; that condition is permanent for
    /// the process and never retried.
    pub fn start(&self) -> Result<bool> {
        if !self.port.is_available() {
            return Err(PedometerError::SensorUnavailable);
        }
        let mut state = self.state.lock();
        if state.started {
            return Ok(false);
        }
        state.started = true;
        state.calibration.reset();
        self.apply_registration(&mut state);
        info!("Step counting started");
        Ok(true)
    }

    /// Stop counting and disarm the hardware registration.
    ///
    /// Returns `false` if not currently started. Calibration is retained
    /// until the next `start()`, which always re-baselines.
    pub fn stop(&self) -> bool {
        let mut state = self.state.lock();
        self.stop_locked(&mut state)
    }

    /// Add one logical subscriber. Does not arm the session; a caller may
    /// `start()` before any subscriber exists to pre-warm calibration.
    pub fn add_subscriber(&self) {
        let mut state = self.state.lock();
        state.registry.add_subscriber();
        debug!("Subscriber added, count={}", state.registry.count());
    }

    /// Remove up to `n` logical subscribers, saturating at zero. Dropping to
    /// zero stops the session as a fire-and-forget cleanup policy.
    pub fn remove_subscribers(&self, n: usize) {
        let mut state = self.state.lock();
        if state.registry.remove_subscribers(n) {
            // Last subscriber gone; result deliberately discarded.
            let _ = self.stop_locked(&mut state);
            debug!("Last subscriber removed, session stopped");
        }
    }

    /// Host application moved between foreground and background. Re-arms or
    /// disarms the hardware registration without touching calibration or the
    /// subscriber count.
    pub(crate) fn set_foreground(&self, foreground: bool) {
        let mut state = self.state.lock();
        state.foreground = foreground;
        self.apply_registration(&mut state);
    }

    /// Host teardown: unconditionally disarm and force the registry to
    /// zero. Subscribers are not notified; this is process teardown.
    pub(crate) fn teardown(&self) {
        let mut state = self.state.lock();
        state.destroyed = true;
        state.started = false;
        state.registry.clear();
        self.apply_registration(&mut state);
        info!("Session torn down");
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().started
    }

    pub fn is_registered(&self) -> bool {
        self.state.lock().registered
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().registry.count()
    }

    fn stop_locked(&self, state: &mut SessionState) -> bool {
        if !state.started {
            return false;
        }
        state.started = false;
        self.apply_registration(state);
        info!("Step counting stopped");
        true
    }

    /// Reconcile the actual hardware registration with the state table.
    /// Sole caller of register/unregister, so the port never sees a
    /// redundant registration.
    fn apply_registration(&self, state: &mut SessionState) {
        let desired = state.wants_registration();
        if desired && !state.registered {
            self.port.register(self.callback.clone());
            state.registered = true;
            debug!("Hardware listener registered");
        } else if !desired && state.registered {
            self.port.unregister();
            state.registered = false;
            debug!("Hardware listener unregistered");
        }
    }

    /// Hardware callback entry point. Always advances calibration; publishes
    /// only when at least one logical subscriber is attached. Fan-out runs
    /// under the session lock, on the sensor delivery thread.
    fn on_raw_reading(state: &Mutex<SessionState>, channel: &EventChannel, raw: f32) {
        let mut state = state.lock();
        if !state.registered {
            // Late delivery racing an unregister; drop it.
            return;
        }
        let (delta, total) = state.calibration.observe(raw);
        if state.registry.count() > 0 {
            channel.publish(&StepEvent::new(delta, total));
        }
    }
}
