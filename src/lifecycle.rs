//! Host application lifecycle coordination.
//!
//! Translates resume/pause/destroy signals from the host into hardware
//! re-arm/disarm on the active session, without disturbing calibration or
//! the subscriber count. Layered on top of the session's own started flag:
//! backgrounding a started session pauses the hardware listener, resuming
//! picks it back up against the same baseline.

use crate::session::StepSession;
use log::{info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use strum::Display;

/// Tracked host lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LifecycleState {
    Foregrounded,
    Backgrounded,
    /// Terminal; no further transitions are valid.
    Destroyed,
}

/// Observes host lifecycle signals and drives the session's registration.
pub struct LifecycleCoordinator {
    session: Arc<StepSession>,
    state: Mutex<LifecycleState>,
}

impl LifecycleCoordinator {
    /// A freshly launched host starts in the foreground.
    pub fn new(session: Arc<StepSession>) -> Self {
        Self {
            session,
            state: Mutex::new(LifecycleState::Foregrounded),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock()
    }

    /// Host came to the foreground: re-arm the hardware listener if the
    /// session is logically started. Calibration continues toward the
    /// baseline established at the last start.
    pub fn on_host_resume(&self) {
        let mut state = self.state.lock();
        if *state == LifecycleState::Destroyed {
            warn!("Ignoring resume after destroy");
            return;
        }
        *state = LifecycleState::Foregrounded;
        info!("Host resumed");
        self.session.set_foreground(true);
    }

    /// Host went to the background: disarm the hardware listener to save
    /// sensor battery/CPU cost. Calibration is preserved.
    pub fn on_host_pause(&self) {
        let mut state = self.state.lock();
        if *state == LifecycleState::Destroyed {
            warn!("Ignoring pause after destroy");
            return;
        }
        *state = LifecycleState::Backgrounded;
        info!("Host paused");
        self.session.set_foreground(false);
    }

    /// Host teardown: unconditionally unregister and force the subscriber
    /// registry to zero. Hard reset; existing subscribers are not notified.
    pub fn on_host_destroy(&self) {
        let mut state = self.state.lock();
        if *state == LifecycleState::Destroyed {
            return;
        }
        *state = LifecycleState::Destroyed;
        info!("Host destroyed");
        self.session.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::ResetPolicy;
    use crate::port::{RawReadingCallback, SensorPort};
    use parking_lot::RwLock;

    struct StubPort {
        callback: RwLock<Option<RawReadingCallback>>,
    }

    impl StubPort {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                callback: RwLock::new(None),
            })
        }

        fn registered(&self) -> bool {
            self.callback.read().is_some()
        }
    }

    impl SensorPort for StubPort {
        fn is_available(&self) -> bool {
            true
        }

        fn register(&self, callback: RawReadingCallback) {
            let mut slot = self.callback.write();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }

        fn unregister(&self) {
            *self.callback.write() = None;
        }
    }

    #[test]
    fn test_pause_resume_toggles_registration() {
        let port = StubPort::new();
        let session = StepSession::new(port.clone(), ResetPolicy::default());
        let lifecycle = LifecycleCoordinator::new(session.clone());

        session.start().unwrap();
        assert!(port.registered());

        lifecycle.on_host_pause();
        assert_eq!(lifecycle.state(), LifecycleState::Backgrounded);
        assert!(!port.registered());
        assert!(session.is_started());

        lifecycle.on_host_resume();
        assert_eq!(lifecycle.state(), LifecycleState::Foregrounded);
        assert!(port.registered());
    }

    #[test]
    fn test_resume_without_start_does_not_register() {
        let port = StubPort::new();
        let session = StepSession::new(port.clone(), ResetPolicy::default());
        let lifecycle = LifecycleCoordinator::new(session);

        lifecycle.on_host_pause();
        lifecycle.on_host_resume();
        assert!(!port.registered());
    }

    #[test]
    fn test_destroy_is_terminal() {
        let port = StubPort::new();
        let session = StepSession::new(port.clone(), ResetPolicy::default());
        session.add_subscriber();
        session.start().unwrap();

        let lifecycle = LifecycleCoordinator::new(session.clone());
        lifecycle.on_host_destroy();
        assert_eq!(lifecycle.state(), LifecycleState::Destroyed);
        assert!(!port.registered());
        assert_eq!(session.subscriber_count(), 0);

        // Transitions after destroy are ignored.
        lifecycle.on_host_resume();
        assert_eq!(lifecycle.state(), LifecycleState::Destroyed);
        assert!(!port.registered());

        lifecycle.on_host_pause();
        assert_eq!(lifecycle.state(), LifecycleState::Destroyed);
    }
}
