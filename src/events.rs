//! Step event type and synchronous subscriber fan-out.
//!
//! The channel delivers each event to every current subscriber, in
//! subscription order, synchronously within the hardware-callback invocation.
//! No buffering, no replay: a subscriber attached after an event was
//! published never sees it.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// One calibrated step update.
///
/// `steps` is the delta since the previous reading was processed;
/// `total_steps` is relative to the baseline captured at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepEvent {
    pub steps: i64,
    pub total_steps: i64,
    /// Wall-clock milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
}

impl StepEvent {
    pub fn new(steps: i64, total_steps: i64) -> Self {
        Self {
            steps,
            total_steps,
            timestamp_ms: chrono::Utc::now().timestamp_millis() as f64,
        }
    }
}

/// Subscriber callback. Must not block: delivery happens on the sensor
/// delivery thread, and a slow subscriber delays further readings.
pub type StepListener = Arc<dyn Fn(&StepEvent) + Send + Sync>;

/// Opaque handle returned by [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Ordering-preserving fan-out to the live subscriber list.
pub struct EventChannel {
    subscribers: Mutex<Vec<(u64, StepListener)>>,
    next_id: AtomicU64,
}

impl EventChannel {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Attach `callback` to receive every subsequently published event.
    pub fn subscribe(&self, callback: StepListener) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().push((id, callback));
        SubscriptionHandle(id)
    }

    /// Detach a subscriber. Unknown handles are ignored.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.subscribers.lock().retain(|(id, _)| *id != handle.0);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Deliver `event` to every current subscriber in subscription order.
    ///
    /// Iterates a snapshot taken under the lock, so a callback that
    /// unsubscribes (itself or another handle) mid-publish cannot skip or
    /// crash unrelated subscribers.
    pub fn publish(&self, event: &StepEvent) {
        let snapshot: Vec<StepListener> = {
            let subscribers = self.subscribers.lock();
            subscribers.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for callback in snapshot {
            callback(event);
        }
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}
