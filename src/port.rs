//! Capability interface over the platform step-counter sensor.
//!
//! The session layer is the only caller of [`SensorPort::register`] and
//! [`SensorPort::unregister`]; everything above it sees calibrated events,
//! never raw readings.

use std::sync::Arc;

/// Callback invoked with each new raw cumulative step reading.
///
/// The reading is the cumulative step count since an arbitrary,
/// device-defined epoch (typically the last reboot).
pub type RawReadingCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Minimal capability interface wrapping the hardware step counter.
///
/// Implementations deliver readings on their own delivery thread or task,
/// asynchronous to application calls. Two guarantees are required of
/// implementors:
///
/// - `register` with an already-installed callback is a silent no-op;
///   callers guard against double registration themselves.
/// - `unregister` is idempotent and synchronous with respect to future
///   delivery: once it returns, the callback is never invoked again.
pub trait SensorPort: Send + Sync {
    /// True iff the hardware exposes a step-counter class sensor.
    fn is_available(&self) -> bool;

    /// Install `callback` to receive raw cumulative readings.
    fn register(&self, callback: RawReadingCallback);

    /// Remove the installed callback. Safe to call when not registered.
    fn unregister(&self);
}
