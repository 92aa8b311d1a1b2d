//! Running baseline calibration for cumulative step readings.
//!
//! The hardware reports a cumulative count since a device-defined epoch, so
//! consumers need a baseline captured at session start to see session-relative
//! totals, plus the previous reading to compute per-callback deltas.

use serde::{Deserialize, Serialize};

/// How to handle a raw reading below `last_reading` (hardware counter reset,
/// e.g. after a device reboot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Re-anchor the baseline at the new reading. The session-relative total
    /// is preserved as of the last reading before the reset; counting
    /// continues from there.
    #[default]
    Rebaseline,
    /// Keep the old baseline and clamp the delta to zero. The total can
    /// appear to jump backwards.
    ClampDelta,
}

/// Baseline and last-seen reading for one session start.
///
/// `baseline` is unset until the first reading arrives after `reset()`;
/// once set it only moves under [`ResetPolicy::Rebaseline`]. Invariant while
/// set: `last_reading >= baseline`.
#[derive(Debug, Clone)]
pub struct CalibrationState {
    baseline: Option<f32>,
    last_reading: f32,
    policy: ResetPolicy,
}

impl CalibrationState {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            baseline: None,
            last_reading: 0.0,
            policy,
        }
    }

    /// Discard the baseline so the next reading re-anchors at zero.
    pub fn reset(&mut self) {
        self.baseline = None;
        self.last_reading = 0.0;
    }

    /// Fold in a raw cumulative reading, returning `(delta, total)`.
    ///
    /// The first reading after `reset()` anchors the baseline and yields
    /// `(0, 0)`. Truncation toward zero matches the sensor's integral step
    /// semantics; readings are floats on the wire but steps are whole.
    pub fn observe(&mut self, raw: f32) -> (i64, i64) {
        let baseline = match self.baseline {
            Some(b) => b,
            None => {
                self.baseline = Some(raw);
                self.last_reading = raw;
                return (0, 0);
            }
        };

        if raw < self.last_reading {
            // Cumulative counters only go backwards when the hardware
            // counter itself reset underneath us.
            match self.policy {
                ResetPolicy::Rebaseline => {
                    self.baseline = Some(raw);
                    self.last_reading = raw;
                    return (0, 0);
                }
                ResetPolicy::ClampDelta => {
                    self.last_reading = raw;
                    return (0, (raw - baseline) as i64);
                }
            }
        }

        let delta = (raw - self.last_reading) as i64;
        let total = (raw - baseline) as i64;
        self.last_reading = raw;
        (delta, total)
    }
}
