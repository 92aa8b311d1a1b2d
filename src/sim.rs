//! Simulated walk sensor for development and testing.
//!
//! Stands in for the hardware step counter: a tokio task advances a
//! cumulative counter by a random stride per tick and delivers readings to
//! the registered callback, honoring the same contract as the real port
//! (no delivery after unregister, double registration is a no-op).

use crate::config::SimulationConfig;
use crate::port::{RawReadingCallback, SensorPort};
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

/// In-memory cumulative step counter implementing [`SensorPort`].
pub struct SimulatedStepSensor {
    available: bool,
    cumulative: Mutex<f32>,
    callback: RwLock<Option<RawReadingCallback>>,
}

impl SimulatedStepSensor {
    pub fn new(available: bool) -> Arc<Self> {
        Arc::new(Self {
            available,
            cumulative: Mutex::new(0.0),
            callback: RwLock::new(None),
        })
    }

    /// Advance the cumulative counter by `stride` steps and deliver the new
    /// reading to the registered callback, if any.
    pub fn advance(&self, stride: f32) {
        let raw = {
            let mut cumulative = self.cumulative.lock();
            *cumulative += stride;
            *cumulative
        };
        let callback = self.callback.read().clone();
        if let Some(callback) = callback {
            callback(raw);
        }
    }
}

impl SensorPort for SimulatedStepSensor {
    fn is_available(&self) -> bool {
        self.available
    }

    fn register(&self, callback: RawReadingCallback) {
        let mut slot = self.callback.write();
        if slot.is_none() {
            *slot = Some(callback);
            debug!("[Sim] Callback registered");
        }
    }

    fn unregister(&self) {
        *self.callback.write() = None;
        debug!("[Sim] Callback unregistered");
    }
}

/// Spawn a task that simulates a walk by advancing the sensor every tick.
///
/// # Returns
///
/// A `JoinHandle` that can be used to abort the simulation task.
pub fn run_walk_simulation(
    sensor: Arc<SimulatedStepSensor>,
    config: SimulationConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_millis(config.tick_interval_ms));
        loop {
            interval.tick().await;
            let stride = rand::thread_rng().gen_range(config.min_stride..=config.max_stride);
            info!("[Sim] Walked {} steps", stride);
            sensor.advance(stride as f32);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_delivers_cumulative_readings() {
        let sensor = SimulatedStepSensor::new(true);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = seen.clone();
        sensor.register(Arc::new(move |raw: f32| {
            seen_cb.lock().push(raw);
        }));

        sensor.advance(3.0);
        sensor.advance(4.0);
        assert_eq!(*seen.lock(), vec![3.0, 7.0]);

        sensor.unregister();
        sensor.advance(5.0);
        assert_eq!(*seen.lock(), vec![3.0, 7.0]);
    }

    #[test]
    fn test_double_registration_keeps_first_callback() {
        let sensor = SimulatedStepSensor::new(true);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_first = seen.clone();
        sensor.register(Arc::new(move |_: f32| seen_first.lock().push("first")));
        let seen_second = seen.clone();
        sensor.register(Arc::new(move |_: f32| seen_second.lock().push("second")));

        sensor.advance(1.0);
        assert_eq!(*seen.lock(), vec!["first"]);
    }

    #[test]
    fn test_unavailable_sensor_flag() {
        assert!(!SimulatedStepSensor::new(false).is_available());
        assert!(SimulatedStepSensor::new(true).is_available());
    }
}
