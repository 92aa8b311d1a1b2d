use crate::calibration::ResetPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Load environment variables from .env file with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() {
    let env_path = Path::new(".env");
    if !env_path.exists() {
        return;
    }

    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            // Remove surrounding quotes if present
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = &value[1..value.len() - 1];
            }

            // Only set if not already set (env vars take precedence)
            if std::env::var(key).is_err() {
                // SAFETY: We're single-threaded at this point (called before any async runtime)
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub reset_policy: ResetPolicy,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Milliseconds between simulated walk ticks.
    pub tick_interval_ms: u64,
    /// Minimum steps added per tick.
    pub min_stride: u32,
    /// Maximum steps added per tick.
    pub max_stride: u32,
    /// Pretend no step-counter hardware exists when false.
    pub sensor_available: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reset_policy: ResetPolicy::default(),
            simulation: SimulationConfig {
                tick_interval_ms: 2000,
                min_stride: 1,
                max_stride: 6,
                sensor_available: true,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(policy) = std::env::var("RESET_POLICY") {
            match policy.to_lowercase().as_str() {
                "rebaseline" => config.reset_policy = ResetPolicy::Rebaseline,
                "clamp" | "clamp_delta" => config.reset_policy = ResetPolicy::ClampDelta,
                _ => {}
            }
        }
        if let Ok(interval) = std::env::var("SIM_TICK_INTERVAL_MS")
            && let Ok(ms) = interval.parse()
        {
            config.simulation.tick_interval_ms = ms;
        }
        if let Ok(min) = std::env::var("SIM_MIN_STRIDE")
            && let Ok(m) = min.parse()
        {
            config.simulation.min_stride = m;
        }
        if let Ok(max) = std::env::var("SIM_MAX_STRIDE")
            && let Ok(m) = max.parse()
        {
            config.simulation.max_stride = m;
        }
        if let Ok(available) = std::env::var("SENSOR_AVAILABLE")
            && let Ok(a) = available.parse()
        {
            config.simulation.sensor_available = a;
        }

        config
    }
}
