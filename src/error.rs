use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum PedometerError {
    #[error("step counter sensor not available on this device")]
    SensorUnavailable,

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl PedometerError {
    /// Fixed error code surfaced across the bridge boundary.
    pub fn code(&self) -> &'static str {
        match self {
            PedometerError::SensorUnavailable => "E_STEP_COUNTER",
            PedometerError::IoError(_) => "E_IO",
            PedometerError::SerdeJsonError(_) => "E_SERIALIZATION",
        }
    }
}

pub type Result<T> = std::result::Result<T, PedometerError>;
