//! Pedometer bridge library.
//!
//! Exposes a device's hardware step-counter sensor as a persistent,
//! calibrated, multi-subscriber event stream. The session layer owns the
//! single hardware registration, calibrates a running baseline so consumers
//! see session-relative totals, follows the host foreground/background/
//! teardown lifecycle, and fans raw sensor callbacks out to any number of
//! logical subscribers.

pub mod bridge;
pub mod calibration;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod port;
pub mod session;
pub mod sim;
pub mod subscription;

pub use error::{PedometerError, Result};
