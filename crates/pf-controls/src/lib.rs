//! Pressure-regulation primitives for pressureflow.
//!
//! This crate holds the control side of a dynamically actuated pressure
//! reducing valve, kept apart from the hydraulic models that consume it:
//! - reference-pressure strategies (fixed outlet, time-modulated,
//!   flow-modulated, remote node) and the day/night schedule they use
//! - actuator geometry and the asymmetric opening/closing gains
//! - the physically-based position update law and its latched state
//!
//! # Architecture
//!
//! - The controller runs once per simulated time step, never per solver
//!   iteration. It reads pressures from the previous converged step.
//! - All updates are total: positions are clamped to [0, 1] and saturation
//!   is absorbed silently.
//! - State is latched explicitly by the orchestrator after each converged
//!   step; the increment law is always relative to the last committed position.

pub mod actuator;
pub mod controller;
pub mod error;
pub mod reference;
pub mod schedule;

pub use actuator::{ActuatorGains, ActuatorGeometry};
pub use controller::{ControlInputs, ControllerState, PressureController};
pub use error::{ControlError, ControlResult};
pub use reference::{ReferenceStrategy, StrategyKind};
pub use schedule::{DayNightSchedule, NightWindow, Phase};
