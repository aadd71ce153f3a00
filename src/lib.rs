//! A fixed-step PID controller for driving one scalar quantity toward a setpoint.
//!
//! ```
//! use pid_loop::PidController;
//!
//! let mut pid = PidController::default();
//! pid.set_gains(1.0, 0.1, 0.5); // p, d, i
//! pid.set_target(Some(10.0));
//! pid.set_output_shaping(-100.0, 100.0, -100.0);
//!
//! assert!((pid.step(0.0) - -16.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod math;
pub mod types;

pub use config::{load_config, ControllerConfig};
pub use control::driver::{Actuator, ControlLoop, Sensor};
pub use control::pid::PidController;
pub use error::PidError;
pub use types::{Gains, IntegralLimit, OutputShaping, Target};
