use tracing::{debug, trace, warn};

use crate::error::PidError;
use crate::math;
use crate::types::{Gains, IntegralLimit, OutputShaping, Target};

/// Implementation of a fixed-step PID algorithm
///
/// Each call to [`PidController::step`] is one sampling period. There is no notion of
/// elapsed time, the integral is a plain running sum and the derivative a plain difference.
///
/// Measurements are not validated. A NaN error never leaves the deadband and reads as 0,
/// infinite errors propagate through to a non-finite output.
#[derive(Clone, Debug, Default)]
pub struct PidController {
    target: Target,
    gains: Gains,

    integral: f64,
    integral_limit: IntegralLimit,
    last_error: f64,

    output: OutputShaping,
    tolerance: f64,
}

impl PidController {
    pub fn new(gains: Gains) -> Self {
        PidController {
            gains,
            ..Default::default()
        }
    }

    /// Sets the setpoint, `None` sets an explicit target of 0
    pub fn set_target(&mut self, target: Option<f64>) {
        let target = target.unwrap_or(0.0);
        debug!(setpoint = target, "Set target");
        self.target = Target::Set(target);
    }

    /// Replaces all gains, note the order is p, d, i
    pub fn set_gains(&mut self, p: f64, d: f64, i: f64) {
        self.set_gains_config(Gains { p, i, d });
    }

    pub fn set_gains_config(&mut self, gains: Gains) {
        debug!(p = gains.p, i = gains.i, d = gains.d, "Set gains");
        self.gains = gains;
    }

    /// Replaces the output bounds, keeping the current threshold
    pub fn set_output_bounds(&mut self, min: f64, max: f64) {
        self.set_output_shaping(min, max, self.output.min_threshold);
    }

    pub fn set_output_shaping(&mut self, min: f64, max: f64, min_threshold: f64) {
        debug!(min, max, min_threshold, "Set output shaping");
        self.output = OutputShaping::new(min, max, min_threshold);
    }

    /// Replaces the anti-windup bounds
    ///
    /// The accumulated integral is not re-clamped until the next step
    pub fn set_integral_limit(&mut self, min: f64, max: f64) {
        debug!(min, max, "Set integral limit");
        self.integral_limit = IntegralLimit::new(min, max);
    }

    /// Sets the radius around 0 in which errors are treated as 0
    pub fn set_tolerance(&mut self, tolerance: f64) -> Result<(), PidError> {
        if tolerance < 0.0 {
            warn!(tolerance, "Rejected negative tolerance");
            return Err(PidError::InvalidArgument {
                name: "tolerance",
                value: tolerance,
            });
        }

        debug!(tolerance, "Set tolerance");
        self.tolerance = tolerance;
        Ok(())
    }

    /// Zeroes the accumulated integral and the remembered error
    ///
    /// Configuration and target are left alone
    pub fn reset(&mut self) {
        debug!(integral = self.integral, error = self.last_error, "Reset");
        self.integral = 0.0;
        self.last_error = 0.0;
    }

    /// Runs one sampling period and returns the shaped output
    pub fn step(&mut self, measurement: f64) -> f64 {
        let exact_error = measurement - self.target.effective(measurement);
        let error = math::deadband(exact_error, self.tolerance);

        let cfg = &self.gains;

        let proportional = error * cfg.p;
        let derivative = (error - self.last_error) * cfg.d;

        self.last_error = error;

        self.integral += error * cfg.i;
        self.integral = math::saturate(
            self.integral,
            self.integral_limit.min,
            self.integral_limit.max,
        );

        let raw = proportional + self.integral + derivative;
        let output = math::cutoff(
            raw,
            self.output.min,
            self.output.min_threshold,
            self.output.max,
        );

        trace!(
            measurement,
            error,
            proportional,
            integral = self.integral,
            derivative,
            raw,
            output,
            "Step"
        );

        output
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The deadbanded error of the most recent step
    pub fn error(&self) -> f64 {
        self.last_error
    }

    /// The setpoint, 0 when unset
    pub fn target(&self) -> f64 {
        self.target.value()
    }

    pub fn target_state(&self) -> Target {
        self.target
    }

    pub fn output_max(&self) -> f64 {
        self.output.max
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn integral_limit(&self) -> IntegralLimit {
        self.integral_limit
    }

    pub fn output_shaping(&self) -> OutputShaping {
        self.output
    }
}
