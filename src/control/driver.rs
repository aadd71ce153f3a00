use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tracing::{debug, info, trace};

use crate::control::pid::PidController;
use crate::error::Result;

/// Something the controlled quantity can be read from
pub trait Sensor {
    /// Sample the current process value
    fn measure(&mut self) -> Result<f64>;
}

/// Something the controller output is fed into
pub trait Actuator {
    /// Drive the actuator with a new output
    fn apply(&mut self, output: f64) -> Result<()>;
}

impl<F: FnMut() -> Result<f64>> Sensor for F {
    fn measure(&mut self) -> Result<f64> {
        self()
    }
}

/// Drives a [`PidController`] once per sampling period
///
/// Measure, step, apply. The controller itself never sleeps, pacing lives here.
pub struct ControlLoop<S, A> {
    pid: PidController,
    sensor: S,
    actuator: A,
    period: Duration,
    last_measurement: Option<f64>,
}

impl<S: Sensor, A: Actuator> ControlLoop<S, A> {
    pub fn new(pid: PidController, sensor: S, actuator: A, period: Duration) -> Self {
        ControlLoop {
            pid,
            sensor,
            actuator,
            period,
            last_measurement: None,
        }
    }

    /// Run a single iteration without any pacing
    pub fn tick(&mut self) -> Result<f64> {
        let measurement = self.sensor.measure().context("Read sensor")?;
        let output = self.pid.step(measurement);

        self.actuator
            .apply(output)
            .with_context(|| format!("Apply output {}", output))?;
        self.last_measurement = Some(measurement);

        trace!(measurement, output, "Tick");

        Ok(output)
    }

    /// Run `iterations` paced iterations
    pub fn run(&mut self, iterations: usize) -> Result<()> {
        info!(iterations, period = ?self.period, "Starting control loop");

        for iteration in 0..iterations {
            let iter_start = Instant::now();

            self.tick()
                .with_context(|| format!("Control loop iteration {}", iteration))?;

            self.sleep_remainder(iter_start);
        }

        debug!(iterations, "Control loop finished");

        Ok(())
    }

    /// Run paced iterations until `done` accepts a measurement
    ///
    /// Fails once `max_iterations` have run without `done` holding
    pub fn run_until(
        &mut self,
        mut done: impl FnMut(f64) -> bool,
        max_iterations: usize,
    ) -> Result<usize> {
        info!(max_iterations, period = ?self.period, "Starting control loop");

        for iteration in 0..max_iterations {
            let iter_start = Instant::now();

            self.tick()
                .with_context(|| format!("Control loop iteration {}", iteration))?;

            if let Some(measurement) = self.last_measurement {
                if done(measurement) {
                    debug!(iterations = iteration + 1, measurement, "Control loop settled");
                    return Ok(iteration + 1);
                }
            }

            self.sleep_remainder(iter_start);
        }

        bail!(
            "Control loop did not settle within {} iterations (last measurement {:?})",
            max_iterations,
            self.last_measurement
        )
    }

    fn sleep_remainder(&self, iter_start: Instant) {
        thread::sleep(
            Duration::checked_sub(self.period, iter_start.elapsed()).unwrap_or_default(),
        )
    }

    pub fn controller(&self) -> &PidController {
        &self.pid
    }

    pub fn controller_mut(&mut self) -> &mut PidController {
        &mut self.pid
    }

    pub fn last_measurement(&self) -> Option<f64> {
        self.last_measurement
    }

    pub fn into_parts(self) -> (PidController, S, A) {
        (self.pid, self.sensor, self.actuator)
    }
}
