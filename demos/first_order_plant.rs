//! Regulates a simulated heater toward a setpoint
//!
//! `cargo run --example first_order_plant [demos/heater.toml]`

use std::cell::Cell;
use std::env;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use pid_loop::{load_config, Actuator, ControlLoop, ControllerConfig, Gains, PidController};
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

const AMBIENT: f64 = 20.0;

/// Heats a body that leaks heat back to ambient
struct Heater {
    temperature: Rc<Cell<f64>>,
    power: f64,
    leak: f64,
}

impl Actuator for Heater {
    fn apply(&mut self, output: f64) -> anyhow::Result<()> {
        // A heater can't cool
        let drive = output.max(0.0) / 100.0;

        let temperature = self.temperature.get();
        let next = temperature + drive * self.power - (temperature - AMBIENT) * self.leak;
        self.temperature.set(next);

        Ok(())
    }
}

fn default_config() -> ControllerConfig {
    // Error is measurement - target, so heating needs negative gains
    let mut config = ControllerConfig {
        target: Some(60.0),
        tolerance: 0.25,
        gains: Gains::new(-8.0, -0.4, -2.0),
        ..Default::default()
    };
    config.integral_limit.min = 0.0;
    config.output.min = 0.0;
    config
}

fn main() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(LevelFilter::DEBUG)
            .finish(),
    )
    .context("Install subscriber")?;

    let config = match env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => default_config(),
    };

    let pid = PidController::from_config(&config).context("Build controller")?;
    let target = pid.target();

    let temperature = Rc::new(Cell::new(AMBIENT));
    let sensor = {
        let temperature = temperature.clone();
        move || -> anyhow::Result<f64> { Ok(temperature.get()) }
    };
    let heater = Heater {
        temperature: temperature.clone(),
        power: 1.0,
        leak: 0.02,
    };

    let mut control = ControlLoop::new(pid, sensor, heater, Duration::from_millis(5));

    let iterations = control.run_until(|t| (t - target).abs() <= 0.5, 2_000)?;
    info!(iterations, temperature = temperature.get(), "Reached setpoint");

    // Hold the setpoint for a while then report the drift
    control.run(200)?;
    info!(
        temperature = temperature.get(),
        error = control.controller().error(),
        integral = control.controller().integral(),
        "Holding"
    );

    control.controller_mut().reset();
    info!("Controller reset");

    Ok(())
}
