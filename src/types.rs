use serde::{Deserialize, Serialize};

/// The setpoint of a controller
///
/// An unset target makes the controller track the measurement itself,
/// so every step sees an error of 0 until a target is chosen
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub enum Target {
    #[default]
    Unset,
    Set(f64),
}

impl Target {
    /// The value the measurement is compared against
    pub fn effective(self, measurement: f64) -> f64 {
        match self {
            Target::Unset => measurement,
            Target::Set(target) => target,
        }
    }

    /// The setpoint, reading 0 when unset
    pub fn value(self) -> f64 {
        match self {
            Target::Unset => 0.0,
            Target::Set(target) => target,
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Target::Set(_))
    }
}

impl From<f64> for Target {
    fn from(value: f64) -> Self {
        Target::Set(value)
    }
}

impl From<Option<f64>> for Target {
    fn from(value: Option<f64>) -> Self {
        value.map(Target::Set).unwrap_or(Target::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gains {
    /// how strongly to correct current error
    pub p: f64,

    /// how strongly to correct to long term drift
    pub i: f64,

    /// how strongly to correct to predicted error
    pub d: f64,
}

impl Gains {
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Gains { p, i, d }
    }
}

/// Anti-windup bounds for the accumulated integral term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegralLimit {
    pub min: f64,
    pub max: f64,
}

impl IntegralLimit {
    pub fn new(min: f64, max: f64) -> Self {
        IntegralLimit { min, max }
    }
}

impl Default for IntegralLimit {
    fn default() -> Self {
        IntegralLimit {
            min: -100.0,
            max: 100.0,
        }
    }
}

/// Final shaping of the controller output
///
/// Anything below `min_threshold` is cut off to `min`, anything above `max` is clamped to
/// `max`. Values in between pass through, even when they are below `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputShaping {
    pub min: f64,
    pub max: f64,
    pub min_threshold: f64,
}

impl OutputShaping {
    pub fn new(min: f64, max: f64, min_threshold: f64) -> Self {
        OutputShaping {
            min,
            max,
            min_threshold,
        }
    }
}

impl Default for OutputShaping {
    fn default() -> Self {
        OutputShaping {
            min: -100.0,
            max: 100.0,
            min_threshold: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_target_tracks_measurement() {
        assert_eq!(Target::Unset.effective(42.0), 42.0);
        assert_eq!(Target::Unset.value(), 0.0);
        assert!(!Target::Unset.is_set());
    }

    #[test]
    fn set_target_ignores_measurement() {
        let target = Target::from(10.0);
        assert_eq!(target.effective(42.0), 10.0);
        assert_eq!(target.value(), 10.0);
        assert!(target.is_set());
    }

    #[test]
    fn defaults() {
        assert_eq!(Gains::default(), Gains::new(0.0, 0.0, 0.0));
        assert_eq!(IntegralLimit::default(), IntegralLimit::new(-100.0, 100.0));
        assert_eq!(OutputShaping::default(), OutputShaping::new(-100.0, 100.0, 0.0));
    }
}
