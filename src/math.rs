/// Saturates `val` into `[min, max]`
///
/// Unlike `f64::clamp` this never panics on inverted bounds, `max` is checked first
pub fn saturate(val: f64, min: f64, max: f64) -> f64 {
    if val > max {
        max
    } else if val < min {
        min
    } else {
        val
    }
}

/// Zeroes `val` when it lies within `radius` of 0
pub fn deadband(val: f64, radius: f64) -> f64 {
    if val.abs() > radius {
        val
    } else {
        0.0
    }
}

/// Snaps anything below `threshold` down to `floor` and clamps anything above `max`
pub fn cutoff(val: f64, floor: f64, threshold: f64, max: f64) -> f64 {
    if val < threshold {
        floor
    } else if val > max {
        max
    } else {
        val
    }
}
