pub use anyhow::Result;

use thiserror::Error;

/// Errors raised by controller setters
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum PidError {
    #[error("PID controller {name} cannot be set to a negative value: '{value}'")]
    InvalidArgument { name: &'static str, value: f64 },
}
