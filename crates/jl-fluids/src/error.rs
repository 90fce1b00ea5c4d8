//! Fluid property errors.

use jl_core::JlError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Input that no correlation can be evaluated at (P <= 0, NaN, ...).
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    /// Non-physical value produced by a correlation.
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

impl From<JlError> for FluidError {
    fn from(err: JlError) -> Self {
        match err {
            JlError::NonFinite { what, .. } | JlError::InvalidArg { what } => {
                FluidError::InvalidInput { what }
            }
            JlError::Invariant { what } => FluidError::NonPhysical { what },
        }
    }
}

impl From<FluidError> for JlError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::InvalidInput { what } => JlError::InvalidArg { what },
            FluidError::NonPhysical { what } => JlError::Invariant { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::InvalidInput { what: "pressure" };
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn error_round_trip_through_core() {
        let core: JlError = FluidError::NonPhysical { what: "density" }.into();
        assert!(matches!(core, JlError::Invariant { .. }));

        let fluid: FluidError = JlError::NonFinite {
            what: "pressure",
            value: f64::NAN,
        }
        .into();
        assert_eq!(fluid, FluidError::InvalidInput { what: "pressure" });
    }
}
