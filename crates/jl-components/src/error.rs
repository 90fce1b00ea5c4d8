//! Error types for component operations.

use jl_core::error::JlError;
use jl_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Convergence failed: {what} (after {iterations} iterations)")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
    },

    #[error("Fluid model error: {0}")]
    Fluid(#[from] FluidError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<JlError> for ComponentError {
    fn from(e: JlError) -> Self {
        match e {
            JlError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            JlError::InvalidArg { what } => ComponentError::InvalidInput { what },
            JlError::Invariant { what } => ComponentError::NonPhysical { what },
        }
    }
}

impl From<ComponentError> for JlError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidInput { what } => JlError::InvalidArg { what },
            ComponentError::NonPhysical { what } => JlError::Invariant { what },
            ComponentError::ConvergenceFailed { what, .. } => JlError::Invariant { what },
            ComponentError::Fluid(f) => f.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::ConvergenceFailed {
            what: "traverse increment",
            iterations: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("traverse increment"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidInput { what: "test" };
        let core: JlError = comp_err.into();
        assert!(matches!(core, JlError::InvalidArg { .. }));

        let wrapped: ComponentError = FluidError::InvalidInput { what: "pressure" }.into();
        assert!(matches!(wrapped, ComponentError::Fluid(_)));
    }
}
