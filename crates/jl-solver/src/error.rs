//! Error types for operating-point solving.

use jl_components::ComponentError;
use jl_core::error::JlError;
use jl_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while solving one operating point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("No sign change in {what} between {lo} and {hi}")]
    NoBracket { what: String, lo: f64, hi: f64 },

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for JlError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ProblemSetup { what: _ } => JlError::InvalidArg {
                what: "problem setup",
            },
            SolverError::NoBracket { .. } => JlError::InvalidArg { what: "bracket" },
            SolverError::Component(_) => JlError::InvalidArg { what: "component" },
            SolverError::Fluid(_) => JlError::InvalidArg { what: "fluid" },
            SolverError::Numeric { what: _ } => JlError::InvalidArg { what: "numeric" },
        }
    }
}
