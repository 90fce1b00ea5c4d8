//! jl-solver: jet pump operating-point solver.
//!
//! Finds the power-fluid rate at which the pump's discharge pressure
//! matches what the return column needs to reach the wellhead, using a
//! bracketed Illinois root search with a hard iteration cap.

pub mod error;
pub mod operating_point;
pub mod record;
pub mod root;

pub use error::{SolverError, SolverResult};
pub use operating_point::{
    JetPumpProblem, OperatingPoint, OperatingWarning, PointDiagnostics, PointSolution,
    PointStatus, SolverSettings, required_injection_pressure, solve_operating_point,
};
pub use record::JetPumpRecord;
pub use root::{Bracket, RootConfig, RootResult, expand_bracket, find_root, illinois};
