//! Shared application service layer for jetlift.
//!
//! Loads well case files, validates them into typed inputs, and runs the
//! matched IPR/VLP simulation. The CLI is a thin layer over this crate.

pub mod error;
pub mod schema;
pub mod simulation;
pub mod validate;

use std::path::Path;

pub use error::{AppError, AppResult};
pub use schema::WellCase;
pub use simulation::{
    IprPoint, RowStatus, SimulationOrchestrator, SimulationReport, SimulationResult, VLP_COLUMNS,
    VlpRecord, VlpRow,
};
pub use validate::{
    PressureRange, ValidationError, WellInputs, build_pressure_range, build_well_inputs,
};

/// Load a case from YAML, or JSON when the extension is `.json`.
pub fn load_case(path: &Path) -> AppResult<WellCase> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .map_err(|e| AppError::CaseParse(format!("Failed to parse case JSON: {}", e)))
    } else {
        parse_case_yaml(&content)
    }
}

pub fn parse_case_yaml(content: &str) -> AppResult<WellCase> {
    serde_yaml::from_str(content)
        .map_err(|e| AppError::CaseParse(format!("Failed to parse case YAML: {}", e)))
}

/// Validate a case without running it.
pub fn validate_case(case: &WellCase) -> AppResult<(WellInputs, PressureRange)> {
    let inputs = build_well_inputs(case)?;
    let range = build_pressure_range(case, &inputs)?;
    Ok((inputs, range))
}

/// All three stages: build inputs, build the sweep range, run.
pub fn run_case(case: &WellCase) -> AppResult<SimulationResult> {
    let (inputs, range) = validate_case(case)?;
    SimulationOrchestrator::run(&inputs, &range)
}
