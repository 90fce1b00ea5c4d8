//! End-to-end sweeps over the case files in `cases/`.

use jl_app::{
    AppError, RowStatus, SimulationOrchestrator, VLP_COLUMNS, ValidationError,
    build_pressure_range, build_well_inputs, load_case, run_case,
};
use jl_solver::OperatingWarning;
use std::path::PathBuf;

fn case_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../cases")
        .join(name)
}

#[test]
fn nominal_sweep_is_complete_and_ordered() {
    let case = load_case(&case_path("nominal.yaml")).unwrap();
    let inputs = build_well_inputs(&case).unwrap();
    let range = build_pressure_range(&case, &inputs).unwrap();
    let result = SimulationOrchestrator::run(&inputs, &range).unwrap();

    assert_eq!(result.vlp.len(), 25);
    assert_eq!(result.converged_rows(), 25);
    assert!(result.vlp.windows(2).all(|w| w[0].pwf < w[1].pwf));
    assert!((result.vlp[0].pwf - 500.0).abs() < 1e-9);
    assert!((result.vlp[24].pwf - 2000.0).abs() < 1e-9);

    // Rate never falls as pwf falls
    let rates: Vec<f64> = result
        .vlp
        .iter()
        .map(|r| r.point.unwrap().production_rate)
        .collect();
    assert!(rates.windows(2).all(|w| w[0] >= w[1]));

    for row in &result.vlp {
        let values = row.values().unwrap();
        assert_eq!(values.len(), VLP_COLUMNS.len());
        let p = row.point.unwrap();
        assert!(p.horsepower > 0.0);
        assert!((0.0..=1.0).contains(&p.efficiency), "pwf {}: {}", row.pwf, p.efficiency);
        assert!(
            !row.warnings
                .iter()
                .any(|w| matches!(w, OperatingWarning::EfficiencyOutOfRange { .. }))
        );
    }
}

#[test]
fn nominal_sweep_flags_cavitation_at_low_pwf_only() {
    let case = load_case(&case_path("nominal.yaml")).unwrap();
    let result = run_case(&case).unwrap();
    let cavitating = |i: usize| {
        result.vlp[i]
            .warnings
            .iter()
            .any(|w| matches!(w, OperatingWarning::Cavitation { .. }))
    };
    assert!(cavitating(0));
    assert!(!cavitating(24));
}

#[test]
fn ipr_curve_spans_zero_to_reservoir_pressure() {
    let case = load_case(&case_path("nominal.yaml")).unwrap();
    let result = run_case(&case).unwrap();

    assert_eq!(result.ipr.len(), 50);
    // 0.433 * SG(30 API) * 500 ft
    let shift = 0.433 * (141.5 / 161.5) * 500.0;
    let first = result.ipr[0];
    let last = result.ipr[49];
    assert!((first.pressure_psi + shift).abs() < 1e-6);
    assert!((first.rate_stb_d - 400.0 * 2500.0 / 700.0).abs() < 0.01);
    assert!((last.pressure_psi - (2500.0 - shift)).abs() < 1e-6);
    assert_eq!(last.rate_stb_d, 0.0);
    assert!(result.ipr.windows(2).all(|w| w[0].rate_stb_d >= w[1].rate_stb_d));
    // Sampled pressures land on whole psi before the shift
    assert!(
        result
            .ipr
            .iter()
            .all(|p| ((p.pressure_psi + shift) - (p.pressure_psi + shift).round()).abs() < 1e-6)
    );
}

#[test]
fn reverse_circulation_vogel_case_runs() {
    let case = load_case(&case_path("vogel_reverse.yaml")).unwrap();
    let result = run_case(&case).unwrap();
    assert_eq!(result.vlp.len(), 25);
    assert!(
        result
            .vlp
            .iter()
            .all(|r| !matches!(r.status, RowStatus::Failed { .. }))
    );
}

#[test]
fn report_serializes_to_json() {
    let case = load_case(&case_path("nominal.yaml")).unwrap();
    let result = run_case(&case).unwrap();
    let json = serde_json::to_value(result.report()).unwrap();
    assert_eq!(json["columns"].as_array().unwrap().len(), 9);
    assert_eq!(json["vlp"].as_array().unwrap().len(), 25);
    assert_eq!(json["well"], "Demo-1");
    assert_eq!(json["vlp"][0]["status"], "converged");
}

#[test]
fn invalid_case_fails_fast() {
    let mut case = load_case(&case_path("nominal.yaml")).unwrap();
    case.sweep.pwf_min_psi = case.sweep.pwf_max_psi;
    let err = run_case(&case).unwrap_err();
    assert!(matches!(
        err,
        AppError::Configuration(ValidationError::InvalidValue { .. })
    ));
}

#[test]
fn missing_case_file_reports_path() {
    let err = load_case(&case_path("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, AppError::CaseFileRead { .. }));
}

#[test]
fn closure_budget_exhaustion_keeps_full_table() {
    let mut case = load_case(&case_path("nominal.yaml")).unwrap();
    case.solver.closure_max_iterations = 1;
    case.solver.closure_tolerance_psi = 1e-9;
    let result = run_case(&case).unwrap();

    assert_eq!(result.vlp.len(), 25);
    assert!(result.vlp.windows(2).all(|w| w[0].pwf < w[1].pwf));
    for row in &result.vlp {
        assert!(
            matches!(row.status, RowStatus::Unconverged { iterations: 1, .. }),
            "pwf {}: {:?}",
            row.pwf,
            row.status
        );
        assert!(row.point.is_some());
        assert!(row.is_flagged());
    }
    assert_eq!(result.converged_rows(), 0);
    assert_eq!(result.flagged_rows(), 25);
}

#[test]
fn per_point_failures_become_failed_rows() {
    // One traverse iteration cannot settle the gassy return column
    let mut case = load_case(&case_path("nominal.yaml")).unwrap();
    case.solver.traverse_max_iterations = 1;
    case.solver.traverse_tolerance_psi = 1e-12;
    let result = run_case(&case).unwrap();

    assert_eq!(result.vlp.len(), 25);
    assert!(result.vlp.windows(2).all(|w| w[0].pwf < w[1].pwf));
    for row in &result.vlp {
        assert!(matches!(row.status, RowStatus::Failed { .. }));
        assert!(row.point.is_none());
        assert!(row.values().is_none());
    }
    // The IPR curve does not depend on the per-point solves
    assert_eq!(result.ipr.len(), 50);

    let json = serde_json::to_value(result.report()).unwrap();
    assert_eq!(json["vlp"][0]["status"], "failed");
    assert!(json["vlp"][0]["message"].is_string());
    assert!(json["vlp"][0]["values"].is_null());
}
