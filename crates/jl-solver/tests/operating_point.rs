//! Operating-point solves on a representative 7500 ft jet pump well.

use jl_components::{
    CirculationMode, InflowModel, JetPump, JetPumpGeometry, ProductionTestPoint,
    PumpCoefficients, TemperatureProfile, WellConfiguration, pump_intake_pressure,
};
use jl_core::units::{cp, deg_f, field, ft, inch, psi, sq_in};
use jl_fluids::{BlackOilModel, CorrelationSet, FluidProperties, PowerFluid, PvtModel};
use jl_solver::{
    JetPumpProblem, JetPumpRecord, OperatingWarning, SolverSettings, required_injection_pressure,
    solve_operating_point,
};

struct Fixture {
    well: WellConfiguration,
    temperature: TemperatureProfile,
    model: BlackOilModel,
    ipr: InflowModel,
}

impl Fixture {
    fn new() -> Self {
        let well =
            WellConfiguration::new(ft(8000.0), ft(7500.0), inch(2.875), inch(2.441), inch(6.276))
                .unwrap();
        let temperature =
            TemperatureProfile::linear(deg_f(100.0), deg_f(200.0), ft(8000.0)).unwrap();
        let fluids = FluidProperties::new(
            30.0,
            psi(1500.0),
            0.7,
            1.05,
            0.5,
            300.0,
            PowerFluid::power_oil(30.0, cp(3.0)),
        )
        .unwrap();
        let model = BlackOilModel::new(fluids, CorrelationSet::default());
        let test = ProductionTestPoint::new(400.0, psi(1800.0), psi(2500.0), deg_f(200.0)).unwrap();
        let ipr = InflowModel::calibrate(&test, psi(1500.0)).unwrap();
        Self {
            well,
            temperature,
            model,
            ipr,
        }
    }

    fn problem(&self, pwf: f64, nozzle: f64, injection: f64) -> JetPumpProblem<'_> {
        let pwf = psi(pwf);
        let oil_sg = self.model.fluids().oil_specific_gravity();
        JetPumpProblem {
            pwf,
            suction_pressure: pump_intake_pressure(pwf, &self.well, oil_sg),
            production_rate: self.ipr.evaluate(pwf).unwrap(),
            pump: JetPump::new(
                JetPumpGeometry::new(sq_in(nozzle), sq_in(0.0995)).unwrap(),
                PumpCoefficients::default(),
            )
            .unwrap(),
            well: &self.well,
            temperature: &self.temperature,
            model: &self.model,
            injection_pressure: psi(injection),
            wellhead_pressure: psi(100.0),
            circulation: CirculationMode::Standard,
        }
    }
}

#[test]
fn nominal_point_converges_with_consistent_energy() {
    let fx = Fixture::new();
    let sol = solve_operating_point(&fx.problem(1000.0, 0.038, 5000.0), &SolverSettings::default())
        .unwrap();

    assert!(sol.is_converged());
    let p = sol.point;
    assert!((p.production_rate - 857.142).abs() < 0.01);
    assert!(p.injection_rate > 1000.0 && p.injection_rate < 10_000.0);
    assert!(p.horsepower > 0.0);
    assert!(p.efficiency > 0.0 && p.efficiency <= 1.0);

    let ps = field::psi(sol.diagnostics.suction_pressure);
    let pd = field::psi(p.discharge_pressure);
    let pn = field::psi(p.nozzle_pressure);
    assert!(ps < pd && pd < pn, "ps {ps} pd {pd} pn {pn}");
    assert!(sol.diagnostics.residual_psi.abs() < 1.0);
    assert!(
        !sol.warnings
            .iter()
            .any(|w| matches!(w, OperatingWarning::InsufficientInjectionPressure { .. }))
    );
}

#[test]
fn low_intake_pressure_flags_cavitation() {
    let fx = Fixture::new();
    let sol = solve_operating_point(&fx.problem(500.0, 0.038, 5000.0), &SolverSettings::default())
        .unwrap();
    assert!(sol.point.cavitation_flow < sol.point.production_rate);
    assert!(
        sol.warnings
            .iter()
            .any(|w| matches!(w, OperatingWarning::Cavitation { .. }))
    );
}

#[test]
fn cavitation_limit_tightens_as_intake_pressure_falls() {
    let fx = Fixture::new();
    let settings = SolverSettings::default();
    let mut last = f64::INFINITY;
    for pwf in [2000.0, 1500.0, 1000.0, 500.0] {
        let sol = solve_operating_point(&fx.problem(pwf, 0.038, 5000.0), &settings).unwrap();
        assert!(sol.point.cavitation_flow < last);
        last = sol.point.cavitation_flow;
    }
}

#[test]
fn weak_injection_supply_is_flagged() {
    let fx = Fixture::new();
    let sol = solve_operating_point(&fx.problem(1000.0, 0.038, 500.0), &SolverSettings::default())
        .unwrap();
    let flagged = sol.warnings.iter().any(|w| {
        matches!(w, OperatingWarning::InsufficientInjectionPressure { required, available }
            if required > available)
    });
    assert!(flagged);
}

#[test]
fn required_injection_pressure_falls_with_area_ratio() {
    let fx = Fixture::new();
    let settings = SolverSettings::default();
    let mut last = f64::INFINITY;
    for nozzle in [0.025, 0.030, 0.038, 0.045, 0.055] {
        let p = required_injection_pressure(&fx.problem(1000.0, nozzle, 5000.0), 3000.0, &settings)
            .unwrap();
        let p = field::psi(p);
        assert!(p < last, "nozzle {nozzle}: {p} !< {last}");
        last = p;
    }
}

#[test]
fn reverse_circulation_converges() {
    let fx = Fixture::new();
    let mut problem = fx.problem(1200.0, 0.038, 5000.0);
    problem.circulation = CirculationMode::Reverse;
    let sol = solve_operating_point(&problem, &SolverSettings::default()).unwrap();
    assert!(sol.is_converged());
    assert!(sol.point.efficiency > 0.0 && sol.point.efficiency <= 1.0);
}

#[test]
fn negative_suction_pressure_is_a_setup_error() {
    let fx = Fixture::new();
    let mut problem = fx.problem(1000.0, 0.038, 5000.0);
    problem.suction_pressure = psi(-10.0);
    assert!(solve_operating_point(&problem, &SolverSettings::default()).is_err());
}

#[test]
fn tight_iteration_cap_reports_unconverged() {
    let fx = Fixture::new();
    let mut settings = SolverSettings::default();
    settings.closure.max_iterations = 1;
    settings.closure.abs_tol = 1e-9;
    let sol = solve_operating_point(&fx.problem(1000.0, 0.038, 5000.0), &settings).unwrap();
    assert!(!sol.is_converged());
    assert!(sol.point.injection_rate > 0.0);
}

#[test]
fn flat_record_solves_at_pump_depth() {
    let record = JetPumpRecord {
        pwf: psi(1000.0),
        production_rate: 600.0,
        nozzle_area: sq_in(0.038),
        throat_area: sq_in(0.0995),
        injection_pressure: psi(5000.0),
        wellhead_pressure: psi(100.0),
        bubble_point: psi(1500.0),
        bottomhole_temperature: deg_f(200.0),
        wellhead_temperature: deg_f(100.0),
        total_depth: ft(7500.0),
        casing_id: inch(6.276),
        tubing_id: inch(2.441),
        tubing_od: inch(2.875),
        api: 30.0,
        gor: 300.0,
        water_cut: 0.5,
        gas_specific_gravity: 0.7,
        water_specific_gravity: 1.05,
        power_fluid_viscosity: cp(3.0),
    };
    let sol = record.solve(&SolverSettings::default()).unwrap();
    assert!(sol.is_converged());
    assert_eq!(field::psi(sol.diagnostics.suction_pressure), field::psi(record.pwf));
    assert!(sol.point.horsepower > 0.0);
}
