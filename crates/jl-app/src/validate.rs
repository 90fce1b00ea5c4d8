//! Case validation and construction of the typed simulation inputs.
//!
//! Runs as two explicit stages: [`build_well_inputs`] turns a parsed case
//! into domain objects, and [`build_pressure_range`] checks the sweep bounds
//! against them. Every failure here is fatal to the run.

use crate::schema::{CirculationDef, CorrelationDef, WellCase};
use jl_components::{
    CirculationMode, InflowModel, JetPump, JetPumpGeometry, ProductionTestPoint,
    PumpCoefficients, TemperatureProfile, TraverseConfig, WellConfiguration,
    pump_intake_pressure,
};
use jl_core::numeric::linspace;
use jl_core::units::{Pressure, cp, deg_f, field, ft, inch, psi, sq_in};
use jl_fluids::{
    BlackOilModel, CorrelationSet, FluidProperties, OilFvfCorrelation, PowerFluid, PvtModel,
    SolutionGasCorrelation,
};
use jl_solver::{RootConfig, SolverSettings};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing or zero value: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {context}: {message}")]
    Model { context: String, message: String },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn model_error(context: &str, err: impl std::fmt::Display) -> ValidationError {
    ValidationError::Model {
        context: context.to_string(),
        message: err.to_string(),
    }
}

/// Validated, typed inputs for one simulation.
#[derive(Debug, Clone)]
pub struct WellInputs {
    pub case_name: String,
    pub well_name: Option<String>,
    pub pump_name: Option<String>,
    pub well: WellConfiguration,
    pub temperature: TemperatureProfile,
    pub model: BlackOilModel,
    pub ipr: InflowModel,
    pub pump: JetPump,
    pub injection_pressure: Pressure,
    pub wellhead_pressure: Pressure,
    pub circulation: CirculationMode,
    pub settings: SolverSettings,
    pub ipr_points: usize,
    /// Non-fatal configuration findings
    pub notes: Vec<String>,
}

impl WellInputs {
    /// Pump intake pressure for a flowing bottom-hole pressure.
    pub fn suction_pressure(&self, pwf: Pressure) -> Pressure {
        pump_intake_pressure(pwf, &self.well, self.model.fluids().oil_specific_gravity())
    }
}

/// VLP sweep bounds and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureRange {
    pub min: Pressure,
    pub max: Pressure,
    pub points: usize,
}

impl PressureRange {
    /// Evenly spaced samples, both ends included, in psi.
    pub fn samples_psi(&self) -> Vec<f64> {
        linspace(field::psi(self.min), field::psi(self.max), self.points)
    }
}

/// Check that every named field is present (non-zero) and finite.
fn require_nonzero(fields: &[(&str, f64)]) -> Result<(), ValidationError> {
    for &(name, value) in fields {
        if value == 0.0 || !value.is_finite() {
            return Err(ValidationError::Missing {
                field: name.to_string(),
            });
        }
    }
    Ok(())
}

fn correlation_set(case: &WellCase) -> CorrelationSet {
    CorrelationSet {
        solution_gas: match case.solver.solution_gas {
            CorrelationDef::Standing => SolutionGasCorrelation::Standing,
            CorrelationDef::VasquezBeggs => SolutionGasCorrelation::VasquezBeggs,
        },
        oil_fvf: match case.solver.oil_fvf {
            CorrelationDef::Standing => OilFvfCorrelation::Standing,
            CorrelationDef::VasquezBeggs => OilFvfCorrelation::VasquezBeggs,
        },
    }
}

fn solver_settings(case: &WellCase) -> Result<SolverSettings, ValidationError> {
    let s = &case.solver;
    if s.closure_max_iterations == 0 {
        return Err(invalid("solver.closure_max_iterations", 0.0, "must be at least 1"));
    }
    if s.traverse_max_iterations == 0 {
        return Err(invalid("solver.traverse_max_iterations", 0.0, "must be at least 1"));
    }
    for (name, value) in [
        ("solver.closure_tolerance_psi", s.closure_tolerance_psi),
        ("solver.traverse_step_ft", s.traverse_step_ft),
        ("solver.traverse_tolerance_psi", s.traverse_tolerance_psi),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(name, value, "must be positive"));
        }
    }
    Ok(SolverSettings {
        closure: RootConfig {
            max_iterations: s.closure_max_iterations,
            abs_tol: s.closure_tolerance_psi,
            ..RootConfig::default()
        },
        traverse: TraverseConfig {
            step: ft(s.traverse_step_ft),
            tolerance_psi: s.traverse_tolerance_psi,
            max_iterations: s.traverse_max_iterations,
        },
        ..SolverSettings::default()
    })
}

/// Stage one: validate the case and build the typed well, fluid, inflow
/// and pump objects.
pub fn build_well_inputs(case: &WellCase) -> Result<WellInputs, ValidationError> {
    let w = &case.well;
    let f = &case.fluids;
    require_nonzero(&[
        ("well.perforation_depth_ft", w.perforation_depth_ft),
        ("well.pump_depth_ft", w.pump_depth_ft),
        ("well.tubing_od_in", w.tubing_od_in),
        ("well.tubing_id_in", w.tubing_id_in),
        ("well.casing_id_in", w.casing_id_in),
        ("well.wellhead_pressure_psi", w.wellhead_pressure_psi),
        ("well.injection_pressure_psi", w.injection_pressure_psi),
        ("well.wellhead_temperature_f", w.wellhead_temperature_f),
        ("well.bottomhole_temperature_f", w.bottomhole_temperature_f),
        ("fluids.api", f.api),
        ("fluids.bubble_point_psi", f.bubble_point_psi),
        ("fluids.gas_specific_gravity", f.gas_specific_gravity),
        ("fluids.water_specific_gravity", f.water_specific_gravity),
        ("fluids.power_fluid_viscosity_cp", f.power_fluid_viscosity_cp),
        ("reservoir.pressure_psi", case.reservoir.pressure_psi),
        ("reservoir.temperature_f", case.reservoir.temperature_f),
        ("test.rate_stb_d", case.test.rate_stb_d),
        ("test.flowing_pressure_psi", case.test.flowing_pressure_psi),
        ("pump.nozzle_area_sq_in", case.pump.nozzle_area_sq_in),
        ("pump.throat_area_sq_in", case.pump.throat_area_sq_in),
    ])?;

    for (name, value) in [
        ("well.wellhead_pressure_psi", w.wellhead_pressure_psi),
        ("well.injection_pressure_psi", w.injection_pressure_psi),
    ] {
        if value <= 0.0 {
            return Err(invalid(name, value, "must be positive"));
        }
    }
    if !(0.0..=1.0).contains(&f.water_cut) {
        return Err(invalid("fluids.water_cut", f.water_cut, "must lie in [0, 1]"));
    }
    if !(f.gor_scf_stb.is_finite() && f.gor_scf_stb >= 0.0) {
        return Err(invalid("fluids.gor_scf_stb", f.gor_scf_stb, "must be non-negative"));
    }
    if case.test.flowing_pressure_psi >= case.reservoir.pressure_psi {
        return Err(invalid(
            "test.flowing_pressure_psi",
            case.test.flowing_pressure_psi,
            "must be below reservoir pressure",
        ));
    }

    let mut well = WellConfiguration::new(
        ft(w.perforation_depth_ft),
        ft(w.pump_depth_ft),
        inch(w.tubing_od_in),
        inch(w.tubing_id_in),
        inch(w.casing_id_in),
    )
    .map_err(|e| model_error("well geometry", e))?;
    if let Some(r) = w.roughness_in {
        well = well
            .with_roughness(inch(r))
            .map_err(|e| model_error("well geometry", e))?;
    }

    let mut notes = Vec::new();
    if well.pump_below_perforations() {
        tracing::warn!(
            pump_depth_ft = w.pump_depth_ft,
            perforation_depth_ft = w.perforation_depth_ft,
            "pump set below perforations"
        );
        notes.push(format!(
            "pump depth {} ft is below perforation depth {} ft",
            w.pump_depth_ft, w.perforation_depth_ft
        ));
    }

    let temperature = TemperatureProfile::linear(
        deg_f(w.wellhead_temperature_f),
        deg_f(w.bottomhole_temperature_f),
        ft(w.perforation_depth_ft),
    )
    .map_err(|e| model_error("temperature profile", e))?;

    let power_fluid = match f.power_fluid_specific_gravity {
        Some(sg) => PowerFluid::new(sg, cp(f.power_fluid_viscosity_cp)),
        None => Ok(PowerFluid::power_oil(f.api, cp(f.power_fluid_viscosity_cp))),
    }
    .map_err(|e| model_error("power fluid", e))?;

    let fluids = FluidProperties::new(
        f.api,
        psi(f.bubble_point_psi),
        f.gas_specific_gravity,
        f.water_specific_gravity,
        f.water_cut,
        f.gor_scf_stb,
        power_fluid,
    )
    .map_err(|e| model_error("fluid properties", e))?;
    let model = BlackOilModel::new(fluids, correlation_set(case));

    let test = ProductionTestPoint::new(
        case.test.rate_stb_d,
        psi(case.test.flowing_pressure_psi),
        psi(case.reservoir.pressure_psi),
        deg_f(case.reservoir.temperature_f),
    )
    .map_err(|e| model_error("production test", e))?;
    let ipr = InflowModel::calibrate(&test, psi(f.bubble_point_psi))
        .map_err(|e| model_error("inflow calibration", e))?;

    let c = &case.solver.coefficients;
    let geometry = JetPumpGeometry::new(
        sq_in(case.pump.nozzle_area_sq_in),
        sq_in(case.pump.throat_area_sq_in),
    )
    .map_err(|e| model_error("pump geometry", e))?;
    let pump = JetPump::new(
        geometry,
        PumpCoefficients {
            nozzle_velocity: c.nozzle_velocity,
            suction_loss: c.suction_loss,
            throat_loss: c.throat_loss,
            diffuser_recovery: c.diffuser_recovery,
        },
    )
    .map_err(|e| model_error("pump coefficients", e))?;

    if case.solver.ipr_points < 2 {
        return Err(invalid(
            "solver.ipr_points",
            case.solver.ipr_points as f64,
            "need at least 2 points",
        ));
    }

    Ok(WellInputs {
        case_name: case.name.clone(),
        well_name: w.name.clone(),
        pump_name: case.pump.name.clone(),
        well,
        temperature,
        model,
        ipr,
        pump,
        injection_pressure: psi(w.injection_pressure_psi),
        wellhead_pressure: psi(w.wellhead_pressure_psi),
        circulation: match w.circulation {
            CirculationDef::Standard => CirculationMode::Standard,
            CirculationDef::Reverse => CirculationMode::Reverse,
        },
        settings: solver_settings(case)?,
        ipr_points: case.solver.ipr_points,
        notes,
    })
}

/// Stage two: validate the sweep bounds against the built inputs.
pub fn build_pressure_range(
    case: &WellCase,
    inputs: &WellInputs,
) -> Result<PressureRange, ValidationError> {
    let s = &case.sweep;
    require_nonzero(&[
        ("sweep.pwf_min_psi", s.pwf_min_psi),
        ("sweep.pwf_max_psi", s.pwf_max_psi),
    ])?;
    if s.pwf_min_psi <= 0.0 {
        return Err(invalid("sweep.pwf_min_psi", s.pwf_min_psi, "must be positive"));
    }
    if s.pwf_min_psi >= s.pwf_max_psi {
        return Err(invalid(
            "sweep.pwf_min_psi",
            s.pwf_min_psi,
            "must be below sweep.pwf_max_psi",
        ));
    }
    if case.solver.vlp_points < 2 {
        return Err(invalid(
            "solver.vlp_points",
            case.solver.vlp_points as f64,
            "need at least 2 points",
        ));
    }

    let ps_min = field::psi(inputs.suction_pressure(psi(s.pwf_min_psi)));
    if ps_min <= 0.0 {
        return Err(invalid(
            "sweep.pwf_min_psi",
            s.pwf_min_psi,
            "pump intake pressure would be non-positive at this pwf",
        ));
    }

    Ok(PressureRange {
        min: psi(s.pwf_min_psi),
        max: psi(s.pwf_max_psi),
        points: case.solver.vlp_points,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sweep_samples_are_ordered_and_pinned(
            min in 1.0f64..3000.0,
            span in 1.0f64..3000.0,
            points in 2usize..80,
        ) {
            let range = PressureRange { min: psi(min), max: psi(min + span), points };
            let s = range.samples_psi();
            prop_assert_eq!(s.len(), points);
            prop_assert!((s[0] - min).abs() < 1e-9);
            prop_assert!((s[points - 1] - (min + span)).abs() < 1e-9);
            prop_assert!(s.windows(2).all(|w| w[1] > w[0]));
        }
    }
}
