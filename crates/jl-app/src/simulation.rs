//! Simulation orchestration: parallel VLP sweep plus the IPR curve.

use crate::error::AppResult;
use crate::validate::{PressureRange, WellInputs};
use jl_components::hydrostatic_correction;
use jl_core::numeric::linspace;
use jl_core::units::{field, psi};
use jl_fluids::PvtModel;
use jl_solver::{
    JetPumpProblem, OperatingPoint, OperatingWarning, PointDiagnostics, PointStatus,
    solve_operating_point,
};
use rayon::prelude::*;
use serde::Serialize;

/// Output table column names, in order.
pub const VLP_COLUMNS: [&str; 9] = [
    "Production rate",
    "Pressure at pwf",
    "Injection rate",
    "Discharge pressure",
    "Nozzle pressure",
    "Horsepower",
    "Efficiency (%)",
    "Cavitation area (in²)",
    "Cavitation flow (bbl/d)",
];

/// Outcome of one sample.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStatus {
    Converged,
    Unconverged { iterations: usize, residual_psi: f64 },
    /// Numerical failure inside the point; no values available
    Failed { message: String },
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Converged => "converged",
            RowStatus::Unconverged { .. } => "unconverged",
            RowStatus::Failed { .. } => "failed",
        }
    }
}

/// One VLP sample.
#[derive(Debug, Clone, PartialEq)]
pub struct VlpRow {
    /// Sampled flowing bottom-hole pressure, psi
    pub pwf: f64,
    pub status: RowStatus,
    pub point: Option<OperatingPoint>,
    pub diagnostics: Option<PointDiagnostics>,
    pub warnings: Vec<OperatingWarning>,
}

impl VlpRow {
    /// Table values in column order, field units.
    pub fn values(&self) -> Option<[f64; 9]> {
        self.point.map(|p| {
            [
                p.production_rate,
                field::psi(p.pwf),
                p.injection_rate,
                field::psi(p.discharge_pressure),
                field::psi(p.nozzle_pressure),
                p.horsepower,
                p.efficiency * 100.0,
                p.cavitation_area_sq_in,
                p.cavitation_flow,
            ]
        })
    }

    pub fn is_flagged(&self) -> bool {
        !self.warnings.is_empty() || !matches!(self.status, RowStatus::Converged)
    }
}

/// One IPR curve point, pressure referenced to pump depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IprPoint {
    pub pressure_psi: f64,
    pub rate_stb_d: f64,
}

/// Matched VLP and IPR curves from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub case_name: String,
    pub well_name: Option<String>,
    pub pump_name: Option<String>,
    pub area_ratio: f64,
    /// Ascending pwf
    pub vlp: Vec<VlpRow>,
    /// Ascending sampled pressure
    pub ipr: Vec<IprPoint>,
    pub notes: Vec<String>,
}

impl SimulationResult {
    pub fn converged_rows(&self) -> usize {
        self.vlp
            .iter()
            .filter(|r| matches!(r.status, RowStatus::Converged))
            .count()
    }

    pub fn flagged_rows(&self) -> usize {
        self.vlp.iter().filter(|r| r.is_flagged()).count()
    }

    /// Serializable view for JSON output.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            case: self.case_name.clone(),
            well: self.well_name.clone(),
            pump: self.pump_name.clone(),
            area_ratio: self.area_ratio,
            columns: VLP_COLUMNS.to_vec(),
            vlp: self
                .vlp
                .iter()
                .map(|row| VlpRecord {
                    pwf: row.pwf,
                    status: row.status.label(),
                    message: match &row.status {
                        RowStatus::Failed { message } => Some(message.clone()),
                        _ => None,
                    },
                    values: row.values(),
                    suction_pressure: row
                        .diagnostics
                        .map(|d| field::psi(d.suction_pressure)),
                    required_injection_pressure: row
                        .diagnostics
                        .map(|d| field::psi(d.required_injection_pressure)),
                    warnings: row.warnings.iter().map(ToString::to_string).collect(),
                })
                .collect(),
            ipr: self.ipr.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VlpRecord {
    pub pwf: f64,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Values in `columns` order
    pub values: Option<[f64; 9]>,
    pub suction_pressure: Option<f64>,
    pub required_injection_pressure: Option<f64>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub case: String,
    pub well: Option<String>,
    pub pump: Option<String>,
    pub area_ratio: f64,
    pub columns: Vec<&'static str>,
    pub vlp: Vec<VlpRecord>,
    pub ipr: Vec<IprPoint>,
    pub notes: Vec<String>,
}

/// Runs the sweep over validated inputs.
pub struct SimulationOrchestrator;

impl SimulationOrchestrator {
    pub fn run(inputs: &WellInputs, range: &PressureRange) -> AppResult<SimulationResult> {
        tracing::info!(
            case = %inputs.case_name,
            points = range.points,
            pwf_min = field::psi(range.min),
            pwf_max = field::psi(range.max),
            pvt = inputs.model.name(),
            "starting VLP sweep"
        );

        let mut vlp: Vec<VlpRow> = range
            .samples_psi()
            .into_par_iter()
            .map(|pwf| Self::solve_row(inputs, pwf))
            .collect();
        vlp.sort_by(|a, b| a.pwf.total_cmp(&b.pwf));

        let ipr = Self::ipr_curve(inputs)?;

        let result = SimulationResult {
            case_name: inputs.case_name.clone(),
            well_name: inputs.well_name.clone(),
            pump_name: inputs.pump_name.clone(),
            area_ratio: inputs.pump.geometry.area_ratio(),
            vlp,
            ipr,
            notes: inputs.notes.clone(),
        };

        tracing::info!(
            rows = result.vlp.len(),
            converged = result.converged_rows(),
            flagged = result.flagged_rows(),
            "VLP sweep finished"
        );
        Ok(result)
    }

    fn solve_row(inputs: &WellInputs, pwf_psi: f64) -> VlpRow {
        let pwf = psi(pwf_psi);
        let production_rate = match inputs.ipr.evaluate(pwf) {
            Ok(q) => q,
            Err(e) => return Self::failed_row(pwf_psi, e.to_string()),
        };
        let problem = JetPumpProblem {
            pwf,
            suction_pressure: inputs.suction_pressure(pwf),
            production_rate,
            pump: inputs.pump,
            well: &inputs.well,
            temperature: &inputs.temperature,
            model: &inputs.model,
            injection_pressure: inputs.injection_pressure,
            wellhead_pressure: inputs.wellhead_pressure,
            circulation: inputs.circulation,
        };

        match solve_operating_point(&problem, &inputs.settings) {
            Ok(sol) => {
                let status = match sol.status {
                    PointStatus::Converged => RowStatus::Converged,
                    PointStatus::Unconverged {
                        iterations,
                        residual_psi,
                    } => RowStatus::Unconverged {
                        iterations,
                        residual_psi,
                    },
                };
                for w in &sol.warnings {
                    tracing::warn!(pwf = pwf_psi, "{w}");
                }
                VlpRow {
                    pwf: pwf_psi,
                    status,
                    point: Some(sol.point),
                    diagnostics: Some(sol.diagnostics),
                    warnings: sol.warnings,
                }
            }
            Err(e) => Self::failed_row(pwf_psi, e.to_string()),
        }
    }

    fn failed_row(pwf: f64, message: String) -> VlpRow {
        tracing::warn!(pwf, %message, "operating point failed");
        VlpRow {
            pwf,
            status: RowStatus::Failed { message },
            point: None,
            diagnostics: None,
            warnings: Vec::new(),
        }
    }

    /// IPR from zero to reservoir pressure at whole-psi samples, each
    /// pressure shifted to the pump-depth reference.
    fn ipr_curve(inputs: &WellInputs) -> AppResult<Vec<IprPoint>> {
        let p_res = field::psi(inputs.ipr.reservoir_pressure());
        let shift = field::psi(hydrostatic_correction(
            inputs.model.fluids().oil_specific_gravity(),
            inputs.well.perforation_depth - inputs.well.pump_depth,
        ));

        linspace(0.0, p_res, inputs.ipr_points)
            .into_iter()
            .map(|p| {
                let p = p.round();
                let rate = inputs
                    .ipr
                    .evaluate(psi(p))
                    .map_err(|e| crate::error::AppError::Results(e.to_string()))?;
                Ok(IprPoint {
                    pressure_psi: p - shift,
                    rate_stb_d: rate,
                })
            })
            .collect()
    }
}
