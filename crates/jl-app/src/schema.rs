//! Well case file schema.
//!
//! Field names carry their oilfield unit so case files read unambiguously.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellCase {
    pub name: String,
    pub well: WellDef,
    pub fluids: FluidsDef,
    pub reservoir: ReservoirDef,
    pub test: TestDef,
    pub pump: PumpDef,
    pub sweep: SweepDef,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub perforation_depth_ft: f64,
    pub pump_depth_ft: f64,
    pub tubing_od_in: f64,
    pub tubing_id_in: f64,
    pub casing_id_in: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_in: Option<f64>,
    pub wellhead_pressure_psi: f64,
    pub wellhead_temperature_f: f64,
    pub bottomhole_temperature_f: f64,
    pub injection_pressure_psi: f64,
    #[serde(default)]
    pub circulation: CirculationDef,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CirculationDef {
    #[default]
    Standard,
    Reverse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidsDef {
    pub api: f64,
    pub bubble_point_psi: f64,
    pub gas_specific_gravity: f64,
    pub water_specific_gravity: f64,
    pub water_cut: f64,
    pub gor_scf_stb: f64,
    pub power_fluid_viscosity_cp: f64,
    /// Defaults to the stock-tank oil gravity (power oil)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_fluid_specific_gravity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservoirDef {
    pub pressure_psi: f64,
    pub temperature_f: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestDef {
    pub rate_stb_d: f64,
    pub flowing_pressure_psi: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PumpDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nozzle_area_sq_in: f64,
    pub throat_area_sq_in: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub pwf_min_psi: f64,
    pub pwf_max_psi: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverDef {
    pub vlp_points: usize,
    pub ipr_points: usize,
    pub closure_tolerance_psi: f64,
    pub closure_max_iterations: usize,
    pub traverse_step_ft: f64,
    pub traverse_tolerance_psi: f64,
    pub traverse_max_iterations: usize,
    pub coefficients: CoefficientsDef,
    pub solution_gas: CorrelationDef,
    pub oil_fvf: CorrelationDef,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            vlp_points: 25,
            ipr_points: 50,
            closure_tolerance_psi: 1.0,
            closure_max_iterations: 100,
            traverse_step_ft: 100.0,
            traverse_tolerance_psi: 0.01,
            traverse_max_iterations: 20,
            coefficients: CoefficientsDef::default(),
            solution_gas: CorrelationDef::Standing,
            oil_fvf: CorrelationDef::Standing,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoefficientsDef {
    pub nozzle_velocity: f64,
    pub suction_loss: f64,
    pub throat_loss: f64,
    pub diffuser_recovery: f64,
}

impl Default for CoefficientsDef {
    fn default() -> Self {
        Self {
            nozzle_velocity: 0.95,
            suction_loss: 0.0,
            throat_loss: 0.10,
            diffuser_recovery: 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDef {
    #[default]
    Standing,
    VasquezBeggs,
}
