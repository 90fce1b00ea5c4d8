//! Jet pump operating point at one sampled flowing bottom-hole pressure.
//!
//! The power-fluid rate is the unknown. For a trial rate the pump equations
//! give a discharge pressure; the return column from pump to wellhead gives
//! the discharge pressure the well actually needs. The operating point is
//! where the two agree.

use crate::error::{SolverError, SolverResult};
use crate::root::{RootConfig, RootResult, find_root};
use jl_components::jet_pump::{hydraulic_horsepower, pump_efficiency};
use jl_components::{
    CirculationMode, ComponentError, FlowDirection, FlowSegment, JetPump, PowerFluidColumn,
    ProducedColumn, PumpStages, ReturnColumn, SuctionState, TemperatureProfile, TraverseConfig,
    WellConfiguration, traverse,
};
use jl_core::units::constants::WATER_DENSITY_LBM_FT3;
use jl_core::units::{Density, Pressure, Temperature, field, ft, lbm_per_ft3, psi};
use jl_fluids::correlations::water_vapor_pressure;
use jl_fluids::{PowerFluid, PvtModel};
use std::fmt;

/// Iteration controls for one operating point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    pub closure: RootConfig,
    pub traverse: TraverseConfig,
    /// Lower end of the power-fluid rate bracket, bbl/d
    pub min_injection_rate: f64,
    /// Initial upper end is max(production rate, this), bbl/d
    pub initial_upper_rate: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            closure: RootConfig::default(),
            traverse: TraverseConfig::default(),
            min_injection_rate: 1.0,
            initial_upper_rate: 100.0,
        }
    }
}

/// Everything needed to solve one sample.
#[derive(Clone, Copy)]
pub struct JetPumpProblem<'a> {
    /// Sampled flowing bottom-hole pressure
    pub pwf: Pressure,
    /// Pump intake pressure after the perforation-to-pump correction
    pub suction_pressure: Pressure,
    /// Inflow rate at `pwf`, STB/D
    pub production_rate: f64,
    pub pump: JetPump,
    pub well: &'a WellConfiguration,
    pub temperature: &'a TemperatureProfile,
    pub model: &'a dyn PvtModel,
    /// Available surface injection pressure
    pub injection_pressure: Pressure,
    pub wellhead_pressure: Pressure,
    pub circulation: CirculationMode,
}

impl JetPumpProblem<'_> {
    fn power_fluid(&self) -> PowerFluid {
        self.model.fluids().power_fluid
    }

    fn power_density(&self) -> Density {
        lbm_per_ft3(WATER_DENSITY_LBM_FT3 * self.power_fluid().specific_gravity)
    }

    fn pump_temperature(&self) -> Temperature {
        self.temperature.at(self.well.pump_depth)
    }

    fn validate(&self) -> SolverResult<()> {
        if !(self.production_rate.is_finite() && self.production_rate >= 0.0) {
            return Err(SolverError::ProblemSetup {
                what: format!("production rate {} must be non-negative", self.production_rate),
            });
        }
        let ps = field::psi(self.suction_pressure);
        if !(ps.is_finite() && ps > 0.0) {
            return Err(SolverError::ProblemSetup {
                what: format!("suction pressure {ps:.1} psi must be positive"),
            });
        }
        let pwh = field::psi(self.wellhead_pressure);
        if !(pwh.is_finite() && pwh > 0.0) {
            return Err(SolverError::ProblemSetup {
                what: format!("wellhead pressure {pwh:.1} psi must be positive"),
            });
        }
        Ok(())
    }

    /// Produced stream at pump intake conditions.
    fn suction_state(&self) -> SolverResult<(SuctionState, f64, bool)> {
        let mix = self
            .model
            .mixture(self.suction_pressure, self.pump_temperature())?;
        let state = SuctionState {
            pressure: self.suction_pressure,
            density: mix.density,
            rate_bpd: self.production_rate * mix.volume_factor,
        };
        Ok((state, mix.volume_factor, mix.extrapolated))
    }
}

/// One row of the VLP table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperatingPoint {
    /// STB/D
    pub production_rate: f64,
    pub pwf: Pressure,
    /// bbl/d of power fluid
    pub injection_rate: f64,
    pub discharge_pressure: Pressure,
    pub nozzle_pressure: Pressure,
    pub horsepower: f64,
    /// Fraction, 0..1 under normal operation
    pub efficiency: f64,
    pub cavitation_area_sq_in: f64,
    /// Largest cavitation-free production, STB/D
    pub cavitation_flow: f64,
}

/// Intermediate values kept for inspection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointDiagnostics {
    pub suction_pressure: Pressure,
    pub throat_inlet_pressure: Pressure,
    pub required_injection_pressure: Pressure,
    pub area_ratio: f64,
    pub iterations: usize,
    /// Discharge mismatch at the reported injection rate, psi
    pub residual_psi: f64,
    pub extrapolated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointStatus {
    Converged,
    /// Iteration cap reached; the point holds the best estimate.
    Unconverged { iterations: usize, residual_psi: f64 },
}

/// Advisory flags attached to a solved point.
#[derive(Clone, Debug, PartialEq)]
pub enum OperatingWarning {
    EfficiencyOutOfRange {
        efficiency: f64,
    },
    /// Production exceeds the largest cavitation-free rate at the current
    /// intake pressure. The cavitation pressure is the water vapor pressure
    /// at pump temperature.
    Cavitation {
        production_rate: f64,
        cavitation_flow: f64,
    },
    InsufficientInjectionPressure {
        required: Pressure,
        available: Pressure,
    },
    ExtrapolatedProperties,
}

impl fmt::Display for OperatingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingWarning::EfficiencyOutOfRange { efficiency } => {
                write!(f, "efficiency {efficiency:.3} outside [0, 1]")
            }
            OperatingWarning::Cavitation {
                production_rate,
                cavitation_flow,
            } => write!(
                f,
                "cavitation: production {production_rate:.1} STB/D exceeds limit {cavitation_flow:.1} STB/D"
            ),
            OperatingWarning::InsufficientInjectionPressure {
                required,
                available,
            } => write!(
                f,
                "injection pressure {:.1} psi required, {:.1} psi available",
                field::psi(*required),
                field::psi(*available)
            ),
            OperatingWarning::ExtrapolatedProperties => {
                write!(f, "fluid properties extrapolated outside correlation range")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointSolution {
    pub point: OperatingPoint,
    pub status: PointStatus,
    pub diagnostics: PointDiagnostics,
    pub warnings: Vec<OperatingWarning>,
}

impl PointSolution {
    pub fn is_converged(&self) -> bool {
        matches!(self.status, PointStatus::Converged)
    }
}

/// Discharge pressure the return column needs at pump depth to deliver
/// wellhead pressure, for `injection_rate` bbl/d of power fluid mixed in.
fn required_discharge_pressure(
    problem: &JetPumpProblem<'_>,
    injection_rate: f64,
    settings: &SolverSettings,
) -> SolverResult<Pressure> {
    let fluid = ReturnColumn {
        produced: ProducedColumn {
            model: problem.model,
            rate_stbd: problem.production_rate,
        },
        power: PowerFluidColumn {
            fluid: problem.power_fluid(),
            rate_bpd: injection_rate,
        },
    };
    let segment = FlowSegment {
        path: problem.well.return_path(problem.circulation),
        fluid: &fluid,
        direction: FlowDirection::Up,
        temperature: problem.temperature,
    };
    let result = traverse(
        &segment,
        ft(0.0),
        problem.well.pump_depth,
        problem.wellhead_pressure,
        &settings.traverse,
    )?;
    Ok(result.pressure)
}

/// Surface pressure needed to deliver `nozzle` pressure at the pump with
/// `injection_rate` bbl/d flowing down the injection conduit.
///
/// Zero when the power-fluid column alone supplies the nozzle pressure.
fn surface_pressure_for_nozzle(
    problem: &JetPumpProblem<'_>,
    injection_rate: f64,
    nozzle: Pressure,
    settings: &SolverSettings,
) -> SolverResult<Pressure> {
    let fluid = PowerFluidColumn {
        fluid: problem.power_fluid(),
        rate_bpd: injection_rate,
    };
    let segment = FlowSegment {
        path: problem.well.injection_path(problem.circulation),
        fluid: &fluid,
        direction: FlowDirection::Down,
        temperature: problem.temperature,
    };
    match traverse(
        &segment,
        problem.well.pump_depth,
        ft(0.0),
        nozzle,
        &settings.traverse,
    ) {
        Ok(r) => Ok(r.pressure),
        Err(ComponentError::NonPhysical { .. }) => Ok(psi(0.0)),
        Err(e) => Err(e.into()),
    }
}

/// Surface injection pressure required to run the pump at `injection_rate`.
pub fn required_injection_pressure(
    problem: &JetPumpProblem<'_>,
    injection_rate: f64,
    settings: &SolverSettings,
) -> SolverResult<Pressure> {
    problem.validate()?;
    let (suction, _, _) = problem.suction_state()?;
    let nozzle =
        problem
            .pump
            .required_nozzle_pressure(injection_rate, problem.power_density(), &suction)?;
    surface_pressure_for_nozzle(problem, injection_rate, nozzle, settings)
}

/// Solve for the power-fluid rate that balances pump discharge against the
/// return column, then derive power, efficiency and cavitation figures.
pub fn solve_operating_point(
    problem: &JetPumpProblem<'_>,
    settings: &SolverSettings,
) -> SolverResult<PointSolution> {
    problem.validate()?;

    let (suction, volume_factor, extrapolated) = problem.suction_state()?;
    let rho_n = problem.power_density();
    let pump = problem.pump;

    let residual = |q_inj: f64| -> SolverResult<f64> {
        let stages = pump.evaluate(q_inj, rho_n, &suction)?;
        let required = required_discharge_pressure(problem, q_inj, settings)?;
        Ok(field::psi(stages.discharge) - field::psi(required))
    };

    let lo = settings.min_injection_rate;
    let hi = problem.production_rate.max(settings.initial_upper_rate);
    let RootResult {
        x: q_inj,
        residual: residual_psi,
        iterations,
        converged,
    } = find_root(residual, lo, hi, &settings.closure)?;

    let stages: PumpStages = pump.evaluate(q_inj, rho_n, &suction)?;
    let nozzle_drop = stages.nozzle - stages.discharge;
    let horsepower = hydraulic_horsepower(q_inj, nozzle_drop);
    let efficiency = pump_efficiency(
        problem.production_rate,
        problem.suction_pressure,
        stages.discharge,
        q_inj,
        stages.nozzle,
    );

    let p_vapor = psi(water_vapor_pressure(field::deg_f(problem.pump_temperature())));
    let limit = pump.cavitation(&suction, p_vapor);
    let cavitation_flow = limit.max_rate_bpd / volume_factor;

    let required_injection = surface_pressure_for_nozzle(problem, q_inj, stages.nozzle, settings)?;

    let mut warnings = Vec::new();
    if !(efficiency.is_finite() && (0.0..=1.0).contains(&efficiency)) {
        warnings.push(OperatingWarning::EfficiencyOutOfRange { efficiency });
    }
    if problem.production_rate > cavitation_flow {
        warnings.push(OperatingWarning::Cavitation {
            production_rate: problem.production_rate,
            cavitation_flow,
        });
    }
    if required_injection > problem.injection_pressure {
        warnings.push(OperatingWarning::InsufficientInjectionPressure {
            required: required_injection,
            available: problem.injection_pressure,
        });
    }
    if extrapolated {
        warnings.push(OperatingWarning::ExtrapolatedProperties);
    }

    let status = if converged {
        tracing::debug!(
            pwf = field::psi(problem.pwf),
            q_prod = problem.production_rate,
            q_inj,
            iterations,
            "operating point converged"
        );
        PointStatus::Converged
    } else {
        tracing::warn!(
            pwf = field::psi(problem.pwf),
            iterations,
            residual_psi,
            "operating point did not converge"
        );
        PointStatus::Unconverged {
            iterations,
            residual_psi,
        }
    };

    Ok(PointSolution {
        point: OperatingPoint {
            production_rate: problem.production_rate,
            pwf: problem.pwf,
            injection_rate: q_inj,
            discharge_pressure: stages.discharge,
            nozzle_pressure: stages.nozzle,
            horsepower,
            efficiency,
            cavitation_area_sq_in: limit.area_sq_in,
            cavitation_flow,
        },
        status,
        diagnostics: PointDiagnostics {
            suction_pressure: problem.suction_pressure,
            throat_inlet_pressure: stages.throat_inlet,
            required_injection_pressure: required_injection,
            area_ratio: pump.geometry.area_ratio(),
            iterations,
            residual_psi,
            extrapolated,
        },
        warnings,
    })
}
