//! Flat, order-significant call record for a single jet pump solve.
//!
//! Mirrors the field-by-field input of the form layer. The pump is set at
//! `total_depth`, so the sampled pressure is taken directly as the pump
//! intake pressure. Power fluid is produced oil with the given viscosity,
//! circulated down the tubing.

use crate::error::SolverResult;
use crate::operating_point::{JetPumpProblem, PointSolution, SolverSettings, solve_operating_point};
use jl_components::{
    CirculationMode, JetPump, JetPumpGeometry, PumpCoefficients, TemperatureProfile,
    WellConfiguration,
};
use jl_core::units::{Area, DynVisc, Length, Pressure, Temperature};
use jl_fluids::{BlackOilModel, CorrelationSet, FluidProperties, PowerFluid};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JetPumpRecord {
    pub pwf: Pressure,
    /// STB/D
    pub production_rate: f64,
    pub nozzle_area: Area,
    pub throat_area: Area,
    pub injection_pressure: Pressure,
    pub wellhead_pressure: Pressure,
    pub bubble_point: Pressure,
    pub bottomhole_temperature: Temperature,
    pub wellhead_temperature: Temperature,
    pub total_depth: Length,
    pub casing_id: Length,
    pub tubing_id: Length,
    pub tubing_od: Length,
    pub api: f64,
    pub gor: f64,
    /// Water cut fraction
    pub water_cut: f64,
    pub gas_specific_gravity: f64,
    pub water_specific_gravity: f64,
    pub power_fluid_viscosity: DynVisc,
}

impl JetPumpRecord {
    pub fn solve(&self, settings: &SolverSettings) -> SolverResult<PointSolution> {
        let well = WellConfiguration::new(
            self.total_depth,
            self.total_depth,
            self.tubing_od,
            self.tubing_id,
            self.casing_id,
        )?;
        let temperature = TemperatureProfile::linear(
            self.wellhead_temperature,
            self.bottomhole_temperature,
            self.total_depth,
        )?;
        let fluids = FluidProperties::new(
            self.api,
            self.bubble_point,
            self.gas_specific_gravity,
            self.water_specific_gravity,
            self.water_cut,
            self.gor,
            PowerFluid::power_oil(self.api, self.power_fluid_viscosity),
        )?;
        let model = BlackOilModel::new(fluids, CorrelationSet::default());
        let pump = JetPump::new(
            JetPumpGeometry::new(self.nozzle_area, self.throat_area)?,
            PumpCoefficients::default(),
        )?;

        let problem = JetPumpProblem {
            pwf: self.pwf,
            suction_pressure: self.pwf,
            production_rate: self.production_rate,
            pump,
            well: &well,
            temperature: &temperature,
            model: &model,
            injection_pressure: self.injection_pressure,
            wellhead_pressure: self.wellhead_pressure,
            circulation: CirculationMode::Standard,
        };
        solve_operating_point(&problem, settings)
    }
}
