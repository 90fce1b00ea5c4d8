//! Black-oil PVT model backed by published correlations.

use crate::correlations::{self as corr, BEGGS_ROBINSON, STANDING, VASQUEZ_BEGGS};
use crate::error::FluidResult;
use crate::model::validation::{
    DENSITY_FLOOR_LBM_FT3, VISCOSITY_FLOOR_CP, floored, pressure_psi, temperature_f,
};
use crate::model::{MixtureProperties, PvtModel};
use crate::properties::FluidProperties;
use jl_core::units::constants::{AIR_DENSITY_LBM_FT3, FT3_PER_BBL, WATER_DENSITY_LBM_FT3};
use jl_core::units::{Pressure, Temperature, cp, lbm_per_ft3};

/// Beggs-Robinson diverges near 0 °F; colder inputs are evaluated here.
const MIN_VISCOSITY_TEMPERATURE_F: f64 = 40.0;

/// Papay can go non-physical at high reduced pressure.
const Z_FACTOR_FLOOR: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolutionGasCorrelation {
    #[default]
    Standing,
    VasquezBeggs,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OilFvfCorrelation {
    #[default]
    Standing,
    VasquezBeggs,
}

/// Which correlations back a `BlackOilModel`.
///
/// Viscosities (Beggs-Robinson / Vasquez-Beggs / Lee / Beggs-Brill) and the
/// z-factor (Papay with Sutton pseudo-criticals) are fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorrelationSet {
    pub solution_gas: SolutionGasCorrelation,
    pub oil_fvf: OilFvfCorrelation,
}

/// Black-oil model for a produced oil/water/gas stream.
///
/// Rs below the bubble point is the chosen correlation rescaled so that
/// `Rs(Pb) = GOR`; this honors the measured bubble point and GOR together
/// and keeps Rs continuous across the saturation pressure.
#[derive(Clone, Debug)]
pub struct BlackOilModel {
    name: String,
    fluids: FluidProperties,
    correlations: CorrelationSet,
}

impl BlackOilModel {
    pub fn new(fluids: FluidProperties, correlations: CorrelationSet) -> Self {
        let name = format!(
            "black-oil({:?} Rs, {:?} Bo)",
            correlations.solution_gas, correlations.oil_fvf
        );
        Self {
            name,
            fluids,
            correlations,
        }
    }

    pub fn correlations(&self) -> CorrelationSet {
        self.correlations
    }

    fn correlation_rs(&self, p: f64, t: f64) -> f64 {
        let f = &self.fluids;
        match self.correlations.solution_gas {
            SolutionGasCorrelation::Standing => {
                corr::standing_rs(p, t, f.api, f.gas_specific_gravity)
            }
            SolutionGasCorrelation::VasquezBeggs => {
                corr::vasquez_beggs_rs(p, t, f.api, f.gas_specific_gravity)
            }
        }
    }

    fn rs_field(&self, p: f64, t: f64) -> f64 {
        let gor = self.fluids.gor;
        let pb = self.fluids.bubble_point_psi();
        if p >= pb || gor == 0.0 {
            return gor;
        }
        let at_bubble_point = self.correlation_rs(pb, t);
        if !(at_bubble_point > 0.0) {
            return 0.0;
        }
        (gor * self.correlation_rs(p, t) / at_bubble_point).clamp(0.0, gor)
    }

    fn saturated_bo(&self, rs: f64, t: f64) -> f64 {
        let f = &self.fluids;
        match self.correlations.oil_fvf {
            OilFvfCorrelation::Standing => corr::standing_bo(rs, t, f.api, f.gas_specific_gravity),
            OilFvfCorrelation::VasquezBeggs => {
                corr::vasquez_beggs_bo(rs, t, f.api, f.gas_specific_gravity)
            }
        }
    }

    fn bo_field(&self, p: f64, t: f64, rs: f64) -> f64 {
        let f = &self.fluids;
        let pb = f.bubble_point_psi();
        if p < pb {
            return self.saturated_bo(rs, t);
        }
        // co = A/p integrates to a power law between Pb and P
        let a = (corr::undersaturated_compressibility(p, t, f.api, f.gas_specific_gravity, rs)
            * p)
            .max(0.0);
        self.saturated_bo(rs, t) * (p / pb).powf(-a)
    }

    fn oil_viscosity(&self, p: f64, t: f64, rs: f64) -> f64 {
        let f = &self.fluids;
        let pb = f.bubble_point_psi();
        let dead =
            corr::beggs_robinson_dead_oil_viscosity(t.max(MIN_VISCOSITY_TEMPERATURE_F), f.api);
        let live = corr::beggs_robinson_live_oil_viscosity(dead, rs);
        if p < pb {
            live
        } else {
            corr::vasquez_beggs_undersaturated_viscosity(live, p, pb)
        }
    }

    fn within_validity(&self, t: f64) -> bool {
        let api = self.fluids.api;
        let rs_range = match self.correlations.solution_gas {
            SolutionGasCorrelation::Standing => STANDING,
            SolutionGasCorrelation::VasquezBeggs => VASQUEZ_BEGGS,
        };
        let bo_range = match self.correlations.oil_fvf {
            OilFvfCorrelation::Standing => STANDING,
            OilFvfCorrelation::VasquezBeggs => VASQUEZ_BEGGS,
        };
        rs_range.covers(t, api) && bo_range.covers(t, api) && BEGGS_ROBINSON.covers(t, api)
    }
}

impl PvtModel for BlackOilModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn fluids(&self) -> &FluidProperties {
        &self.fluids
    }

    fn solution_gas_ratio(&self, p: Pressure, t: Temperature) -> FluidResult<f64> {
        let p = pressure_psi(p)?;
        let t = temperature_f(t)?;
        Ok(self.rs_field(p, t))
    }

    fn oil_formation_volume_factor(
        &self,
        p: Pressure,
        t: Temperature,
        rs: f64,
    ) -> FluidResult<f64> {
        let p = pressure_psi(p)?;
        let t = temperature_f(t)?;
        Ok(self.bo_field(p, t, rs))
    }

    fn mixture(&self, p: Pressure, t: Temperature) -> FluidResult<MixtureProperties> {
        let p_psi = pressure_psi(p)?;
        let t_f = temperature_f(t)?;
        let f = &self.fluids;
        let mut extrapolated = !self.within_validity(t_f);

        let rs = self.rs_field(p_psi, t_f);
        let bo = self.bo_field(p_psi, t_f, rs);
        let bw = corr::water_fvf(p_psi, t_f);

        // In-situ volumes per stock-tank barrel of liquid, rb
        let oil_volume = (1.0 - f.water_cut) * bo;
        let water_volume = f.water_cut * bw;
        let free_gas = (f.gor - rs).max(0.0);

        let (z, z_clamped) = floored(
            corr::papay_z(p_psi, t_f, f.gas_specific_gravity),
            Z_FACTOR_FLOOR,
        );
        extrapolated |= z_clamped;
        let bg = corr::gas_fvf(p_psi, t_f, z);
        let gas_volume = (1.0 - f.water_cut) * free_gas * bg / FT3_PER_BBL;
        let total_volume = oil_volume + water_volume + gas_volume;

        let rho_oil = (WATER_DENSITY_LBM_FT3 * FT3_PER_BBL * f.oil_specific_gravity()
            + AIR_DENSITY_LBM_FT3 * f.gas_specific_gravity * rs)
            / (FT3_PER_BBL * bo);
        let rho_water = WATER_DENSITY_LBM_FT3 * f.water_specific_gravity / bw;
        let rho_gas = corr::gas_density(p_psi, t_f, f.gas_specific_gravity, z);

        let raw_density = (rho_oil * oil_volume + rho_water * water_volume + rho_gas * gas_volume)
            / total_volume;
        let (density, density_clamped) = floored(raw_density, DENSITY_FLOOR_LBM_FT3);

        let mu_oil = self.oil_viscosity(p_psi, t_f, rs);
        let mu_water = corr::water_viscosity(t_f);
        let liquid_volume = oil_volume + water_volume;
        let mu_liquid = (mu_oil * oil_volume + mu_water * water_volume) / liquid_volume;
        let raw_viscosity = if gas_volume > 0.0 {
            let mu_gas = corr::lee_gas_viscosity(t_f, rho_gas, f.gas_specific_gravity);
            (mu_liquid * liquid_volume + mu_gas * gas_volume) / total_volume
        } else {
            mu_liquid
        };
        let (viscosity, viscosity_clamped) = floored(raw_viscosity, VISCOSITY_FLOOR_CP);
        extrapolated |= density_clamped || viscosity_clamped;

        Ok(MixtureProperties {
            pressure: p,
            temperature: t,
            solution_gas_ratio: rs,
            oil_fvf: bo,
            density: lbm_per_ft3(density),
            viscosity: cp(viscosity),
            volume_factor: total_volume,
            gas_fraction: gas_volume / total_volume,
            extrapolated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FluidError;
    use crate::properties::PowerFluid;
    use jl_core::units::{deg_f, field, psi};

    fn fluids(water_cut: f64, gor: f64) -> FluidProperties {
        FluidProperties::new(
            30.0,
            psi(1500.0),
            0.7,
            1.05,
            water_cut,
            gor,
            PowerFluid::power_oil(30.0, cp(1.0)),
        )
        .unwrap()
    }

    fn model() -> BlackOilModel {
        BlackOilModel::new(fluids(0.5, 300.0), CorrelationSet::default())
    }

    #[test]
    fn rs_is_flat_above_bubble_point() {
        let m = model();
        let t = deg_f(180.0);
        assert_eq!(m.solution_gas_ratio(psi(1500.0), t).unwrap(), 300.0);
        assert_eq!(m.solution_gas_ratio(psi(3000.0), t).unwrap(), 300.0);
    }

    #[test]
    fn rs_increases_below_bubble_point() {
        let m = model();
        let t = deg_f(180.0);
        let mut last = 0.0;
        for p in [50.0, 200.0, 500.0, 900.0, 1400.0, 1499.0] {
            let rs = m.solution_gas_ratio(psi(p), t).unwrap();
            assert!(rs > last, "Rs({p}) = {rs} not above {last}");
            assert!(rs < 300.0);
            last = rs;
        }
    }

    #[test]
    fn bo_shrinks_above_bubble_point() {
        let m = model();
        let t = deg_f(180.0);
        let at_pb = m.oil_formation_volume_factor(psi(1500.0), t, 300.0).unwrap();
        let above = m.oil_formation_volume_factor(psi(3000.0), t, 300.0).unwrap();
        assert!(above < at_pb);
        assert!(above > 1.0);
    }

    #[test]
    fn non_positive_pressure_is_invalid() {
        let m = model();
        for p in [0.0, -10.0] {
            assert!(matches!(
                m.mixture(psi(p), deg_f(180.0)),
                Err(FluidError::InvalidInput { .. })
            ));
            assert!(m.solution_gas_ratio(psi(p), deg_f(180.0)).is_err());
        }
    }

    #[test]
    fn single_phase_above_bubble_point() {
        let mix = model().mixture(psi(2000.0), deg_f(180.0)).unwrap();
        assert_eq!(mix.gas_fraction, 0.0);
        let rho = field::lbm_per_ft3(mix.density);
        // between oil (~47) and water (~64)
        assert!(rho > 45.0 && rho < 65.0, "rho = {rho}");
        assert!(!mix.extrapolated);
    }

    #[test]
    fn free_gas_lightens_mixture_below_bubble_point() {
        let m = model();
        let high = m.mixture(psi(1400.0), deg_f(180.0)).unwrap();
        let low = m.mixture(psi(300.0), deg_f(180.0)).unwrap();
        assert!(low.gas_fraction > high.gas_fraction);
        assert!(low.density < high.density);
        assert!(low.volume_factor > high.volume_factor);
        assert!(low.viscosity < high.viscosity);
    }

    #[test]
    fn all_water_stream() {
        let m = BlackOilModel::new(fluids(1.0, 300.0), CorrelationSet::default());
        let mix = m.mixture(psi(500.0), deg_f(150.0)).unwrap();
        assert_eq!(mix.gas_fraction, 0.0);
        let rho = field::lbm_per_ft3(mix.density);
        assert!((rho - 62.4 * 1.05 / mix.volume_factor).abs() < 1e-9);
    }

    #[test]
    fn temperature_outside_range_is_flagged_not_rejected() {
        let m = model();
        let cold = m.mixture(psi(1000.0), deg_f(20.0)).unwrap();
        assert!(cold.extrapolated);
        assert!(cold.density.value > 0.0);
        assert!(cold.viscosity.value > 0.0);

        let hot = m.mixture(psi(1000.0), deg_f(400.0)).unwrap();
        assert!(hot.extrapolated);
        assert!(hot.density.value > 0.0);
    }

    #[test]
    fn vasquez_beggs_set_is_usable() {
        let m = BlackOilModel::new(
            fluids(0.3, 300.0),
            CorrelationSet {
                solution_gas: SolutionGasCorrelation::VasquezBeggs,
                oil_fvf: OilFvfCorrelation::VasquezBeggs,
            },
        );
        assert!(m.name().contains("VasquezBeggs"));
        let rs = m.solution_gas_ratio(psi(750.0), deg_f(180.0)).unwrap();
        assert!(rs > 0.0 && rs < 300.0);
        let mix = m.mixture(psi(750.0), deg_f(180.0)).unwrap();
        assert!(mix.gas_fraction > 0.0);
    }

    #[test]
    fn trait_shortcuts_agree_with_pack() {
        let m = model();
        let (p, t) = (psi(800.0), deg_f(170.0));
        let mix = m.mixture(p, t).unwrap();
        assert_eq!(m.mixture_density(p, t).unwrap(), mix.density);
        assert_eq!(m.mixture_viscosity(p, t).unwrap(), mix.viscosity);
    }
}
