//! Published black-oil correlations in oilfield units.
//!
//! Every function here is a pure function of `f64` inputs: pressures in psia,
//! temperatures in °F, GOR/Rs in scf/STB, viscosities in cP, densities in
//! lbm/ft³. None of them validate their inputs; `BlackOilModel` does that and
//! decides what counts as extrapolation using the `ValidityRange` constants.

use jl_core::units::constants::{AIR_DENSITY_LBM_FT3, RANKINE_OFFSET, oil_specific_gravity};

/// Temperature/gravity envelope a correlation was fitted on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidityRange {
    pub name: &'static str,
    pub min_temperature_f: f64,
    pub max_temperature_f: f64,
    pub min_api: f64,
    pub max_api: f64,
}

impl ValidityRange {
    pub fn covers(&self, temperature_f: f64, api: f64) -> bool {
        (self.min_temperature_f..=self.max_temperature_f).contains(&temperature_f)
            && (self.min_api..=self.max_api).contains(&api)
    }
}

pub const STANDING: ValidityRange = ValidityRange {
    name: "Standing",
    min_temperature_f: 100.0,
    max_temperature_f: 258.0,
    min_api: 16.5,
    max_api: 63.8,
};

pub const VASQUEZ_BEGGS: ValidityRange = ValidityRange {
    name: "Vasquez-Beggs",
    min_temperature_f: 70.0,
    max_temperature_f: 295.0,
    min_api: 15.3,
    max_api: 59.5,
};

pub const BEGGS_ROBINSON: ValidityRange = ValidityRange {
    name: "Beggs-Robinson",
    min_temperature_f: 70.0,
    max_temperature_f: 295.0,
    min_api: 16.0,
    max_api: 58.0,
};

// ---------------------------------------------------------------------------
// Oil

/// Standing (1947) solution gas-oil ratio at saturated conditions.
pub fn standing_rs(p: f64, t: f64, api: f64, gas_sg: f64) -> f64 {
    let x = 0.0125 * api - 0.00091 * t;
    gas_sg * ((p / 18.2 + 1.4) * 10f64.powf(x)).powf(1.2048)
}

/// Vasquez-Beggs (1980) solution gas-oil ratio.
pub fn vasquez_beggs_rs(p: f64, t: f64, api: f64, gas_sg: f64) -> f64 {
    let (c1, c2, c3) = if api <= 30.0 {
        (0.0362, 1.0937, 25.7245)
    } else {
        (0.0178, 1.187, 23.931)
    };
    c1 * gas_sg * p.powf(c2) * (c3 * api / (t + RANKINE_OFFSET)).exp()
}

/// Standing saturated oil formation volume factor, rb/STB.
pub fn standing_bo(rs: f64, t: f64, api: f64, gas_sg: f64) -> f64 {
    let gamma_o = oil_specific_gravity(api);
    0.9759 + 0.00012 * (rs * (gas_sg / gamma_o).sqrt() + 1.25 * t).powf(1.2)
}

/// Vasquez-Beggs saturated oil formation volume factor, rb/STB.
pub fn vasquez_beggs_bo(rs: f64, t: f64, api: f64, gas_sg: f64) -> f64 {
    let (c1, c2, c3) = if api <= 30.0 {
        (4.677e-4, 1.751e-5, -1.811e-8)
    } else {
        (4.67e-4, 1.1e-5, 1.337e-9)
    };
    1.0 + c1 * rs + (t - 60.0) * (api / gas_sg) * (c2 + c3 * rs)
}

/// Vasquez-Beggs isothermal compressibility of undersaturated oil, 1/psi.
pub fn undersaturated_compressibility(p: f64, t: f64, api: f64, gas_sg: f64, rs: f64) -> f64 {
    (-1433.0 + 5.0 * rs + 17.2 * t - 1180.0 * gas_sg + 12.61 * api) / (1e5 * p)
}

/// Beggs-Robinson (1975) dead-oil viscosity, cP.
pub fn beggs_robinson_dead_oil_viscosity(t: f64, api: f64) -> f64 {
    let y = 10f64.powf(3.0324 - 0.02023 * api);
    let x = y * t.powf(-1.163);
    10f64.powf(x) - 1.0
}

/// Beggs-Robinson live (saturated) oil viscosity, cP.
pub fn beggs_robinson_live_oil_viscosity(mu_dead: f64, rs: f64) -> f64 {
    let a = 10.715 * (rs + 100.0).powf(-0.515);
    let b = 5.44 * (rs + 150.0).powf(-0.338);
    a * mu_dead.powf(b)
}

/// Vasquez-Beggs viscosity of oil compressed above its bubble point, cP.
pub fn vasquez_beggs_undersaturated_viscosity(mu_bubble: f64, p: f64, pb: f64) -> f64 {
    let m = 2.6 * p.powf(1.187) * (-11.513 - 8.98e-5 * p).exp();
    mu_bubble * (p / pb).powf(m)
}

// ---------------------------------------------------------------------------
// Gas

/// Sutton pseudo-critical temperature (°R) and pressure (psia).
pub fn sutton_pseudocritical(gas_sg: f64) -> (f64, f64) {
    let tpc = 169.2 + 349.5 * gas_sg - 74.0 * gas_sg * gas_sg;
    let ppc = 756.8 - 131.0 * gas_sg - 3.6 * gas_sg * gas_sg;
    (tpc, ppc)
}

/// Papay (1968) explicit gas compressibility factor.
///
/// Unclamped: at high reduced pressure and low reduced temperature it can go
/// non-physical, which the caller must check.
pub fn papay_z(p: f64, t: f64, gas_sg: f64) -> f64 {
    let (tpc, ppc) = sutton_pseudocritical(gas_sg);
    let tpr = (t + RANKINE_OFFSET) / tpc;
    let ppr = p / ppc;
    1.0 - 3.52 * ppr / 10f64.powf(0.9813 * tpr) + 0.274 * ppr * ppr / 10f64.powf(0.8157 * tpr)
}

/// Gas formation volume factor, ft³/scf.
pub fn gas_fvf(p: f64, t: f64, z: f64) -> f64 {
    0.02827 * z * (t + RANKINE_OFFSET) / p
}

/// In-situ gas density from the real-gas law, lbm/ft³.
pub fn gas_density(p: f64, t: f64, gas_sg: f64, z: f64) -> f64 {
    AIR_DENSITY_LBM_FT3 * gas_sg / gas_fvf(p, t, z)
}

/// Lee-Gonzalez-Eakin (1966) gas viscosity, cP.
pub fn lee_gas_viscosity(t: f64, gas_density_lbm_ft3: f64, gas_sg: f64) -> f64 {
    let molar_mass = 28.967 * gas_sg;
    let tr = t + RANKINE_OFFSET;
    let k = (9.4 + 0.02 * molar_mass) * tr.powf(1.5) / (209.0 + 19.0 * molar_mass + tr);
    let x = 3.5 + 986.0 / tr + 0.01 * molar_mass;
    let y = 2.4 - 0.2 * x;
    let rho_g_cc = gas_density_lbm_ft3 / 62.428;
    1e-4 * k * (x * rho_g_cc.powf(y)).exp()
}

// ---------------------------------------------------------------------------
// Water

/// McCain water formation volume factor, rb/STB.
pub fn water_fvf(p: f64, t: f64) -> f64 {
    let dv_t = -1.0001e-2 + 1.33391e-4 * t + 5.50654e-7 * t * t;
    let dv_p = -1.95301e-9 * p * t - 1.72834e-13 * p * p * t - 3.58922e-7 * p - 2.25341e-10 * p * p;
    (1.0 + dv_t) * (1.0 + dv_p)
}

/// Beggs-Brill water viscosity, cP.
pub fn water_viscosity(t: f64) -> f64 {
    (1.003 - 1.479e-2 * t + 1.982e-5 * t * t).exp()
}

/// Water vapor pressure from the two-range Antoine equation, psia.
pub fn water_vapor_pressure(t: f64) -> f64 {
    let t_c = (t - 32.0) / 1.8;
    let (a, b, c) = if t_c <= 100.0 {
        (8.07131, 1730.63, 233.426)
    } else {
        (8.14019, 1810.94, 244.485)
    };
    let p_mmhg = 10f64.powf(a - b / (c + t_c));
    p_mmhg / 51.715
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs()
    }

    #[test]
    fn standing_rs_reference() {
        assert!(close(standing_rs(1500.0, 180.0, 30.0, 0.7), 261.09, 1e-3));
        assert!(standing_rs(1000.0, 180.0, 30.0, 0.7) < standing_rs(1500.0, 180.0, 30.0, 0.7));
    }

    #[test]
    fn vasquez_beggs_rs_switches_coefficients_at_30_api() {
        assert!(close(vasquez_beggs_rs(1500.0, 180.0, 30.0, 0.7), 252.03, 1e-3));
        assert!(close(vasquez_beggs_rs(1500.0, 180.0, 35.0, 0.7), 271.77, 1e-3));
    }

    #[test]
    fn oil_fvf_reference() {
        assert!(close(standing_bo(300.0, 180.0, 30.0, 0.7), 1.1804, 1e-3));
        assert!(close(vasquez_beggs_bo(300.0, 180.0, 30.0, 0.7), 1.2024, 1e-3));
    }

    #[test]
    fn compressibility_reference() {
        let co = undersaturated_compressibility(2500.0, 180.0, 30.0, 0.7, 300.0);
        assert!(close(co, 1.086e-5, 1e-3));
    }

    #[test]
    fn papay_reference() {
        assert!(close(papay_z(1000.0, 180.0, 0.7), 0.9104, 1e-3));
        assert!(close(papay_z(3000.0, 180.0, 0.7), 0.8863, 1e-3));
    }

    #[test]
    fn ideal_gas_limit() {
        // z -> 1 at low pressure; 14.7 psia, 60 °F air weighs 0.0764 lbm/ft³
        let z = papay_z(14.7, 60.0, 1.0);
        assert!(close(z, 1.0, 1e-2));
        assert!(close(gas_density(14.7, 60.0, 1.0, 1.0), 0.0764, 1e-2));
    }

    #[test]
    fn oil_viscosity_chain() {
        let dead = beggs_robinson_dead_oil_viscosity(180.0, 30.0);
        assert!(close(dead, 3.3129, 1e-3));
        let live = beggs_robinson_live_oil_viscosity(dead, 300.0);
        assert!(close(live, 1.1190, 1e-3));
        let us = vasquez_beggs_undersaturated_viscosity(live, 2500.0, 1500.0);
        assert!(close(us, 1.2549, 1e-3));
    }

    #[test]
    fn gas_viscosity_reference() {
        assert!(close(lee_gas_viscosity(180.0, 4.0, 0.7), 0.014_61, 1e-3));
    }

    #[test]
    fn water_properties() {
        assert!(close(water_viscosity(180.0), 0.3617, 1e-3));
        assert!(close(water_fvf(1000.0, 180.0), 1.0309, 1e-3));
    }

    #[test]
    fn water_boils_at_one_atmosphere() {
        assert!(close(water_vapor_pressure(212.0), 14.696, 2e-3));
        assert!(water_vapor_pressure(180.0) < water_vapor_pressure(300.0));
    }

    #[test]
    fn validity_ranges() {
        assert!(STANDING.covers(180.0, 30.0));
        assert!(!STANDING.covers(80.0, 30.0));
        assert!(!BEGGS_ROBINSON.covers(180.0, 70.0));
        assert!(VASQUEZ_BEGGS.covers(80.0, 30.0));
    }
}
