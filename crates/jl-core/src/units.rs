// jl-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI storage, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn psi(v: f64) -> Pressure {
    use uom::si::pressure::pound_force_per_square_inch;
    Pressure::new::<pound_force_per_square_inch>(v)
}

#[inline]
pub fn ft(v: f64) -> Length {
    use uom::si::length::foot;
    Length::new::<foot>(v)
}

#[inline]
pub fn inch(v: f64) -> Length {
    use uom::si::length::inch;
    Length::new::<inch>(v)
}

#[inline]
pub fn sq_in(v: f64) -> Area {
    use uom::si::area::square_inch;
    Area::new::<square_inch>(v)
}

#[inline]
pub fn deg_f(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn cp(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::centipoise;
    DynVisc::new::<centipoise>(v)
}

#[inline]
pub fn lbm_per_ft3(v: f64) -> Density {
    use uom::si::mass_density::pound_per_cubic_foot;
    Density::new::<pound_per_cubic_foot>(v)
}

/// Read-back helpers: the numerical kernels work in oilfield units.
pub mod field {
    use super::*;

    #[inline]
    pub fn psi(p: Pressure) -> f64 {
        p.get::<uom::si::pressure::pound_force_per_square_inch>()
    }

    #[inline]
    pub fn ft(l: Length) -> f64 {
        l.get::<uom::si::length::foot>()
    }

    #[inline]
    pub fn inch(l: Length) -> f64 {
        l.get::<uom::si::length::inch>()
    }

    #[inline]
    pub fn sq_in(a: Area) -> f64 {
        a.get::<uom::si::area::square_inch>()
    }

    #[inline]
    pub fn sq_ft(a: Area) -> f64 {
        a.get::<uom::si::area::square_foot>()
    }

    #[inline]
    pub fn deg_f(t: Temperature) -> f64 {
        t.get::<uom::si::thermodynamic_temperature::degree_fahrenheit>()
    }

    #[inline]
    pub fn cp(mu: DynVisc) -> f64 {
        mu.get::<uom::si::dynamic_viscosity::centipoise>()
    }

    #[inline]
    pub fn lbm_per_ft3(rho: Density) -> f64 {
        rho.get::<uom::si::mass_density::pound_per_cubic_foot>()
    }
}

pub mod constants {
    /// Newton's-law conversion factor, lbm·ft/(lbf·s²).
    pub const G_C: f64 = 32.174;

    /// Fresh-water hydrostatic gradient, psi/ft.
    pub const PSI_PER_FT_FRESH_WATER: f64 = 0.433;

    /// Fresh water at standard conditions, lbm/ft³.
    pub const WATER_DENSITY_LBM_FT3: f64 = 62.4;

    /// Air at standard conditions, lbm/ft³.
    pub const AIR_DENSITY_LBM_FT3: f64 = 0.0764;

    pub const FT3_PER_BBL: f64 = 5.614_583;
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    pub const SQ_IN_PER_SQ_FT: f64 = 144.0;
    pub const RANKINE_OFFSET: f64 = 459.67;

    /// Hydraulic horsepower delivered by 1 bbl/d across 1 psi.
    pub const HYDRAULIC_HP_PER_BPD_PSI: f64 = 1.7014e-5;

    /// Stock-tank liquid rate (bbl/d) to volumetric flow (ft³/s).
    #[inline]
    pub fn bpd_to_ft3_per_s(q_bpd: f64) -> f64 {
        q_bpd * FT3_PER_BBL / SECONDS_PER_DAY
    }

    /// Volumetric flow (ft³/s) back to bbl/d.
    #[inline]
    pub fn ft3_per_s_to_bpd(q: f64) -> f64 {
        q * SECONDS_PER_DAY / FT3_PER_BBL
    }

    /// Stock-tank oil specific gravity from API gravity.
    #[inline]
    pub fn oil_specific_gravity(api: f64) -> f64 {
        141.5 / (131.5 + api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_round_trip() {
        assert!((field::psi(psi(2500.0)) - 2500.0).abs() < 1e-9);
        assert!((field::ft(ft(7500.0)) - 7500.0).abs() < 1e-9);
        assert!((field::inch(inch(2.441)) - 2.441).abs() < 1e-12);
        assert!((field::sq_in(sq_in(0.038)) - 0.038).abs() < 1e-12);
        assert!((field::deg_f(deg_f(180.0)) - 180.0).abs() < 1e-9);
        assert!((field::cp(cp(1.2)) - 1.2).abs() < 1e-12);
        assert!((field::lbm_per_ft3(lbm_per_ft3(54.6)) - 54.6).abs() < 1e-9);
    }

    #[test]
    fn psi_is_pascal_scaled() {
        // 1 psi = 6894.757 Pa
        assert!((psi(1.0).value - 6_894.757).abs() < 1e-2);
    }

    #[test]
    fn area_conversion() {
        assert!((field::sq_ft(sq_in(144.0)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rate_conversion_round_trip() {
        let q = constants::bpd_to_ft3_per_s(1000.0);
        assert!((q - 0.064_983_6).abs() < 1e-6);
        assert!((constants::ft3_per_s_to_bpd(q) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn api_to_specific_gravity() {
        assert!((constants::oil_specific_gravity(10.0) - 1.0).abs() < 1e-12);
        assert!((constants::oil_specific_gravity(30.0) - 0.876_16).abs() < 1e-4);
    }
}
