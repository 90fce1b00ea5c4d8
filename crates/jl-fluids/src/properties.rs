//! Static descriptions of the produced fluid and the power fluid.

use crate::error::{FluidError, FluidResult};
use jl_core::units::constants::oil_specific_gravity;
use jl_core::units::{DynVisc, Pressure, field};

/// Power (injection) fluid pumped down to drive the jet.
///
/// Treated as an incompressible single-phase liquid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerFluid {
    /// Specific gravity relative to water
    pub specific_gravity: f64,
    /// Dynamic viscosity
    pub viscosity: DynVisc,
}

impl PowerFluid {
    pub fn new(specific_gravity: f64, viscosity: DynVisc) -> FluidResult<Self> {
        if !(specific_gravity.is_finite() && specific_gravity > 0.0) {
            return Err(FluidError::InvalidInput {
                what: "power fluid specific gravity must be positive",
            });
        }
        if !(viscosity.value.is_finite() && viscosity.value > 0.0) {
            return Err(FluidError::InvalidInput {
                what: "power fluid viscosity must be positive",
            });
        }
        Ok(Self {
            specific_gravity,
            viscosity,
        })
    }

    /// Produced stock-tank oil used as power fluid.
    pub fn power_oil(api: f64, viscosity: DynVisc) -> Self {
        Self {
            specific_gravity: oil_specific_gravity(api),
            viscosity,
        }
    }
}

/// Produced fluid description plus the power fluid it is lifted with.
#[derive(Clone, Debug, PartialEq)]
pub struct FluidProperties {
    /// Stock-tank oil API gravity
    pub api: f64,
    /// Bubble-point pressure
    pub bubble_point: Pressure,
    /// Gas specific gravity (air = 1)
    pub gas_specific_gravity: f64,
    /// Water specific gravity
    pub water_specific_gravity: f64,
    /// Water cut as a fraction of stock-tank liquid, 0..=1
    pub water_cut: f64,
    /// Producing gas-oil ratio, scf/STB
    pub gor: f64,
    pub power_fluid: PowerFluid,
}

impl FluidProperties {
    /// Create a validated fluid description.
    ///
    /// # Errors
    /// Returns `InvalidInput` for non-positive API, bubble point or gravities,
    /// negative GOR, or a water cut outside `[0, 1]`.
    pub fn new(
        api: f64,
        bubble_point: Pressure,
        gas_specific_gravity: f64,
        water_specific_gravity: f64,
        water_cut: f64,
        gor: f64,
        power_fluid: PowerFluid,
    ) -> FluidResult<Self> {
        if !(api.is_finite() && api > 0.0) {
            return Err(FluidError::InvalidInput {
                what: "API gravity must be positive",
            });
        }
        if !(bubble_point.value.is_finite() && bubble_point.value > 0.0) {
            return Err(FluidError::InvalidInput {
                what: "bubble-point pressure must be positive",
            });
        }
        if !(gas_specific_gravity.is_finite() && gas_specific_gravity > 0.0) {
            return Err(FluidError::InvalidInput {
                what: "gas specific gravity must be positive",
            });
        }
        if !(water_specific_gravity.is_finite() && water_specific_gravity > 0.0) {
            return Err(FluidError::InvalidInput {
                what: "water specific gravity must be positive",
            });
        }
        if !(0.0..=1.0).contains(&water_cut) {
            return Err(FluidError::InvalidInput {
                what: "water cut must be within [0, 1]",
            });
        }
        if !(gor.is_finite() && gor >= 0.0) {
            return Err(FluidError::InvalidInput {
                what: "gas-oil ratio cannot be negative",
            });
        }
        let power_fluid = PowerFluid::new(power_fluid.specific_gravity, power_fluid.viscosity)?;

        Ok(Self {
            api,
            bubble_point,
            gas_specific_gravity,
            water_specific_gravity,
            water_cut,
            gor,
            power_fluid,
        })
    }

    pub fn oil_specific_gravity(&self) -> f64 {
        oil_specific_gravity(self.api)
    }

    pub fn bubble_point_psi(&self) -> f64 {
        field::psi(self.bubble_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jl_core::units::{cp, psi};

    fn power() -> PowerFluid {
        PowerFluid::power_oil(30.0, cp(1.0))
    }

    #[test]
    fn valid_fluids() {
        let f = FluidProperties::new(30.0, psi(1500.0), 0.7, 1.05, 0.5, 300.0, power()).unwrap();
        assert!((f.oil_specific_gravity() - 0.8762).abs() < 1e-4);
        assert!((f.bubble_point_psi() - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn water_cut_outside_unit_interval() {
        for wc in [-0.01, 1.01, f64::NAN] {
            let r = FluidProperties::new(30.0, psi(1500.0), 0.7, 1.05, wc, 300.0, power());
            assert!(matches!(r, Err(FluidError::InvalidInput { .. })), "wc={wc}");
        }
    }

    #[test]
    fn zero_api_rejected() {
        let r = FluidProperties::new(0.0, psi(1500.0), 0.7, 1.05, 0.5, 300.0, power());
        assert!(r.is_err());
    }

    #[test]
    fn zero_bubble_point_rejected() {
        let r = FluidProperties::new(30.0, psi(0.0), 0.7, 1.05, 0.5, 300.0, power());
        assert!(r.is_err());
    }

    #[test]
    fn dead_oil_allowed() {
        assert!(FluidProperties::new(30.0, psi(1500.0), 0.7, 1.05, 0.0, 0.0, power()).is_ok());
    }

    #[test]
    fn power_fluid_validation() {
        assert!(PowerFluid::new(0.0, cp(1.0)).is_err());
        assert!(PowerFluid::new(1.0, cp(0.0)).is_err());
        assert!(PowerFluid::new(1.02, cp(0.8)).is_ok());
    }
}
