//! PVT model trait and validation helpers.

use crate::error::FluidResult;
use crate::properties::FluidProperties;
use jl_core::units::{Density, DynVisc, Pressure, Temperature};

/// Local in-situ properties of the produced stream at one (P, T).
///
/// Volumes are per stock-tank barrel of total liquid (oil + water), so a
/// surface rate in STB/D times `volume_factor` is the in-situ rate in bbl/d.
#[derive(Clone, Debug, PartialEq)]
pub struct MixtureProperties {
    pub pressure: Pressure,
    pub temperature: Temperature,
    /// Solution gas-oil ratio, scf/STB
    pub solution_gas_ratio: f64,
    /// Oil formation volume factor, rb/STB
    pub oil_fvf: f64,
    /// No-slip mixture density
    pub density: Density,
    /// Volume-weighted mixture viscosity
    pub viscosity: DynVisc,
    /// In-situ barrels per stock-tank barrel of liquid
    pub volume_factor: f64,
    /// In-situ free-gas volume fraction, 0..1
    pub gas_fraction: f64,
    /// Evaluated outside a correlation's fitted range, or clamped to a floor
    pub extrapolated: bool,
}

/// Trait for black-oil property models.
///
/// Implementations must be thread-safe (Send + Sync) so pressure samples can
/// be evaluated in parallel. All methods reject non-positive pressure.
pub trait PvtModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Static fluid description this model was built from.
    fn fluids(&self) -> &FluidProperties;

    /// Solution gas-oil ratio, scf/STB. Flat at GOR above the bubble point.
    fn solution_gas_ratio(&self, p: Pressure, t: Temperature) -> FluidResult<f64>;

    /// Oil formation volume factor, rb/STB, at the given `rs`.
    fn oil_formation_volume_factor(&self, p: Pressure, t: Temperature, rs: f64)
    -> FluidResult<f64>;

    /// Full property pack in one call.
    fn mixture(&self, p: Pressure, t: Temperature) -> FluidResult<MixtureProperties>;

    fn mixture_density(&self, p: Pressure, t: Temperature) -> FluidResult<Density> {
        Ok(self.mixture(p, t)?.density)
    }

    fn mixture_viscosity(&self, p: Pressure, t: Temperature) -> FluidResult<DynVisc> {
        Ok(self.mixture(p, t)?.viscosity)
    }
}

/// Validation helpers shared by model implementations.
pub mod validation {
    use crate::error::{FluidError, FluidResult};
    use jl_core::units::constants::RANKINE_OFFSET;
    use jl_core::units::{Pressure, Temperature, field};

    /// Smallest density reported, lbm/ft³.
    pub const DENSITY_FLOOR_LBM_FT3: f64 = 1e-3;

    /// Smallest viscosity reported, cP.
    pub const VISCOSITY_FLOOR_CP: f64 = 1e-4;

    /// Pressure in psia; must be finite and positive.
    pub fn pressure_psi(p: Pressure) -> FluidResult<f64> {
        let v = field::psi(p);
        if v.is_finite() && v > 0.0 {
            Ok(v)
        } else {
            Err(FluidError::InvalidInput {
                what: "pressure must be positive",
            })
        }
    }

    /// Temperature in °F; must be finite and above absolute zero.
    pub fn temperature_f(t: Temperature) -> FluidResult<f64> {
        let v = field::deg_f(t);
        if v.is_finite() && v + RANKINE_OFFSET > 0.0 {
            Ok(v)
        } else {
            Err(FluidError::InvalidInput {
                what: "temperature must be above absolute zero",
            })
        }
    }

    /// Clamp to `floor`, reporting whether clamping happened.
    ///
    /// NaN is clamped too.
    pub fn floored(value: f64, floor: f64) -> (f64, bool) {
        if value > floor {
            (value, false)
        } else {
            (floor, true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use jl_core::units::{deg_f, psi};

    #[test]
    fn pressure_must_be_positive() {
        assert!(pressure_psi(psi(0.0)).is_err());
        assert!(pressure_psi(psi(-5.0)).is_err());
        assert!(pressure_psi(psi(f64::NAN)).is_err());
        assert!((pressure_psi(psi(100.0)).unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn temperature_above_absolute_zero() {
        assert!(temperature_f(deg_f(-500.0)).is_err());
        assert!(temperature_f(deg_f(-40.0)).is_ok());
    }

    #[test]
    fn floor_catches_nan_and_negative() {
        assert_eq!(floored(2.0, 1e-3), (2.0, false));
        assert_eq!(floored(-1.0, 1e-3), (1e-3, true));
        assert_eq!(floored(f64::NAN, 1e-3), (1e-3, true));
    }
}
