//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use jl_core::numeric::ensure_finite;
use jl_core::units::constants::{G_C, SQ_IN_PER_SQ_FT};

/// Rates below this are treated as no flow (ft³/s)
pub const EPSILON_RATE: f64 = 1e-12;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Darcy friction factor: laminar below Re 2300, Swamee-Jain above.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds <= 0.0 {
        0.0
    } else if reynolds < 2300.0 {
        64.0 / reynolds
    } else {
        let a = relative_roughness / 3.7;
        let b = 5.74 / reynolds.powf(0.9);
        let f = 0.25 / (a + b).log10().powi(2);
        f.max(0.0001) // Clamp to avoid issues
    }
}

/// Reynolds number in field units: ρ lbm/ft³, v ft/s, D ft, μ cP.
pub fn reynolds_number(rho: f64, velocity: f64, diameter: f64, mu_cp: f64) -> f64 {
    1488.0 * rho * velocity.abs() * diameter / mu_cp
}

/// ρv²/2 expressed in psi (ρ lbm/ft³, v ft/s).
pub fn velocity_head_psi(rho: f64, velocity: f64) -> f64 {
    rho * velocity * velocity / (2.0 * G_C * SQ_IN_PER_SQ_FT)
}
