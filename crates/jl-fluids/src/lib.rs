//! jl-fluids: black-oil fluid properties for jetlift.
//!
//! Provides:
//! - Static produced/power fluid descriptions (`FluidProperties`, `PowerFluid`)
//! - Published PVT correlations as free functions with validity ranges
//! - `PvtModel` trait isolating the rest of jetlift from correlation choices
//! - `BlackOilModel`, the default implementation
//!
//! # Architecture
//!
//! Everything downstream (wellbore traverse, jet pump) asks a `PvtModel` for a
//! `MixtureProperties` pack at a local pressure and temperature. Which
//! correlations back the pack is chosen once through a `CorrelationSet`.
//!
//! # Example
//!
//! ```no_run
//! use jl_core::units::{deg_f, psi, cp, field};
//! use jl_fluids::{BlackOilModel, CorrelationSet, FluidProperties, PowerFluid, PvtModel};
//!
//! let fluids = FluidProperties::new(
//!     30.0,
//!     psi(1500.0),
//!     0.7,
//!     1.05,
//!     0.5,
//!     300.0,
//!     PowerFluid::power_oil(30.0, cp(1.0)),
//! )
//! .unwrap();
//! let model = BlackOilModel::new(fluids, CorrelationSet::default());
//! let mix = model.mixture(psi(1000.0), deg_f(180.0)).unwrap();
//! println!("Mixture density: {} lbm/ft³", field::lbm_per_ft3(mix.density));
//! ```

pub mod black_oil;
pub mod correlations;
pub mod error;
pub mod model;
pub mod properties;

// Re-exports for ergonomics
pub use black_oil::{BlackOilModel, CorrelationSet, OilFvfCorrelation, SolutionGasCorrelation};
pub use correlations::ValidityRange;
pub use error::{FluidError, FluidResult};
pub use model::{MixtureProperties, PvtModel};
pub use properties::{FluidProperties, PowerFluid};
