//! jl-components: well and pump element models for jetlift.
//!
//! Provides:
//! - Inflow performance (`InflowModel`) calibrated from one well test
//! - Wellbore pressure traverse along tubing or annulus (`traverse`)
//! - The named hydrostatic depth correction between perforations and pump
//! - Jet pump nozzle/throat/diffuser equations (`JetPump`)
//!
//! All models are deterministic functions of their inputs, suitable for
//! evaluating many pressure samples in parallel.
//!
//! # Example
//!
//! ```no_run
//! use jl_components::{InflowModel, ProductionTestPoint};
//! use jl_core::units::{deg_f, psi};
//!
//! let test = ProductionTestPoint::new(400.0, psi(1800.0), psi(2500.0), deg_f(200.0)).unwrap();
//! let ipr = InflowModel::calibrate(&test, psi(1500.0)).unwrap();
//! let q = ipr.evaluate(psi(1000.0)).unwrap();
//! println!("Rate at 1000 psi: {q:.0} STB/D");
//! ```

pub mod common;
pub mod error;
pub mod ipr;
pub mod jet_pump;
pub mod wellbore;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use ipr::{InflowModel, IprKind, ProductionTestPoint};
pub use jet_pump::{
    CavitationLimit, JetPump, JetPumpGeometry, PumpCoefficients, PumpStages, SuctionState,
};
pub use wellbore::{
    CirculationMode, ColumnFluid, ColumnState, FlowDirection, FlowPath, FlowSegment,
    PowerFluidColumn, ProducedColumn, ReturnColumn, TemperatureProfile, TraverseConfig,
    TraverseResult, WellConfiguration, hydrostatic_correction, pump_intake_pressure, traverse,
};
