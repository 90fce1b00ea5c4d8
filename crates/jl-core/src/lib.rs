//! jl-core: stable foundation for jetlift.
//!
//! Contains:
//! - units (uom quantities + oilfield constructors and constants)
//! - numeric (Real + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{JlError, JlResult};
pub use numeric::*;
pub use units::*;
