//! Inflow performance relationship (IPR) calibrated from a single well test.
//!
//! A test taken above the bubble point calibrates a straight-line
//! productivity index; a test below it calibrates Vogel's dissolved-gas
//! drive curve. Rates are stock-tank barrels of total liquid per day.

use crate::error::{ComponentError, ComponentResult};
use jl_core::units::{Pressure, Temperature, field, psi};

/// One stabilized production test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProductionTestPoint {
    /// Measured liquid rate, STB/D
    pub rate: f64,
    /// Flowing bottom-hole pressure during the test
    pub flowing_pressure: Pressure,
    /// Static reservoir pressure
    pub reservoir_pressure: Pressure,
    pub reservoir_temperature: Temperature,
}

impl ProductionTestPoint {
    pub fn new(
        rate: f64,
        flowing_pressure: Pressure,
        reservoir_pressure: Pressure,
        reservoir_temperature: Temperature,
    ) -> ComponentResult<Self> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "test rate must be positive",
            });
        }
        let pwf = field::psi(flowing_pressure);
        let pr = field::psi(reservoir_pressure);
        if !(pr.is_finite() && pr > 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "reservoir pressure must be positive",
            });
        }
        if !(pwf.is_finite() && pwf >= 0.0 && pwf < pr) {
            return Err(ComponentError::InvalidInput {
                what: "test flowing pressure must lie in [0, reservoir pressure)",
            });
        }
        Ok(Self {
            rate,
            flowing_pressure,
            reservoir_pressure,
            reservoir_temperature,
        })
    }
}

/// Which inflow curve was calibrated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IprKind {
    /// Constant productivity index
    Linear,
    /// Vogel (1968) dissolved-gas drive
    Vogel,
}

/// Calibrated inflow curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InflowModel {
    kind: IprKind,
    reservoir_pressure: f64,
    q_max: f64,
}

impl InflowModel {
    /// Calibrate from a test point. Linear if the test was flowing at or
    /// above the bubble point, Vogel otherwise.
    pub fn calibrate(test: &ProductionTestPoint, bubble_point: Pressure) -> ComponentResult<Self> {
        let pr = field::psi(test.reservoir_pressure);
        let pwf = field::psi(test.flowing_pressure);
        let pb = field::psi(bubble_point);
        if !(pb.is_finite() && pb >= 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "bubble point must be non-negative",
            });
        }
        if !(test.rate > 0.0 && pwf < pr) {
            return Err(ComponentError::InvalidInput {
                what: "test point must have positive drawdown and rate",
            });
        }

        let (kind, q_max) = if pwf >= pb {
            let pi = test.rate / (pr - pwf);
            (IprKind::Linear, pi * pr)
        } else {
            let x = pwf / pr;
            (IprKind::Vogel, test.rate / vogel_fraction(x))
        };

        if !(q_max.is_finite() && q_max > 0.0) {
            return Err(ComponentError::NonPhysical {
                what: "calibrated open-flow potential",
            });
        }

        Ok(Self {
            kind,
            reservoir_pressure: pr,
            q_max,
        })
    }

    pub fn kind(&self) -> IprKind {
        self.kind
    }

    /// Absolute open flow potential, rate at zero flowing pressure (STB/D).
    pub fn q_max(&self) -> f64 {
        self.q_max
    }

    pub fn reservoir_pressure(&self) -> Pressure {
        psi(self.reservoir_pressure)
    }

    /// Productivity index in STB/D/psi, defined only for the linear curve.
    pub fn productivity_index(&self) -> Option<f64> {
        match self.kind {
            IprKind::Linear => Some(self.q_max / self.reservoir_pressure),
            IprKind::Vogel => None,
        }
    }

    /// Liquid rate (STB/D) at flowing pressure `pwf`.
    ///
    /// Zero above reservoir pressure. Negative or non-finite pressure is
    /// rejected.
    pub fn evaluate(&self, pwf: Pressure) -> ComponentResult<f64> {
        self.rate_at_psi(field::psi(pwf))
    }

    pub(crate) fn rate_at_psi(&self, pwf: f64) -> ComponentResult<f64> {
        if !pwf.is_finite() || pwf < 0.0 {
            return Err(ComponentError::InvalidInput {
                what: "flowing pressure must be finite and non-negative",
            });
        }
        if pwf >= self.reservoir_pressure {
            return Ok(0.0);
        }
        let x = pwf / self.reservoir_pressure;
        let q = match self.kind {
            IprKind::Linear => self.q_max * (1.0 - x),
            IprKind::Vogel => self.q_max * vogel_fraction(x),
        };
        Ok(q.max(0.0))
    }

    /// Inverse of [`evaluate`](Self::evaluate): flowing pressure that
    /// delivers `rate` STB/D.
    pub fn pwf_for_rate(&self, rate: f64) -> ComponentResult<Pressure> {
        if !(rate.is_finite() && rate >= 0.0 && rate <= self.q_max) {
            return Err(ComponentError::InvalidInput {
                what: "rate must lie in [0, q_max]",
            });
        }
        let r = rate / self.q_max;
        let x = match self.kind {
            IprKind::Linear => 1.0 - r,
            // 0.8x² + 0.2x - (1 - r) = 0, positive root
            IprKind::Vogel => (-0.2 + (0.04 + 3.2 * (1.0 - r)).sqrt()) / 1.6,
        };
        Ok(psi((x * self.reservoir_pressure).clamp(0.0, self.reservoir_pressure)))
    }
}

fn vogel_fraction(x: f64) -> f64 {
    1.0 - 0.2 * x - 0.8 * x * x
}


#[cfg(test)]
mod proptests {
    use super::*;
    use jl_core::units::deg_f;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rate_never_increases_with_pressure(
            pwf_test in 100.0f64..2400.0,
            bubble in 0.0f64..3000.0,
            a in 0.0f64..2500.0,
            b in 0.0f64..2500.0,
        ) {
            let test =
                ProductionTestPoint::new(400.0, psi(pwf_test), psi(2500.0), deg_f(200.0)).unwrap();
            let ipr = InflowModel::calibrate(&test, psi(bubble)).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let q_lo = ipr.evaluate(psi(lo)).unwrap();
            let q_hi = ipr.evaluate(psi(hi)).unwrap();
            prop_assert!(q_lo >= q_hi - 1e-9);
            prop_assert!(q_hi >= 0.0);
            prop_assert!(q_lo <= ipr.q_max() + 1e-9);
        }
    }
}
