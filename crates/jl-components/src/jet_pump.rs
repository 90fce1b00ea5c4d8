//! Hydraulic jet pump: nozzle, throat (mixing tube) and diffuser.
//!
//! A one-dimensional momentum model in oilfield units. Power fluid
//! accelerates through the nozzle into the throat, entrains the produced
//! stream through the annular suction gap, exchanges momentum with it
//! across the throat, and recovers pressure in the diffuser.
//!
//! Kernel arithmetic is in ft³/s, ft², lbm/ft³ and psi; rates at the public
//! boundary are bbl/d.

use crate::common::{EPSILON_RATE, check_finite, velocity_head_psi};
use crate::error::{ComponentError, ComponentResult};
use jl_core::units::constants::{
    G_C, HYDRAULIC_HP_PER_BPD_PSI, SQ_IN_PER_SQ_FT, bpd_to_ft3_per_s, ft3_per_s_to_bpd,
};
use jl_core::units::{Area, Density, Pressure, field, psi};

/// Nozzle and throat flow areas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JetPumpGeometry {
    nozzle_area: Area,
    throat_area: Area,
}

impl JetPumpGeometry {
    pub fn new(nozzle_area: Area, throat_area: Area) -> ComponentResult<Self> {
        let aj = field::sq_in(nozzle_area);
        let at = field::sq_in(throat_area);
        if !(aj.is_finite() && aj > 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "nozzle area must be positive",
            });
        }
        if !(at.is_finite() && at > aj) {
            return Err(ComponentError::InvalidInput {
                what: "throat area must exceed nozzle area",
            });
        }
        Ok(Self {
            nozzle_area,
            throat_area,
        })
    }

    pub fn nozzle_area(&self) -> Area {
        self.nozzle_area
    }

    pub fn throat_area(&self) -> Area {
        self.throat_area
    }

    /// R = Aj / At
    pub fn area_ratio(&self) -> f64 {
        field::sq_in(self.nozzle_area) / field::sq_in(self.throat_area)
    }

    /// Annular suction entry area As = At - Aj.
    pub fn suction_area(&self) -> Area {
        self.throat_area - self.nozzle_area
    }
}

/// Loss coefficients of the pump sections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PumpCoefficients {
    /// Nozzle velocity coefficient Cn; nozzle loss is 1/Cn² - 1
    pub nozzle_velocity: f64,
    /// Suction entry loss Ks
    pub suction_loss: f64,
    /// Throat friction loss Kth
    pub throat_loss: f64,
    /// Diffuser recovery Cd
    pub diffuser_recovery: f64,
}

impl Default for PumpCoefficients {
    fn default() -> Self {
        Self {
            nozzle_velocity: 0.95,
            suction_loss: 0.0,
            throat_loss: 0.10,
            diffuser_recovery: 0.85,
        }
    }
}

impl PumpCoefficients {
    pub fn validate(&self) -> ComponentResult<()> {
        if !(self.nozzle_velocity > 0.0 && self.nozzle_velocity <= 1.0) {
            return Err(ComponentError::InvalidInput {
                what: "nozzle velocity coefficient must lie in (0, 1]",
            });
        }
        if !(self.suction_loss >= 0.0 && self.suction_loss.is_finite()) {
            return Err(ComponentError::InvalidInput {
                what: "suction loss coefficient must be non-negative",
            });
        }
        if !(self.throat_loss >= 0.0 && self.throat_loss.is_finite()) {
            return Err(ComponentError::InvalidInput {
                what: "throat loss coefficient must be non-negative",
            });
        }
        if !(self.diffuser_recovery > 0.0 && self.diffuser_recovery <= 1.0) {
            return Err(ComponentError::InvalidInput {
                what: "diffuser recovery must lie in (0, 1]",
            });
        }
        Ok(())
    }
}

/// Produced stream arriving at the pump intake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuctionState {
    pub pressure: Pressure,
    pub density: Density,
    /// In-situ rate at intake conditions, bbl/d
    pub rate_bpd: f64,
}

/// Pressures through the pump for one power-fluid rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PumpStages {
    pub throat_inlet: Pressure,
    /// Nozzle inlet pressure needed to drive the jet
    pub nozzle: Pressure,
    pub throat_exit: Pressure,
    pub discharge: Pressure,
}

/// Suction-side cavitation limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CavitationLimit {
    /// Suction area needed to pass the current rate at the limiting velocity, in²
    pub area_sq_in: f64,
    /// Largest in-situ suction rate before cavitation, bbl/d
    pub max_rate_bpd: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JetPump {
    pub geometry: JetPumpGeometry,
    pub coefficients: PumpCoefficients,
}

impl JetPump {
    pub fn new(geometry: JetPumpGeometry, coefficients: PumpCoefficients) -> ComponentResult<Self> {
        coefficients.validate()?;
        Ok(Self {
            geometry,
            coefficients,
        })
    }

    fn suction_velocity(&self, suction: &SuctionState) -> f64 {
        bpd_to_ft3_per_s(suction.rate_bpd) / field::sq_ft(self.geometry.suction_area())
    }

    /// Static pressure where the produced stream enters the throat.
    pub fn throat_inlet_pressure(&self, suction: &SuctionState) -> ComponentResult<Pressure> {
        let ps = field::psi(suction.pressure);
        let rho_s = field::lbm_per_ft3(suction.density);
        let vs = self.suction_velocity(suction);
        let p = ps - (1.0 + self.coefficients.suction_loss) * velocity_head_psi(rho_s, vs);
        check_finite(p, "throat inlet pressure")?;
        Ok(psi(p))
    }

    /// Pressures through nozzle, throat and diffuser at `injection_rate_bpd`
    /// of power fluid with density `power_density`.
    pub fn evaluate(
        &self,
        injection_rate_bpd: f64,
        power_density: Density,
        suction: &SuctionState,
    ) -> ComponentResult<PumpStages> {
        if !(injection_rate_bpd.is_finite() && injection_rate_bpd >= 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "injection rate must be non-negative",
            });
        }
        if !(suction.rate_bpd.is_finite() && suction.rate_bpd >= 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "suction rate must be non-negative",
            });
        }

        let c = &self.coefficients;
        let aj = field::sq_ft(self.geometry.nozzle_area());
        let at = field::sq_ft(self.geometry.throat_area());
        let rho_n = field::lbm_per_ft3(power_density);
        let rho_s = field::lbm_per_ft3(suction.density);

        let qn = bpd_to_ft3_per_s(injection_rate_bpd);
        let qs = bpd_to_ft3_per_s(suction.rate_bpd);
        let vj = qn / aj;
        let vs = self.suction_velocity(suction);

        let p_ti = field::psi(self.throat_inlet_pressure(suction)?);
        let p_n = p_ti + velocity_head_psi(rho_n, vj) / (c.nozzle_velocity * c.nozzle_velocity);

        let q_t = qn + qs;
        let (p_te, p_d) = if q_t < EPSILON_RATE {
            (p_ti, p_ti)
        } else {
            let m_dot = rho_n * qn + rho_s * qs;
            let rho_m = m_dot / q_t;
            let vt = q_t / at;
            let momentum = (rho_n * qn * vj + rho_s * qs * vs - m_dot * vt) / (G_C * at);
            let p_te =
                p_ti + momentum / SQ_IN_PER_SQ_FT - c.throat_loss * velocity_head_psi(rho_m, vt);
            let p_d = p_te + c.diffuser_recovery * velocity_head_psi(rho_m, vt);
            (p_te, p_d)
        };

        check_finite(p_n, "nozzle pressure")?;
        check_finite(p_d, "discharge pressure")?;

        Ok(PumpStages {
            throat_inlet: psi(p_ti),
            nozzle: psi(p_n),
            throat_exit: psi(p_te),
            discharge: psi(p_d),
        })
    }

    /// Nozzle inlet pressure needed to push `injection_rate_bpd` through the jet.
    pub fn required_nozzle_pressure(
        &self,
        injection_rate_bpd: f64,
        power_density: Density,
        suction: &SuctionState,
    ) -> ComponentResult<Pressure> {
        Ok(self.evaluate(injection_rate_bpd, power_density, suction)?.nozzle)
    }

    /// Cavitation limit for the suction stream against `vapor_pressure`.
    ///
    /// The limiting suction velocity drops the throat-inlet static pressure
    /// to vapor pressure. When intake pressure is already at or below vapor
    /// pressure the limit is zero flow and the required area is infinite.
    pub fn cavitation(&self, suction: &SuctionState, vapor_pressure: Pressure) -> CavitationLimit {
        let head = field::psi(suction.pressure) - field::psi(vapor_pressure);
        let rho_s = field::lbm_per_ft3(suction.density);
        let v_max = if head > 0.0 && rho_s > 0.0 {
            (2.0 * G_C * SQ_IN_PER_SQ_FT * head / ((1.0 + self.coefficients.suction_loss) * rho_s))
                .sqrt()
        } else {
            0.0
        };

        let qs = bpd_to_ft3_per_s(suction.rate_bpd);
        let area_sq_in = if v_max > 0.0 {
            qs / v_max * SQ_IN_PER_SQ_FT
        } else {
            f64::INFINITY
        };
        let max_rate_bpd = ft3_per_s_to_bpd(field::sq_ft(self.geometry.suction_area()) * v_max);

        CavitationLimit {
            area_sq_in,
            max_rate_bpd,
        }
    }
}

/// Hydraulic horsepower spent across the nozzle.
pub fn hydraulic_horsepower(injection_rate_bpd: f64, nozzle_drop: Pressure) -> f64 {
    HYDRAULIC_HP_PER_BPD_PSI * injection_rate_bpd * field::psi(nozzle_drop)
}

/// Energy lifted into the produced stream over energy given up by the
/// power fluid: q_prod (Pd - Ps) / (q_inj (Pn - Pd)).
pub fn pump_efficiency(
    production_rate: f64,
    suction: Pressure,
    discharge: Pressure,
    injection_rate: f64,
    nozzle: Pressure,
) -> f64 {
    let gained = production_rate * field::psi(discharge - suction);
    let spent = injection_rate * field::psi(nozzle - discharge);
    gained / spent
}

#[cfg(test)]
mod tests {
    use super::*;
    use jl_core::units::{lbm_per_ft3, sq_in};

    fn pump(aj: f64) -> JetPump {
        let geometry = JetPumpGeometry::new(sq_in(aj), sq_in(0.0995)).unwrap();
        JetPump::new(geometry, PumpCoefficients::default()).unwrap()
    }

    fn suction() -> SuctionState {
        SuctionState {
            pressure: psi(1500.0),
            density: lbm_per_ft3(50.0),
            rate_bpd: 800.0,
        }
    }

    fn power_oil() -> Density {
        lbm_per_ft3(62.4 * 0.876)
    }

    #[test]
    fn geometry_validation() {
        assert!(JetPumpGeometry::new(sq_in(0.0), sq_in(0.1)).is_err());
        assert!(JetPumpGeometry::new(sq_in(0.1), sq_in(0.1)).is_err());
        let g = JetPumpGeometry::new(sq_in(0.038), sq_in(0.0995)).unwrap();
        assert!((g.area_ratio() - 0.038 / 0.0995).abs() < 1e-12);
        assert!((field::sq_in(g.suction_area()) - 0.0615).abs() < 1e-9);
    }

    #[test]
    fn coefficient_validation() {
        let bad = PumpCoefficients {
            nozzle_velocity: 1.2,
            ..PumpCoefficients::default()
        };
        assert!(bad.validate().is_err());
        let bad = PumpCoefficients {
            throat_loss: -0.1,
            ..PumpCoefficients::default()
        };
        assert!(bad.validate().is_err());
        assert!(PumpCoefficients::default().validate().is_ok());
    }

    #[test]
    fn stagnant_suction_has_no_entry_loss() {
        let s = SuctionState {
            rate_bpd: 0.0,
            ..suction()
        };
        let p = pump(0.038).throat_inlet_pressure(&s).unwrap();
        assert!((field::psi(p) - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn nominal_stage_pressures() {
        let st = pump(0.038).evaluate(3000.0, power_oil(), &suction()).unwrap();
        assert!((field::psi(st.throat_inlet) - 1420.047).abs() < 0.01);
        assert!((field::psi(st.nozzle) - 4987.45).abs() < 0.1);
        assert!((field::psi(st.throat_exit) - 2424.26).abs() < 0.1);
        assert!((field::psi(st.discharge) - 3053.18).abs() < 0.1);
    }

    #[test]
    fn discharge_rises_with_injection_rate() {
        let p = pump(0.038);
        let mut last = f64::NEG_INFINITY;
        for q in [500.0, 1000.0, 2000.0, 3000.0, 4000.0, 6000.0] {
            let pd = field::psi(p.evaluate(q, power_oil(), &suction()).unwrap().discharge);
            assert!(pd > last);
            last = pd;
        }
    }

    #[test]
    fn larger_nozzle_needs_less_nozzle_pressure() {
        let mut last = f64::INFINITY;
        for aj in [0.02, 0.03, 0.038, 0.05, 0.07] {
            let pn = field::psi(pump(aj).evaluate(3000.0, power_oil(), &suction()).unwrap().nozzle);
            assert!(pn < last, "aj {aj}: {pn} !< {last}");
            last = pn;
        }
    }

    #[test]
    fn rejects_negative_injection() {
        assert!(pump(0.038).evaluate(-1.0, power_oil(), &suction()).is_err());
    }

    #[test]
    fn cavitation_limit_values() {
        let limit = pump(0.038).cavitation(&suction(), psi(10.0));
        assert!((limit.max_rate_bpd - 3453.55).abs() < 0.1);
        assert!((limit.area_sq_in - 0.014246).abs() < 1e-5);
    }

    #[test]
    fn cavitation_limit_closes_at_vapor_pressure() {
        let p = pump(0.038);
        let mut last = f64::INFINITY;
        for ps in [1500.0, 500.0, 100.0, 20.0, 10.5] {
            let s = SuctionState {
                pressure: psi(ps),
                ..suction()
            };
            let q = p.cavitation(&s, psi(10.0)).max_rate_bpd;
            assert!(q < last);
            last = q;
        }
        let s = SuctionState {
            pressure: psi(9.0),
            ..suction()
        };
        let at_vapor = p.cavitation(&s, psi(10.0));
        assert_eq!(at_vapor.max_rate_bpd, 0.0);
        assert!(at_vapor.area_sq_in.is_infinite());
    }

    #[test]
    fn horsepower_and_efficiency() {
        let hp = hydraulic_horsepower(3000.0, psi(3000.0));
        assert!((hp - 153.126).abs() < 1e-3);
        let eff = pump_efficiency(800.0, psi(1500.0), psi(3000.0), 3000.0, psi(5000.0));
        assert!((eff - 0.2).abs() < 1e-9);
    }
}
