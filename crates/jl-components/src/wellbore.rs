//! Wellbore geometry and vertical pressure traverse.
//!
//! Depths are measured downward from the wellhead (true vertical depth).
//! The traverse marches in fixed depth increments, evaluating the
//! hydrostatic plus friction gradient at the mid-point of each increment
//! and iterating until the mid-point pressure stops moving.

use crate::common::{EPSILON_RATE, check_finite, friction_factor, reynolds_number};
use crate::error::{ComponentError, ComponentResult};
use jl_core::units::constants::{
    G_C, PSI_PER_FT_FRESH_WATER, SQ_IN_PER_SQ_FT, WATER_DENSITY_LBM_FT3, bpd_to_ft3_per_s,
};
use jl_core::units::{Density, DynVisc, Length, Pressure, Temperature, cp, deg_f, field, ft};
use jl_core::units::{inch, lbm_per_ft3, psi};
use jl_fluids::{PowerFluid, PvtModel};
use std::f64::consts::PI;

/// Default absolute roughness of new steel tubing.
pub const DEFAULT_ROUGHNESS_IN: f64 = 0.0006;

/// Which conduit carries the power fluid down to the pump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CirculationMode {
    /// Power fluid down the tubing, mixed stream up the annulus.
    #[default]
    Standard,
    /// Power fluid down the annulus, mixed stream up the tubing.
    Reverse,
}

/// Direction of flow in a conduit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowDirection {
    Up,
    Down,
}

impl FlowDirection {
    /// Sign of the friction term in dP/d(depth).
    ///
    /// Friction opposes flow, so pressure rises with depth faster than
    /// hydrostatic when fluid flows upward.
    fn friction_sign(self) -> f64 {
        match self {
            FlowDirection::Up => 1.0,
            FlowDirection::Down => -1.0,
        }
    }
}

/// Tubular geometry of the well.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WellConfiguration {
    pub perforation_depth: Length,
    pub pump_depth: Length,
    pub tubing_od: Length,
    pub tubing_id: Length,
    pub casing_id: Length,
    /// Absolute wall roughness, shared by tubing and casing
    pub roughness: Length,
}

impl WellConfiguration {
    pub fn new(
        perforation_depth: Length,
        pump_depth: Length,
        tubing_od: Length,
        tubing_id: Length,
        casing_id: Length,
    ) -> ComponentResult<Self> {
        for (value, what) in [
            (field::ft(perforation_depth), "perforation depth must be positive"),
            (field::ft(pump_depth), "pump depth must be positive"),
            (field::inch(tubing_od), "tubing OD must be positive"),
            (field::inch(tubing_id), "tubing ID must be positive"),
            (field::inch(casing_id), "casing ID must be positive"),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ComponentError::InvalidInput { what });
            }
        }
        if tubing_id >= tubing_od {
            return Err(ComponentError::InvalidInput {
                what: "tubing ID must be smaller than tubing OD",
            });
        }
        if tubing_od >= casing_id {
            return Err(ComponentError::InvalidInput {
                what: "tubing OD must be smaller than casing ID",
            });
        }
        Ok(Self {
            perforation_depth,
            pump_depth,
            tubing_od,
            tubing_id,
            casing_id,
            roughness: inch(DEFAULT_ROUGHNESS_IN),
        })
    }

    pub fn with_roughness(mut self, roughness: Length) -> ComponentResult<Self> {
        let r = field::inch(roughness);
        if !(r.is_finite() && r >= 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "roughness must be non-negative",
            });
        }
        self.roughness = roughness;
        Ok(self)
    }

    /// True when the pump sits below the top of the producing interval.
    /// The hydrostatic correction then raises the suction pressure above pwf.
    pub fn pump_below_perforations(&self) -> bool {
        self.pump_depth > self.perforation_depth
    }

    pub fn tubing(&self) -> FlowPath {
        FlowPath::Tubing {
            inner_diameter: self.tubing_id,
            roughness: self.roughness,
        }
    }

    pub fn annulus(&self) -> FlowPath {
        FlowPath::Annulus {
            casing_id: self.casing_id,
            tubing_od: self.tubing_od,
            roughness: self.roughness,
        }
    }

    /// Conduit carrying power fluid down to the pump.
    pub fn injection_path(&self, mode: CirculationMode) -> FlowPath {
        match mode {
            CirculationMode::Standard => self.tubing(),
            CirculationMode::Reverse => self.annulus(),
        }
    }

    /// Conduit carrying the mixed stream back to surface.
    pub fn return_path(&self, mode: CirculationMode) -> FlowPath {
        match mode {
            CirculationMode::Standard => self.annulus(),
            CirculationMode::Reverse => self.tubing(),
        }
    }
}

/// Flow conduit cross-section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlowPath {
    Tubing {
        inner_diameter: Length,
        roughness: Length,
    },
    Annulus {
        casing_id: Length,
        tubing_od: Length,
        roughness: Length,
    },
}

impl FlowPath {
    /// Flow area in ft².
    pub fn flow_area_sq_ft(&self) -> f64 {
        match *self {
            FlowPath::Tubing { inner_diameter, .. } => {
                let d = field::ft(inner_diameter);
                PI / 4.0 * d * d
            }
            FlowPath::Annulus {
                casing_id,
                tubing_od,
                ..
            } => {
                let dc = field::ft(casing_id);
                let dt = field::ft(tubing_od);
                PI / 4.0 * (dc * dc - dt * dt)
            }
        }
    }

    /// Hydraulic diameter in ft. For the annulus this is Dcsg - Dod.
    pub fn hydraulic_diameter_ft(&self) -> f64 {
        match *self {
            FlowPath::Tubing { inner_diameter, .. } => field::ft(inner_diameter),
            FlowPath::Annulus {
                casing_id,
                tubing_od,
                ..
            } => field::ft(casing_id) - field::ft(tubing_od),
        }
    }

    pub fn relative_roughness(&self) -> f64 {
        let roughness = match *self {
            FlowPath::Tubing { roughness, .. } | FlowPath::Annulus { roughness, .. } => roughness,
        };
        field::ft(roughness) / self.hydraulic_diameter_ft()
    }
}

/// Linear geothermal profile between wellhead and a reference depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureProfile {
    surface: Temperature,
    bottom: Temperature,
    bottom_depth: Length,
}

impl TemperatureProfile {
    pub fn linear(
        surface: Temperature,
        bottom: Temperature,
        bottom_depth: Length,
    ) -> ComponentResult<Self> {
        let d = field::ft(bottom_depth);
        if !(d.is_finite() && d > 0.0) {
            return Err(ComponentError::InvalidInput {
                what: "temperature reference depth must be positive",
            });
        }
        check_finite(field::deg_f(surface), "wellhead temperature")?;
        check_finite(field::deg_f(bottom), "bottom-hole temperature")?;
        Ok(Self {
            surface,
            bottom,
            bottom_depth,
        })
    }

    /// Temperature at `depth`, extrapolated linearly past the reference depth.
    pub fn at(&self, depth: Length) -> Temperature {
        let ts = field::deg_f(self.surface);
        let tb = field::deg_f(self.bottom);
        let frac = field::ft(depth) / field::ft(self.bottom_depth);
        deg_f(ts + (tb - ts) * frac)
    }
}

/// Local state of the fluid in a conduit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnState {
    pub density: Density,
    pub viscosity: DynVisc,
    /// In-situ volumetric rate, ft³/s
    pub rate_ft3_s: f64,
    pub extrapolated: bool,
}

/// Fluid filling a conduit during a traverse.
pub trait ColumnFluid: Send + Sync {
    fn name(&self) -> &str;

    /// Density, viscosity and in-situ rate at local pressure and temperature.
    fn state(&self, p: Pressure, t: Temperature) -> ComponentResult<ColumnState>;
}

/// Incompressible power fluid at a fixed surface rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerFluidColumn {
    pub fluid: PowerFluid,
    /// bbl/d
    pub rate_bpd: f64,
}

impl ColumnFluid for PowerFluidColumn {
    fn name(&self) -> &str {
        "power fluid"
    }

    fn state(&self, _p: Pressure, _t: Temperature) -> ComponentResult<ColumnState> {
        Ok(ColumnState {
            density: lbm_per_ft3(WATER_DENSITY_LBM_FT3 * self.fluid.specific_gravity),
            viscosity: self.fluid.viscosity,
            rate_ft3_s: bpd_to_ft3_per_s(self.rate_bpd),
            extrapolated: false,
        })
    }
}

/// Produced reservoir stream at a fixed stock-tank rate.
#[derive(Clone, Copy)]
pub struct ProducedColumn<'a> {
    pub model: &'a dyn PvtModel,
    /// STB/D of total liquid
    pub rate_stbd: f64,
}

impl ColumnFluid for ProducedColumn<'_> {
    fn name(&self) -> &str {
        "produced fluid"
    }

    fn state(&self, p: Pressure, t: Temperature) -> ComponentResult<ColumnState> {
        let mix = self.model.mixture(p, t)?;
        Ok(ColumnState {
            density: mix.density,
            viscosity: mix.viscosity,
            rate_ft3_s: bpd_to_ft3_per_s(self.rate_stbd * mix.volume_factor),
            extrapolated: mix.extrapolated,
        })
    }
}

/// Produced stream and spent power fluid flowing back together.
///
/// Density and viscosity are blended by in-situ volume.
#[derive(Clone, Copy)]
pub struct ReturnColumn<'a> {
    pub produced: ProducedColumn<'a>,
    pub power: PowerFluidColumn,
}

impl ColumnFluid for ReturnColumn<'_> {
    fn name(&self) -> &str {
        "return stream"
    }

    fn state(&self, p: Pressure, t: Temperature) -> ComponentResult<ColumnState> {
        let prod = self.produced.state(p, t)?;
        let power = self.power.state(p, t)?;
        let q = prod.rate_ft3_s + power.rate_ft3_s;
        if q < EPSILON_RATE {
            return Ok(prod);
        }
        let wp = prod.rate_ft3_s / q;
        let wn = power.rate_ft3_s / q;
        let rho = field::lbm_per_ft3(prod.density) * wp + field::lbm_per_ft3(power.density) * wn;
        let mu = field::cp(prod.viscosity) * wp + field::cp(power.viscosity) * wn;
        Ok(ColumnState {
            density: lbm_per_ft3(rho),
            viscosity: cp(mu),
            rate_ft3_s: q,
            extrapolated: prod.extrapolated,
        })
    }
}

/// One conduit with the fluid moving through it.
#[derive(Clone, Copy)]
pub struct FlowSegment<'a> {
    pub path: FlowPath,
    pub fluid: &'a dyn ColumnFluid,
    pub direction: FlowDirection,
    pub temperature: &'a TemperatureProfile,
}

impl FlowSegment<'_> {
    /// dP/d(depth) in psi/ft at local conditions, plus the extrapolation flag.
    pub fn gradient_psi_per_ft(&self, p: f64, t: Temperature) -> ComponentResult<(f64, bool)> {
        let state = self.fluid.state(psi(p), t)?;
        let rho = field::lbm_per_ft3(state.density);
        let hydrostatic = rho / SQ_IN_PER_SQ_FT;

        let friction = if state.rate_ft3_s < EPSILON_RATE {
            0.0
        } else {
            let d = self.path.hydraulic_diameter_ft();
            let v = state.rate_ft3_s / self.path.flow_area_sq_ft();
            let re = reynolds_number(rho, v, d, field::cp(state.viscosity));
            check_finite(re, "Reynolds number")?;
            let f = friction_factor(re, self.path.relative_roughness());
            f * rho * v * v / (2.0 * G_C * d) / SQ_IN_PER_SQ_FT
        };

        let grad = hydrostatic + self.direction.friction_sign() * friction;
        check_finite(grad, "pressure gradient")?;
        Ok((grad, state.extrapolated))
    }
}

/// Marching controls for [`traverse`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraverseConfig {
    pub step: Length,
    /// Mid-point pressure agreement per increment, psi
    pub tolerance_psi: f64,
    pub max_iterations: usize,
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            step: ft(100.0),
            tolerance_psi: 0.01,
            max_iterations: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraverseResult {
    pub pressure: Pressure,
    pub steps: usize,
    /// Some increment used fluid properties outside their fitted range
    pub extrapolated: bool,
}

/// Integrate pressure from `from` to `to` starting at `start`.
///
/// Either direction of integration works; flow direction is a property of
/// the segment, not of the integration.
pub fn traverse(
    segment: &FlowSegment<'_>,
    from: Length,
    to: Length,
    start: Pressure,
    config: &TraverseConfig,
) -> ComponentResult<TraverseResult> {
    let d0 = field::ft(from);
    let d1 = field::ft(to);
    let mut p = field::psi(start);
    check_finite(d0, "traverse start depth")?;
    check_finite(d1, "traverse end depth")?;
    if !(p.is_finite() && p > 0.0) {
        return Err(ComponentError::InvalidInput {
            what: "traverse start pressure must be positive",
        });
    }
    let step = field::ft(config.step);
    if !(step.is_finite() && step > 0.0) {
        return Err(ComponentError::InvalidInput {
            what: "traverse step must be positive",
        });
    }

    let span = d1 - d0;
    if span == 0.0 {
        return Ok(TraverseResult {
            pressure: start,
            steps: 0,
            extrapolated: false,
        });
    }

    // Guard against unit round-trip noise adding a sliver step
    let steps = (span.abs() / step - 1e-9).ceil().max(1.0) as usize;
    let dz = span / steps as f64;
    let mut depth = d0;
    let mut extrapolated = false;

    for _ in 0..steps {
        let t_mid = segment.temperature.at(ft(depth + 0.5 * dz));
        let (mut grad, mut extrap) = segment.gradient_psi_per_ft(p, t_mid)?;
        let mut converged = false;

        for _ in 0..config.max_iterations {
            let p_mid = p + 0.5 * grad * dz;
            if p_mid <= 0.0 {
                return Err(ComponentError::NonPhysical {
                    what: "pressure fell to zero during traverse",
                });
            }
            let (g_new, x_new) = segment.gradient_psi_per_ft(p_mid, t_mid)?;
            let change = (g_new - grad).abs() * dz.abs();
            grad = g_new;
            extrap = x_new;
            if change < config.tolerance_psi {
                converged = true;
                break;
            }
        }

        if !converged {
            return Err(ComponentError::ConvergenceFailed {
                what: "traverse increment pressure",
                iterations: config.max_iterations,
            });
        }

        p += grad * dz;
        depth += dz;
        extrapolated |= extrap;
        if p <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "pressure fell to zero during traverse",
            });
        }
    }

    Ok(TraverseResult {
        pressure: psi(p),
        steps,
        extrapolated,
    })
}

/// Static head of a liquid column of specific gravity `sg` over `delta_depth`.
pub fn hydrostatic_correction(sg: f64, delta_depth: Length) -> Pressure {
    psi(PSI_PER_FT_FRESH_WATER * sg * field::ft(delta_depth))
}

/// Pump intake pressure from flowing bottom-hole pressure.
///
/// The interval between perforations and pump is treated as stock-tank oil
/// at rest.
pub fn pump_intake_pressure(pwf: Pressure, well: &WellConfiguration, oil_sg: f64) -> Pressure {
    pwf - hydrostatic_correction(oil_sg, well.perforation_depth - well.pump_depth)
}
