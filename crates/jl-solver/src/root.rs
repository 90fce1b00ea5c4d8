//! Scalar root finding: bracket expansion plus Illinois regula falsi.

use crate::error::{SolverError, SolverResult};

/// Root finder configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootConfig {
    /// Maximum regula falsi iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the residual
    pub abs_tol: f64,
    /// Growth factor applied to the upper bound while bracketing
    pub expansion_factor: f64,
    /// Upper bound is never pushed past this
    pub max_upper: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1.0,
            expansion_factor: 2.0,
            max_upper: 2.0e5,
        }
    }
}

/// Interval with a sign change in the residual.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    pub lo: f64,
    pub hi: f64,
    pub f_lo: f64,
    pub f_hi: f64,
}

/// Root search result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootResult {
    /// Best abscissa found
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Grow `hi` until `f` crosses from negative to non-negative.
///
/// The lower end follows the most recent negative sample, so a residual
/// that starts positive, dips negative and rises again is bracketed
/// around its rising crossing.
pub fn expand_bracket<F>(f: &mut F, lo: f64, hi: f64, config: &RootConfig) -> SolverResult<Bracket>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    if !(lo.is_finite() && hi.is_finite() && hi > lo) {
        return Err(SolverError::Numeric {
            what: format!("invalid initial bracket [{lo}, {hi}]"),
        });
    }
    if config.expansion_factor <= 1.0 {
        return Err(SolverError::Numeric {
            what: "bracket expansion factor must exceed 1".into(),
        });
    }

    let (mut a, mut f_a) = (lo, f(lo)?);
    let mut b = hi.min(config.max_upper);
    let mut f_b = f(b)?;

    loop {
        if f_a < 0.0 && f_b >= 0.0 {
            return Ok(Bracket {
                lo: a,
                hi: b,
                f_lo: f_a,
                f_hi: f_b,
            });
        }
        if b >= config.max_upper {
            return Err(SolverError::NoBracket {
                what: "residual".into(),
                lo,
                hi: b,
            });
        }
        if f_b < 0.0 {
            a = b;
            f_a = f_b;
        }
        b = (b * config.expansion_factor).min(config.max_upper);
        f_b = f(b)?;
    }
}

/// Illinois-modified regula falsi inside a sign-change bracket.
///
/// Returns the best point seen with `converged == false` when the
/// iteration budget runs out.
pub fn illinois<F>(f: &mut F, bracket: Bracket, config: &RootConfig) -> SolverResult<RootResult>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    let Bracket {
        mut lo,
        mut hi,
        mut f_lo,
        mut f_hi,
    } = bracket;

    let mut best = if f_lo.abs() < f_hi.abs() {
        (lo, f_lo)
    } else {
        (hi, f_hi)
    };
    if best.1.abs() < config.abs_tol {
        return Ok(RootResult {
            x: best.0,
            residual: best.1,
            iterations: 0,
            converged: true,
        });
    }

    // +1 when the last update moved hi, -1 when it moved lo
    let mut side = 0i8;

    for iter in 1..=config.max_iterations {
        let denom = f_hi - f_lo;
        let x = if denom.abs() > f64::EPSILON {
            hi - f_hi * (hi - lo) / denom
        } else {
            0.5 * (lo + hi)
        };
        let fx = f(x)?;
        if !fx.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("non-finite residual at {x}"),
            });
        }

        if fx.abs() < best.1.abs() {
            best = (x, fx);
        }
        if fx.abs() < config.abs_tol {
            return Ok(RootResult {
                x,
                residual: fx,
                iterations: iter,
                converged: true,
            });
        }

        if (fx > 0.0) == (f_hi > 0.0) {
            hi = x;
            f_hi = fx;
            if side == 1 {
                f_lo *= 0.5;
            }
            side = 1;
        } else {
            lo = x;
            f_lo = fx;
            if side == -1 {
                f_hi *= 0.5;
            }
            side = -1;
        }
    }

    Ok(RootResult {
        x: best.0,
        residual: best.1,
        iterations: config.max_iterations,
        converged: false,
    })
}

/// Bracket then solve.
pub fn find_root<F>(mut f: F, lo: f64, hi: f64, config: &RootConfig) -> SolverResult<RootResult>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    let bracket = expand_bracket(&mut f, lo, hi, config)?;
    illinois(&mut f, bracket, config)
}
