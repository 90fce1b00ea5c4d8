use crate::JlError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, JlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(JlError::NonFinite { what, value: v })
    }
}

/// Evenly spaced samples from `start` to `end`, both inclusive.
///
/// The last sample is pinned to `end` so accumulated rounding never
/// overshoots the requested range.
pub fn linspace(start: Real, end: Real, num_points: usize) -> Vec<Real> {
    match num_points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let delta = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * delta).collect();
            points[n - 1] = end;
            points
        }
    }
}
