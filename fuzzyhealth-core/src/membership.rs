//! Piecewise-linear membership functions
//!
//! Global invariants enforced:
//! - Every evaluation yields a degree in [0, 1]
//! - Outside-support checks run before ramp checks, so zero-width ramps
//!   (`a == b` or `c == d`) never divide by zero
//! - No error path: every real input produces a defined degree

use serde::{Deserialize, Serialize};

/// A membership shape with its breakpoints
///
/// Parameters are expected to be ordered (`a <= b <= c` for triangular,
/// `a <= b <= c <= d` for trapezoidal). The ordering is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MembershipFunction {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    pub const fn triangular(a: f64, b: f64, c: f64) -> Self {
        MembershipFunction::Triangular { a, b, c }
    }

    pub const fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Self {
        MembershipFunction::Trapezoidal { a, b, c, d }
    }

    /// Degree of membership of `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => triangular(x, a, b, c),
            MembershipFunction::Trapezoidal { a, b, c, d } => trapezoidal(x, a, b, c, d),
        }
    }

    /// Shape name as used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            MembershipFunction::Triangular { .. } => "triangular",
            MembershipFunction::Trapezoidal { .. } => "trapezoidal",
        }
    }
}

/// Triangular membership
///
/// Note: the `x <= a` check wins over `x == b`, so a shape with `a == b`
/// yields 0 at its own peak. This matches the observed behavior of the
/// configured catalog and is kept as-is. NaN is outside every support.
fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x.is_nan() || x <= a || x >= c {
        return 0.0;
    }
    if x == b {
        return 1.0;
    }
    if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Trapezoidal membership
///
/// Same boundary precedence as [`triangular`]: `Trapezoidal(70, 70, 90, 110)`
/// evaluates to 0 at exactly 70.
fn trapezoidal(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x.is_nan() || x <= a || x >= d {
        return 0.0;
    }
    if x >= b && x <= c {
        return 1.0;
    }
    if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

/// One sampled point of a membership curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub degree: f64,
}

/// Sample a membership curve over `[min, max]`
///
/// Returns `steps + 1` evenly spaced points including both ends. Each x is
/// computed from its index rather than by accumulation, so the last point
/// lands exactly on `max`. `steps == 0` yields the single point at `min`.
pub fn sample_curve(mf: &MembershipFunction, min: f64, max: f64, steps: usize) -> Vec<CurvePoint> {
    if steps == 0 {
        return vec![CurvePoint {
            x: min,
            degree: mf.evaluate(min),
        }];
    }

    let width = max - min;
    (0..=steps)
        .map(|i| {
            let x = if i == steps {
                max
            } else {
                min + width * (i as f64) / (steps as f64)
            };
            CurvePoint {
                x,
                degree: mf.evaluate(x),
            }
        })
        .collect()
}
