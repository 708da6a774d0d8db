//! Easing functions for tween interpolation.
//!
//! Every curve maps clamped progress in `[0, 1]` to an eased factor. The
//! endpoints map to exactly 0 and 1 for all built-in curves, which is what lets
//! a tween land precisely on its start and goal values.

/// Easing function variants for tween curves.
#[derive(Debug, Clone, Copy)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Quadratic ease-in-out (slow at both ends).
    QuadraticInOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
    /// Arbitrary progress remapping. Should be monotonic with f(0)=0 and
    /// f(1)=1; the tween still snaps to exact goals at completion.
    Custom(fn(f32) -> f32),
}

impl EasingFunction {
    /// Default easing for tweens: linear, matching a tween built without an
    /// explicit curve.
    pub const DEFAULT: EasingFunction = EasingFunction::Linear;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let omt = 1.0 - t;
                    1.0 - 2.0 * omt * omt
                }
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
            EasingFunction::Custom(f) => f(t),
        }
    }
}

impl PartialEq for EasingFunction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Linear, Self::Linear)
            | (Self::QuadraticIn, Self::QuadraticIn)
            | (Self::QuadraticOut, Self::QuadraticOut)
            | (Self::QuadraticInOut, Self::QuadraticInOut) => true,
            (
                Self::CubicHermite { c1, c2 },
                Self::CubicHermite { c1: d1, c2: d2 },
            ) => c1 == d1 && c2 == d2,
            // Function identity is the best available equality here.
            (Self::Custom(f), Self::Custom(g)) => *f as usize == *g as usize,
            _ => false,
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
