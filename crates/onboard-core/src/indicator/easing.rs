//! Pure easing curves for indicator animations
//!
//! Every curve maps progress in [0, 1] to an eased value that starts at 0
//! and ends at 1. `Overshoot` and `Bounce` may leave [0, 1] in between.

use std::f32::consts::PI;

/// Easing curve applied to linear animation progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    /// Cosine ease-in-out
    AccelerateDecelerate,
    /// Quadratic ease-out
    Decelerate,
    /// Runs past the end value, then settles back onto it
    Overshoot { tension: f32 },
    /// Hits the end value and rebounds a few times with shrinking height
    Bounce,
}

impl Curve {
    /// Apply the curve to a progress value (clamped to [0, 1])
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Curve::Linear => t,
            Curve::AccelerateDecelerate => accelerate_decelerate(t),
            Curve::Decelerate => decelerate(t),
            Curve::Overshoot { tension } => overshoot(t, tension),
            Curve::Bounce => bounce(t),
        }
    }
}

/// f(t) = cos((t + 1)π) / 2 + 0.5
#[inline]
fn accelerate_decelerate(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// f(t) = 1 - (1-t)²
#[inline]
fn decelerate(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

/// f(t) = (t-1)²((T+1)(t-1) + T) + 1
#[inline]
fn overshoot(t: f32, tension: f32) -> f32 {
    let u = t - 1.0;
    u * u * ((tension + 1.0) * u + tension) + 1.0
}

#[inline]
fn parabola(t: f32) -> f32 {
    t * t * 8.0
}

/// Piecewise parabolic bounce with three rebounds
fn bounce(t: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    let t = t * 1.1226;
    if t < 0.3535 {
        parabola(t)
    } else if t < 0.7408 {
        parabola(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        parabola(t - 0.8526) + 0.9
    } else {
        parabola(t - 1.0435) + 0.95
    }
}
