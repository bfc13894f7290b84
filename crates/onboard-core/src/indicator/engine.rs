//! Settle animation engine
//!
//! Drives the animated scale, alpha and rotation of the active indicator
//! after a page change. At most one run is live: starting a run or cancelling
//! bumps the generation, and ticks carrying an older token are ignored.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::config::AnimationStyle;

use super::easing::Curve;
use super::state::AnimatedParams;
use super::timing::{is_complete, lerp, progress};

/// Peak scale of the `Scale` style
pub const SCALE_PEAK: f32 = 1.2;
/// Peak scale of the `Bounce` style
pub const BOUNCE_PEAK: f32 = 1.3;
/// Extra scale at the top of each `Pulse` cycle
pub const PULSE_AMPLITUDE: f32 = 0.2;
/// Number of `Pulse` cycles per run
pub const PULSE_CYCLES: u32 = 3;
/// Opacity the `Fade` style starts from
pub const FADE_START_ALPHA: f32 = 0.5;
/// Degrees turned per `Rotate` run
pub const ROTATE_SWEEP: f32 = 90.0;

const OVERSHOOT_TENSION: f32 = 2.0;
/// Fraction of a `Scale` run spent growing
const SCALE_RISE: f32 = 0.5;
/// Fraction of a `Bounce` run spent growing
const BOUNCE_RISE: f32 = 0.3;

/// Identifies one animation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

/// Result of delivering a tick to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The token belongs to a cancelled or finished run; nothing changed
    Stale,
    /// Parameters updated, more ticks needed
    Running,
    /// Parameters set to their final values, engine idle
    Finished,
}

#[derive(Debug, Clone)]
struct Run {
    token: AnimationToken,
    style: AnimationStyle,
    start: Instant,
    duration: Duration,
    rotation_from: f32,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Running(Run),
}

#[derive(Debug, Clone, Default)]
pub struct AnimationEngine {
    phase: Phase,
    generation: u64,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// Token of the live run, if any
    pub fn current_token(&self) -> Option<AnimationToken> {
        match &self.phase {
            Phase::Running(run) => Some(run.token),
            Phase::Idle => None,
        }
    }

    /// Style of the live run, if any
    pub fn running_style(&self) -> Option<AnimationStyle> {
        match &self.phase {
            Phase::Running(run) => Some(run.style),
            Phase::Idle => None,
        }
    }

    /// Start the settle animation for `style`, replacing any live run
    ///
    /// Returns `None` when the style has nothing to animate (`Slide`,
    /// `Morph`, `None`) or the duration is zero; the parameters are then
    /// already at their final values and one redraw is all that is needed.
    pub fn start(
        &mut self,
        style: AnimationStyle,
        base_duration: Duration,
        now: Instant,
        params: &mut AnimatedParams,
    ) -> Option<AnimationToken> {
        if self.cancel() {
            tracing::debug!(generation = self.generation, "replaced running animation");
        }

        // Leave the previous run's scale/alpha behind; rotation accumulates
        params.scale = 1.0;
        params.alpha = 1.0;

        let duration = match run_duration(style, base_duration) {
            Some(duration) if !duration.is_zero() => duration,
            Some(_) => {
                finish(style, params.rotation, params);
                return None;
            }
            None => return None,
        };

        self.generation += 1;
        let run = Run {
            token: AnimationToken(self.generation),
            style,
            start: now,
            duration,
            rotation_from: params.rotation,
        };
        sample(style, 0.0, run.rotation_from, params);

        tracing::debug!(
            %style,
            generation = self.generation,
            duration_ms = duration.as_millis() as u64,
            "animation started"
        );

        let token = run.token;
        self.phase = Phase::Running(run);
        Some(token)
    }

    /// Advance the run identified by `token` to `now`
    pub fn tick(
        &mut self,
        token: AnimationToken,
        now: Instant,
        params: &mut AnimatedParams,
    ) -> TickOutcome {
        let run = match &self.phase {
            Phase::Running(run) if run.token == token => run,
            _ => return TickOutcome::Stale,
        };

        if is_complete(run.start, now, run.duration) {
            finish(run.style, run.rotation_from, params);
            tracing::debug!(generation = token.0, "animation finished");
            self.phase = Phase::Idle;
            return TickOutcome::Finished;
        }

        let t = progress(run.start, now, run.duration);
        sample(run.style, t, run.rotation_from, params);
        tracing::trace!(generation = token.0, t, ?params, "animation tick");
        TickOutcome::Running
    }

    /// Stop the live run; returns whether one was running
    ///
    /// Every token issued so far becomes stale.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        matches!(std::mem::take(&mut self.phase), Phase::Running(_))
    }
}

/// Run length for `style`, `None` for styles without a settle animation
///
/// Each style is capped so a burst of page changes cannot schedule
/// arbitrarily long runs.
pub fn run_duration(style: AnimationStyle, base: Duration) -> Option<Duration> {
    let (duration, cap) = match style {
        AnimationStyle::Scale | AnimationStyle::Fade => (base, Duration::from_millis(1000)),
        AnimationStyle::Bounce => (base, Duration::from_millis(1200)),
        AnimationStyle::Pulse => (base * PULSE_CYCLES, Duration::from_millis(1800)),
        AnimationStyle::Rotate => (base * 2, Duration::from_millis(1600)),
        AnimationStyle::Slide | AnimationStyle::Morph | AnimationStyle::None => return None,
    };
    Some(duration.min(cap))
}

/// Write the parameters for `style` at progress `t`
fn sample(style: AnimationStyle, t: f32, rotation_from: f32, params: &mut AnimatedParams) {
    match style {
        AnimationStyle::Scale => {
            params.scale = if t < SCALE_RISE {
                let eased = Curve::Overshoot {
                    tension: OVERSHOOT_TENSION,
                }
                .apply(t / SCALE_RISE);
                lerp(1.0, SCALE_PEAK, eased)
            } else {
                let eased = Curve::Decelerate.apply((t - SCALE_RISE) / (1.0 - SCALE_RISE));
                lerp(SCALE_PEAK, 1.0, eased)
            };
        }
        AnimationStyle::Fade => {
            params.alpha = lerp(FADE_START_ALPHA, 1.0, Curve::AccelerateDecelerate.apply(t));
        }
        AnimationStyle::Bounce => {
            params.scale = if t < BOUNCE_RISE {
                lerp(1.0, BOUNCE_PEAK, Curve::Decelerate.apply(t / BOUNCE_RISE))
            } else {
                let eased = Curve::Bounce.apply((t - BOUNCE_RISE) / (1.0 - BOUNCE_RISE));
                lerp(BOUNCE_PEAK, 1.0, eased)
            };
        }
        AnimationStyle::Pulse => {
            let wave = (PI * PULSE_CYCLES as f32 * t).sin();
            params.scale = 1.0 + PULSE_AMPLITUDE * wave * wave;
        }
        AnimationStyle::Rotate => {
            params.rotation =
                rotation_from + ROTATE_SWEEP * Curve::AccelerateDecelerate.apply(t);
        }
        AnimationStyle::Slide | AnimationStyle::Morph | AnimationStyle::None => {}
    }
}

/// Write the final values for `style`
fn finish(style: AnimationStyle, rotation_from: f32, params: &mut AnimatedParams) {
    params.scale = 1.0;
    params.alpha = 1.0;
    if style == AnimationStyle::Rotate {
        params.rotation = (rotation_from + ROTATE_SWEEP).rem_euclid(360.0);
    }
}
