//! Page indicator lifecycle
//!
//! [`PageIndicator`] is the one object a host talks to. It binds the position
//! tracker to the pager's events, starts and ticks settle animations, rate
//! limits redraw requests and hands out draw commands.
//!
//! ```ignore
//! let mut indicator = PageIndicator::new();
//! indicator.attach(pages.len(), config.indicator.clone(), Instant::now());
//!
//! // Forward pager events as they arrive
//! indicator.handle_event(PagerEvent::Scrolled { position: 0, offset: 0.4 }, Instant::now());
//!
//! // Once per frame
//! if indicator.tick(Instant::now()) {
//!     draw(indicator.render(area));
//! }
//! ```

use std::time::Instant;

use crate::config::{AnimationStyle, IndicatorConfig};

use super::engine::{AnimationEngine, AnimationToken, TickOutcome};
use super::geometry::{measure, Geometry};
use super::render::{render, DrawCommand, Size};
use super::state::IndicatorState;
use super::throttle::{RedrawDecision, RedrawThrottle, FRAME_BUDGET};
use super::tracker::{PositionTracker, TrackerUpdate};

/// Events produced by the pager the indicator follows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagerEvent {
    /// Drag position: `offset` of the way from page `position` to the next
    Scrolled { position: i64, offset: f32 },
    /// A page became the settled active page
    PageSelected(i64),
    /// A drag started (`true`) or the pager came to rest (`false`)
    GestureChanged(bool),
}

/// Animated page-position indicator bound to one carousel
#[derive(Debug, Clone, Default)]
pub struct PageIndicator {
    config: IndicatorConfig,
    tracker: PositionTracker,
    engine: AnimationEngine,
    geometry: Geometry,
    throttle: RedrawThrottle,
    redraw_due: bool,
    attached: bool,
}

impl PageIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a carousel of `page_count` pages, starting on page 0
    ///
    /// Replaces any previous attachment. With fewer than two pages, or a
    /// hidden configuration, the indicator measures zero and ignores events.
    pub fn attach(&mut self, page_count: usize, config: IndicatorConfig, now: Instant) {
        self.engine.cancel();
        self.throttle.clear();
        self.redraw_due = false;

        self.config = config.sanitized();
        self.tracker.attach(page_count, &self.config);
        self.geometry = if self.tracker.is_enabled() {
            measure(page_count, &self.config, self.config.animation_style)
        } else {
            Geometry::EMPTY
        };
        self.attached = true;

        tracing::debug!(
            page_count,
            style = %self.config.animation_style,
            enabled = self.tracker.is_enabled(),
            extent = self.geometry.total_extent,
            "indicator attached"
        );

        self.request_redraw(now);
    }

    /// Unbind from the carousel; cancels any animation and stops redraws
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.engine.cancel();
        self.throttle.clear();
        self.redraw_due = false;
        self.tracker.detach();
        self.attached = false;
        tracing::debug!("indicator detached");
    }

    /// Drop transient visuals, e.g. when the host screen comes back to the foreground
    pub fn reset(&mut self, now: Instant) {
        if !self.attached {
            return;
        }
        self.engine.cancel();
        self.tracker.reset();
        tracing::debug!(page = self.tracker.state().current_page, "indicator reset");
        self.request_redraw(now);
    }

    /// Feed one pager event
    pub fn handle_event(&mut self, event: PagerEvent, now: Instant) {
        if !self.attached {
            tracing::trace!(?event, "event after detach ignored");
            return;
        }

        let update = match event {
            PagerEvent::Scrolled { position, offset } => {
                self.tracker.on_scroll_progress(position, offset)
            }
            PagerEvent::PageSelected(page) => self.tracker.on_page_settled(page),
            PagerEvent::GestureChanged(active) => self.tracker.on_gesture_state_changed(active),
        };

        match update {
            TrackerUpdate::Ignored => {}
            TrackerUpdate::Redraw => self.request_redraw(now),
            TrackerUpdate::Settle => {
                self.start_settle_animation(now);
                self.request_redraw(now);
            }
        }
    }

    pub fn on_scroll_progress(&mut self, base_index: i64, offset: f32, now: Instant) {
        self.handle_event(
            PagerEvent::Scrolled {
                position: base_index,
                offset,
            },
            now,
        );
    }

    pub fn on_page_settled(&mut self, page: i64, now: Instant) {
        self.handle_event(PagerEvent::PageSelected(page), now);
    }

    pub fn on_gesture_state_changed(&mut self, active: bool, now: Instant) {
        self.handle_event(PagerEvent::GestureChanged(active), now);
    }

    /// Deliver a tick scheduled for the run identified by `token`
    ///
    /// Ticks for cancelled or replaced runs are ignored.
    pub fn on_animation_tick(&mut self, token: AnimationToken, now: Instant) -> TickOutcome {
        if !self.attached {
            return TickOutcome::Stale;
        }
        let outcome = self.engine.tick(token, now, self.tracker.animated_mut());
        if outcome != TickOutcome::Stale {
            self.request_redraw(now);
        }
        outcome
    }

    /// Advance the live animation to `now` and report whether to draw
    ///
    /// Call once per host frame. Returns `true` when a redraw is due, which
    /// also consumes it.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(token) = self.engine.current_token() {
            self.on_animation_tick(token, now);
        }
        self.take_redraw(now)
    }

    /// Whether a redraw is due at `now`, consuming it
    pub fn take_redraw(&mut self, now: Instant) -> bool {
        if self.throttle.poll(now) {
            self.redraw_due = true;
        }
        std::mem::take(&mut self.redraw_due)
    }

    /// Earliest instant the host should call [`tick`](Self::tick) again
    pub fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        if !self.attached {
            return None;
        }
        if self.redraw_due {
            return Some(now);
        }
        let animation = self.engine.is_running().then(|| now + FRAME_BUDGET);
        match (animation, self.throttle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Space the host has to reserve: `(total_extent, rendered_height)`
    pub fn measure(&self) -> Geometry {
        if self.attached {
            self.geometry
        } else {
            Geometry::EMPTY
        }
    }

    /// Draw commands for the current state, centered in `bounds`
    pub fn render(&self, bounds: Size) -> Vec<DrawCommand> {
        if !self.attached {
            return Vec::new();
        }
        render(self.tracker.state(), &self.config, &self.geometry, bounds)
    }

    #[inline]
    pub fn state(&self) -> &IndicatorState {
        self.tracker.state()
    }

    /// Configuration in effect (after sanitizing)
    #[inline]
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.engine.is_running()
    }

    /// Style of the running animation, if any
    #[inline]
    pub fn running_style(&self) -> Option<AnimationStyle> {
        self.engine.running_style()
    }

    /// Token of the running animation, for hosts that schedule ticks themselves
    #[inline]
    pub fn animation_token(&self) -> Option<AnimationToken> {
        self.engine.current_token()
    }

    fn start_settle_animation(&mut self, now: Instant) {
        let style = self.config.animation_style;
        let duration = self.config.animation_duration();
        self.engine
            .start(style, duration, now, self.tracker.animated_mut());
    }

    fn request_redraw(&mut self, now: Instant) {
        if !self.attached {
            return;
        }
        match self.throttle.request(now) {
            RedrawDecision::Now => self.redraw_due = true,
            RedrawDecision::Deferred(at) => {
                tracing::trace!(in_ms = at.saturating_duration_since(now).as_millis() as u64, "redraw deferred");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::indicator::state::AnimatedParams;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn config(style: AnimationStyle) -> IndicatorConfig {
        IndicatorConfig {
            animation_style: style,
            size: 10.0,
            spacing: 6.0,
            animation_duration_ms: 300,
            ..Default::default()
        }
    }

    fn attached(page_count: usize, style: AnimationStyle, now: Instant) -> PageIndicator {
        let mut indicator = PageIndicator::new();
        indicator.attach(page_count, config(style), now);
        indicator
    }

    fn widths(indicator: &PageIndicator) -> Vec<f32> {
        indicator
            .render(Size::default())
            .iter()
            .map(|command| command.shape.bounds().width())
            .collect()
    }

    #[test]
    fn test_slide_scroll_at_rest() {
        let now = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Slide, now);
        indicator.on_scroll_progress(0, 0.0, now);

        let w = widths(&indicator);
        assert!((w[0] - 25.0).abs() < 1e-4);
        assert!((w[1] - 10.0).abs() < 1e-4);
        assert!((w[2] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_slide_scroll_midpoint() {
        let now = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Slide, now);
        indicator.on_scroll_progress(0, 0.5, now);

        assert_eq!(indicator.state().gesture_progress, 1.0);
        let w = widths(&indicator);
        assert!((w[0] - 17.5).abs() < 1e-4);
        assert!((w[1] - 17.5).abs() < 1e-4);
    }

    #[test]
    fn test_fade_settle_alpha_over_time() {
        let start = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Fade, start);
        indicator.on_page_settled(1, start);
        assert!(indicator.is_animating());
        assert_eq!(indicator.running_style(), Some(AnimationStyle::Fade));

        let alpha = |indicator: &PageIndicator| indicator.render(Size::default())[1].fill.alpha();
        assert_eq!(alpha(&indicator), 128);

        indicator.tick(start + ms(150));
        let mid = alpha(&indicator);
        assert!(mid > 128 && mid < 255);

        indicator.tick(start + ms(300));
        assert_eq!(alpha(&indicator), 255);
        assert!(!indicator.is_animating());
        assert_eq!(indicator.running_style(), None);
    }

    #[test]
    fn test_single_page_measures_zero_and_ignores_events() {
        let now = Instant::now();
        let mut indicator = attached(1, AnimationStyle::Slide, now);
        assert_eq!(indicator.measure(), Geometry::EMPTY);

        indicator.on_gesture_state_changed(true, now);
        indicator.on_scroll_progress(0, 0.4, now);
        indicator.on_page_settled(3, now);
        indicator.on_gesture_state_changed(false, now);

        assert_eq!(*indicator.state(), IndicatorState::new(1));
        assert!(indicator.render(Size::new(100.0, 20.0)).is_empty());
        assert!(!indicator.is_animating());
    }

    #[test]
    fn test_measure_reports_extent() {
        let now = Instant::now();
        let indicator = attached(4, AnimationStyle::Scale, now);
        let geometry = indicator.measure();
        assert_eq!(geometry.total_extent, 4.0 * 10.0 + 3.0 * 6.0);
        assert_eq!(geometry.rendered_height, 10.0);
    }

    #[test]
    fn test_no_animation_during_gesture() {
        let start = Instant::now();
        let mut indicator = attached(4, AnimationStyle::Bounce, start);
        indicator.on_gesture_state_changed(true, start);
        indicator.on_scroll_progress(0, 0.7, start);
        indicator.on_page_settled(1, start);
        assert!(!indicator.is_animating());

        indicator.on_gesture_state_changed(false, start + ms(50));
        assert!(indicator.is_animating());
        assert_eq!(indicator.state().gesture_progress, 0.0);
        assert_eq!(indicator.state().target_page, 1);
    }

    #[test]
    fn test_rapid_flicks_keep_one_animation() {
        let start = Instant::now();
        let mut indicator = attached(6, AnimationStyle::Scale, start);

        let mut tokens = Vec::new();
        for page in 1..6 {
            indicator.on_page_settled(page, start + ms(page as u64 * 5));
            tokens.push(indicator.animation_token().unwrap());
        }

        let live = *tokens.last().unwrap();
        for stale in &tokens[..tokens.len() - 1] {
            assert_eq!(
                indicator.on_animation_tick(*stale, start + ms(100)),
                TickOutcome::Stale
            );
        }
        assert_eq!(indicator.on_animation_tick(live, start + ms(100)), TickOutcome::Running);
        assert_eq!(indicator.state().current_page, 5);
    }

    #[test]
    fn test_detach_cancels_and_silences() {
        let start = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Pulse, start);
        indicator.on_page_settled(2, start);
        let token = indicator.animation_token().unwrap();
        indicator.take_redraw(start);

        indicator.detach();
        assert!(!indicator.is_animating());
        assert_eq!(indicator.on_animation_tick(token, start + ms(20)), TickOutcome::Stale);

        indicator.on_page_settled(0, start + ms(40));
        indicator.on_gesture_state_changed(false, start + ms(40));
        assert!(!indicator.tick(start + ms(100)));
        assert_eq!(indicator.next_wakeup(start + ms(100)), None);
        assert_eq!(indicator.measure(), Geometry::EMPTY);
        assert_eq!(indicator.state().current_page, 2);
    }

    #[test]
    fn test_reset_clears_transients() {
        let start = Instant::now();
        let mut indicator = attached(4, AnimationStyle::Rotate, start);
        indicator.on_page_settled(2, start);
        indicator.tick(start + ms(100));
        indicator.on_gesture_state_changed(true, start + ms(120));
        indicator.on_scroll_progress(2, 0.3, start + ms(130));

        indicator.reset(start + ms(140));
        let state = indicator.state();
        assert!(!indicator.is_animating());
        assert_eq!(state.current_page, 2);
        assert_eq!(state.target_page, 2);
        assert_eq!(state.gesture_progress, 0.0);
        assert!(!state.is_gesture_active);
        assert_eq!(state.animated, AnimatedParams::NEUTRAL);
    }

    #[test]
    fn test_redraws_are_throttled_but_final_state_drawn() {
        let start = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Slide, start);
        assert!(indicator.take_redraw(start));

        // A burst of scroll events inside one frame
        indicator.on_gesture_state_changed(true, start + ms(1));
        for step in 1..10 {
            indicator.on_scroll_progress(0, step as f32 / 20.0, start + ms(1 + step));
        }
        assert!(!indicator.take_redraw(start + ms(10)));
        assert_eq!(indicator.next_wakeup(start + ms(10)), Some(start + ms(16)));

        // The deferred redraw is delivered, and it sees the latest state
        assert!(indicator.tick(start + ms(16)));
        assert!((indicator.state().gesture_progress - 0.9).abs() < 1e-5);
        assert!(!indicator.tick(start + ms(17)));
    }

    #[test]
    fn test_each_tick_requests_redraw() {
        let start = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Bounce, start);
        indicator.on_page_settled(1, start + ms(100));
        assert!(indicator.take_redraw(start + ms(100)));

        for frame in 1..=10 {
            let now = start + ms(100 + frame * 20);
            assert!(indicator.tick(now), "frame {frame} not drawn");
        }
    }

    #[test]
    fn test_settle_same_page_redraws_without_animation() {
        let start = Instant::now();
        let mut indicator = attached(3, AnimationStyle::Scale, start);
        indicator.take_redraw(start);
        indicator.on_page_settled(0, start + ms(50));
        assert!(!indicator.is_animating());
        assert!(indicator.take_redraw(start + ms(50)));
    }

    #[test]
    fn test_invalid_config_is_sanitized() {
        let now = Instant::now();
        let mut indicator = PageIndicator::new();
        let config = IndicatorConfig {
            size: -5.0,
            animation_duration_ms: -1,
            ..Default::default()
        };
        indicator.attach(3, config, now);
        assert_eq!(indicator.config().size, 0.0);
        assert_eq!(indicator.config().animation_duration_ms, 300);
    }
}
