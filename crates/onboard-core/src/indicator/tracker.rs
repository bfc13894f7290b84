//! Position tracking
//!
//! Turns the pager's scroll, selection and gesture events into the
//! continuous position held in [`IndicatorState`].

use crate::config::IndicatorConfig;

use super::state::{AnimatedParams, IndicatorState};

/// What the caller has to do after feeding an event to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerUpdate {
    /// Event dropped (detached, hidden, or fewer than two pages)
    Ignored,
    /// State changed; draw it
    Redraw,
    /// A page change settled while no gesture was active; play the settle animation
    Settle,
}

/// Maintains the authoritative position of one indicator
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    state: IndicatorState,
    /// Events are processed only while attached with at least two visible pages
    enabled: bool,
    /// The current page changed during a gesture; animate once the gesture ends
    settle_pending: bool,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a carousel of `page_count` pages from page 0
    pub fn attach(&mut self, page_count: usize, config: &IndicatorConfig) {
        self.state = IndicatorState::new(page_count);
        self.enabled = config.is_visible && page_count > 1;
        self.settle_pending = false;
    }

    /// Stop processing events; the state is kept for inspection
    pub fn detach(&mut self) {
        self.enabled = false;
        self.settle_pending = false;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    /// Animated parameters, written by the animation engine
    #[inline]
    pub fn animated_mut(&mut self) -> &mut AnimatedParams {
        &mut self.state.animated
    }

    /// Continuous drag position: `offset` of the way from `base_index` to the next page
    pub fn on_scroll_progress(&mut self, base_index: i64, offset: f32) -> TrackerUpdate {
        if !self.enabled {
            return TrackerUpdate::Ignored;
        }

        let mut base = self.clamp_page(base_index);
        let mut offset = if offset.is_finite() {
            offset.clamp(0.0, 1.0)
        } else {
            tracing::warn!(offset, "non-finite scroll offset, treating as 0");
            0.0
        };
        if offset >= 1.0 {
            base = (base + 1).min(self.state.last_page());
            offset = 0.0;
        }
        if base == self.state.last_page() {
            offset = 0.0;
        }

        let state = &mut self.state;
        state.gesture_base = base;
        state.target_page = if offset > 0.5 { base + 1 } else { base };
        state.gesture_progress = if offset <= 0.5 {
            2.0 * offset
        } else {
            2.0 * (1.0 - offset)
        };
        if offset > 0.0 {
            state.is_gesture_active = true;
        }

        tracing::trace!(
            base,
            offset,
            target = state.target_page,
            progress = state.gesture_progress,
            "scroll progress"
        );

        TrackerUpdate::Redraw
    }

    /// The pager reported a definitive active page
    pub fn on_page_settled(&mut self, page: i64) -> TrackerUpdate {
        if !self.enabled {
            return TrackerUpdate::Ignored;
        }

        let page = self.clamp_page(page);
        let changed = page != self.state.current_page;

        let state = &mut self.state;
        state.current_page = page;
        state.target_page = page;
        state.gesture_progress = 0.0;

        if !changed {
            return TrackerUpdate::Redraw;
        }

        tracing::debug!(page, gesture = state.is_gesture_active, "page settled");

        if state.is_gesture_active {
            self.settle_pending = true;
            TrackerUpdate::Redraw
        } else {
            TrackerUpdate::Settle
        }
    }

    /// The user put a finger down (`true`) or the pager came to rest (`false`)
    pub fn on_gesture_state_changed(&mut self, active: bool) -> TrackerUpdate {
        if !self.enabled {
            return TrackerUpdate::Ignored;
        }

        if active {
            self.state.is_gesture_active = true;
            return TrackerUpdate::Redraw;
        }

        self.settle_to_current();

        if std::mem::take(&mut self.settle_pending) {
            TrackerUpdate::Settle
        } else {
            TrackerUpdate::Redraw
        }
    }

    /// Drop every transient value: gesture, pending settle, animated parameters
    pub fn reset(&mut self) {
        self.settle_to_current();
        self.settle_pending = false;
        self.state.animated = AnimatedParams::NEUTRAL;
    }

    fn settle_to_current(&mut self) {
        let state = &mut self.state;
        state.is_gesture_active = false;
        state.target_page = state.current_page;
        state.gesture_base = state.current_page;
        state.gesture_progress = 0.0;
    }

    fn clamp_page(&self, page: i64) -> usize {
        let last = self.state.last_page();
        let clamped = page.clamp(0, last as i64) as usize;
        if clamped as i64 != page {
            tracing::warn!(page, clamped, "page index out of range");
        }
        clamped
    }
}
