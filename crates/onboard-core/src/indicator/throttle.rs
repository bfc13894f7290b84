//! Redraw coalescing
//!
//! At most one redraw per frame budget. A request inside the window is
//! remembered and released at the window's end, so the final state is always
//! drawn.

use std::time::{Duration, Instant};

/// One frame at 60 Hz
pub const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawDecision {
    /// Draw now
    Now,
    /// Coalesced; a redraw will be released at this instant
    Deferred(Instant),
}

#[derive(Debug, Clone)]
pub struct RedrawThrottle {
    interval: Duration,
    last_emitted: Option<Instant>,
    pending: bool,
}

impl Default for RedrawThrottle {
    fn default() -> Self {
        Self::new(FRAME_BUDGET)
    }
}

impl RedrawThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_emitted: None,
            pending: false,
        }
    }

    /// Ask for a redraw at `now`
    pub fn request(&mut self, now: Instant) -> RedrawDecision {
        if !self.pending && self.is_eligible(now) {
            self.last_emitted = Some(now);
            return RedrawDecision::Now;
        }
        self.pending = true;
        RedrawDecision::Deferred(self.eligible_at(now))
    }

    /// Release a deferred redraw once its window has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending && self.is_eligible(now) {
            self.pending = false;
            self.last_emitted = Some(now);
            true
        } else {
            false
        }
    }

    /// When the pending redraw becomes due, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        if !self.pending {
            return None;
        }
        self.last_emitted.map(|last| last + self.interval)
    }

    /// Forget any pending redraw and the last emission
    pub fn clear(&mut self) {
        self.pending = false;
        self.last_emitted = None;
    }

    fn is_eligible(&self, now: Instant) -> bool {
        match self.last_emitted {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    fn eligible_at(&self, now: Instant) -> Instant {
        self.last_emitted.map_or(now, |last| last + self.interval)
    }
}
