//! Keyboard driven stand-in for a touch pager
//!
//! Holds the carousel position as a continuous page coordinate and reports
//! it through the same three callbacks a platform pager fires: scroll
//! progress, page selection and scroll state changes.

use std::time::{Duration, Instant};

use onboard_core::{PagerEvent, PreviewConfig};

/// Per-frame share of the remaining distance not covered while settling
pub const SCROLL_SMOOTHING: f32 = 0.7;
/// Distance (in pages) under which a settling pager lands on its target
const SNAP_EPSILON: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    Idle,
    Dragging,
    Settling,
}

#[derive(Debug, Clone)]
pub struct SimulatedPager {
    page_count: usize,
    /// Page coordinate, 1.5 is halfway between pages 1 and 2
    position: f32,
    target: usize,
    selected: usize,
    state: ScrollState,
    last_drag: Option<Instant>,
    last_frame: Option<Instant>,
    snap_threshold: f32,
    release_after: Duration,
    events: Vec<PagerEvent>,
}

impl SimulatedPager {
    pub fn new(page_count: usize, config: &PreviewConfig) -> Self {
        Self {
            page_count,
            position: 0.0,
            target: 0,
            selected: 0,
            state: ScrollState::Idle,
            last_drag: None,
            last_frame: None,
            snap_threshold: config.snap_threshold.clamp(0.0, 1.0),
            release_after: config.release_after(),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Last page reported as selected
    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[inline]
    pub fn is_last_page(&self) -> bool {
        self.selected + 1 >= self.page_count
    }

    /// Whether [`tick`](Self::tick) still has work to do
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state != ScrollState::Idle
    }

    /// When a drag with no further input counts as released
    pub fn release_deadline(&self) -> Option<Instant> {
        match (self.state, self.last_drag) {
            (ScrollState::Dragging, Some(last)) => Some(last + self.release_after),
            _ => None,
        }
    }

    /// Move the finger by `delta` pages (positive toward later pages)
    pub fn drag(&mut self, delta: f32, now: Instant) {
        if self.page_count <= 1 || !delta.is_finite() {
            return;
        }
        self.set_state(ScrollState::Dragging);
        self.position = self.clamp_position(self.position + delta);
        self.last_drag = Some(now);
        self.last_frame = None;
        self.emit_scroll();
    }

    /// Lift the finger; snaps to the page the drag has crossed into
    pub fn release(&mut self) {
        if self.state != ScrollState::Dragging {
            return;
        }
        self.last_drag = None;
        let target = self.snap_target_page();
        self.settle_to(target);
    }

    /// Animate to `page`, as a "next" or "skip" button does
    pub fn scroll_to_page(&mut self, page: usize) {
        if self.page_count == 0 {
            return;
        }
        let page = self.clamp_page(page);
        if self.state == ScrollState::Idle && page == self.selected {
            return;
        }
        self.last_drag = None;
        self.settle_to(page);
    }

    /// Advance drag release and settling to `now`
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.release_deadline() {
            if now >= deadline {
                tracing::trace!("drag released after inactivity");
                self.release();
            }
        }

        if self.state != ScrollState::Settling {
            return;
        }

        let delta_time = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(1.0 / 60.0);
        self.last_frame = Some(now);

        let target = self.target as f32;
        let diff = target - self.position;
        if diff.abs() < SNAP_EPSILON {
            self.position = target;
            self.emit_scroll();
            self.set_state(ScrollState::Idle);
            return;
        }

        let movement = ((1.0 - SCROLL_SMOOTHING) * delta_time * 60.0).min(1.0);
        self.position += diff * movement;
        self.emit_scroll();
    }

    /// Events fired since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<PagerEvent> {
        std::mem::take(&mut self.events)
    }

    fn settle_to(&mut self, target: usize) {
        self.target = target;
        self.last_frame = None;
        self.set_state(ScrollState::Settling);
        if target != self.selected {
            self.selected = target;
            self.events.push(PagerEvent::PageSelected(target as i64));
        }
    }

    fn set_state(&mut self, state: ScrollState) {
        if self.state == state {
            return;
        }
        let was_idle = self.state == ScrollState::Idle;
        self.state = state;
        if was_idle {
            self.events.push(PagerEvent::GestureChanged(true));
        } else if state == ScrollState::Idle {
            self.events.push(PagerEvent::GestureChanged(false));
        }
    }

    fn emit_scroll(&mut self) {
        let base = self.position.floor();
        let offset = self.position - base;
        self.events.push(PagerEvent::Scrolled {
            position: base as i64,
            offset,
        });
    }

    fn snap_target_page(&self) -> usize {
        let base = self.position.floor();
        let fraction = self.position - base;
        let target = if fraction >= self.snap_threshold {
            base + 1.0
        } else {
            base
        };
        self.clamp_page(target.max(0.0) as usize)
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.min(self.page_count.saturating_sub(1))
    }

    fn clamp_position(&self, position: f32) -> f32 {
        position.clamp(0.0, self.page_count.saturating_sub(1) as f32)
    }
}
