//! Indicator state shared by the tracker, the animation engine and the renderer

use serde::Serialize;

/// Parameters written by the animation engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimatedParams {
    /// Size multiplier for the active indicator
    pub scale: f32,
    /// Opacity factor for the active indicator
    pub alpha: f32,
    /// Rotation of the active indicator in degrees
    pub rotation: f32,
}

impl AnimatedParams {
    pub const NEUTRAL: AnimatedParams = AnimatedParams {
        scale: 1.0,
        alpha: 1.0,
        rotation: 0.0,
    };
}

impl Default for AnimatedParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Position state of one attached indicator
///
/// Only the position tracker and the animation engine write to this; hosts
/// read it through [`PageIndicator::state`](super::PageIndicator::state).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorState {
    pub page_count: usize,
    /// Last settled page
    pub current_page: usize,
    /// Page the gesture is heading toward; equals `current_page` when idle
    pub target_page: usize,
    /// Left page of the pair the gesture is between
    pub gesture_base: usize,
    /// Triangular progress of the gesture: 0 at either page, 1 halfway
    pub gesture_progress: f32,
    pub is_gesture_active: bool,
    pub animated: AnimatedParams,
}

impl IndicatorState {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            current_page: 0,
            target_page: 0,
            gesture_base: 0,
            gesture_progress: 0.0,
            is_gesture_active: false,
            animated: AnimatedParams::NEUTRAL,
        }
    }

    /// Index of the last page, 0 for an empty carousel
    #[inline]
    pub fn last_page(&self) -> usize {
        self.page_count.saturating_sub(1)
    }

    /// The other page of the dragged pair, if `page` belongs to it
    pub fn gesture_partner(&self, page: usize) -> Option<usize> {
        let upper = self.gesture_base + 1;
        if upper >= self.page_count {
            return None;
        }
        if page == self.gesture_base {
            Some(upper)
        } else if page == upper {
            Some(self.gesture_base)
        } else {
            None
        }
    }
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_at_rest() {
        let state = IndicatorState::new(4);
        assert_eq!(state.current_page, 0);
        assert_eq!(state.target_page, 0);
        assert_eq!(state.gesture_progress, 0.0);
        assert!(!state.is_gesture_active);
        assert_eq!(state.animated, AnimatedParams::NEUTRAL);
    }

    #[test]
    fn test_gesture_partner() {
        let mut state = IndicatorState::new(3);
        state.gesture_base = 1;
        assert_eq!(state.gesture_partner(1), Some(2));
        assert_eq!(state.gesture_partner(2), Some(1));
        assert_eq!(state.gesture_partner(0), None);

        state.gesture_base = 2;
        assert_eq!(state.gesture_partner(2), None);
    }
}
