use std::time::{Duration, Instant};

use onboard_core::{AnimationStyle, AppConfig, IndicatorShape, PageContent, PageIndicator, PagerEvent};

use crate::input::Action;
use crate::pager::SimulatedPager;
use crate::theme::{self, Theme};

/// Longest the loop sleeps when nothing is moving
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// State of the onboarding preview
pub struct App {
    pub config: AppConfig,
    pub pages: Vec<PageContent>,
    pub pager: SimulatedPager,
    pub indicator: PageIndicator,
    pub theme: Theme,
    pub mode: Mode,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Something other than the indicator changed since the last draw
    dirty: bool,
}

impl App {
    pub fn new(config: AppConfig, now: Instant) -> Self {
        let pages = config.preview.pages.clone();
        let pager = SimulatedPager::new(pages.len(), &config.preview);
        let theme = theme::for_preset(config.indicator.preset.as_deref());

        let mut indicator = PageIndicator::new();
        indicator.attach(pages.len(), config.indicator.clone(), now);

        Self {
            config,
            pages,
            pager,
            indicator,
            theme,
            mode: Mode::Normal,
            status_message: None,
            should_quit: false,
            dirty: true,
        }
    }

    /// Page whose content is on screen
    pub fn current_page(&self) -> Option<&PageContent> {
        self.pages.get(self.pager.selected())
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        if self.mode == Mode::Help && action != Action::None {
            self.mode = Mode::Normal;
            self.dirty = true;
            return;
        }

        if action != Action::None && self.status_message.is_some() {
            self.clear_status();
        }

        let step = self.config.preview.drag_step;
        match action {
            Action::Quit => self.should_quit = true,
            Action::DragBack => self.pager.drag(-step, now),
            Action::DragForward => self.pager.drag(step, now),
            Action::Release => self.pager.release(),
            Action::Next => {
                if self.pager.is_last_page() {
                    self.set_status("Already on the last page");
                } else {
                    self.pager.scroll_to_page(self.pager.selected() + 1);
                }
            }
            Action::Previous => {
                if self.pager.selected() == 0 {
                    self.set_status("Already on the first page");
                } else {
                    self.pager.scroll_to_page(self.pager.selected() - 1);
                }
            }
            Action::Skip => {
                let last = self.pages.len().saturating_sub(1);
                self.pager.scroll_to_page(last);
            }
            Action::Finish => {
                if self.pager.is_last_page() {
                    self.should_quit = true;
                } else {
                    self.set_status("Finish is available on the last page");
                }
            }
            Action::Reset => {
                self.indicator.reset(now);
                self.set_status("Indicator reset");
            }
            Action::CycleStyle => self.cycle_style(1, now),
            Action::CycleStyleBack => self.cycle_style(AnimationStyle::ALL.len() - 1, now),
            Action::CycleShape => self.cycle_shape(now),
            Action::ToggleHelp => {
                self.mode = Mode::Help;
                self.dirty = true;
            }
            Action::None => {}
        }

        self.forward_pager_events(now);
    }

    /// Advance pager and indicator to `now`; returns whether to draw
    pub fn update(&mut self, now: Instant) -> bool {
        self.pager.tick(now);
        self.forward_pager_events(now);
        let indicator_due = self.indicator.tick(now);
        indicator_due || std::mem::take(&mut self.dirty)
    }

    /// Ask for a full redraw, e.g. after a resize
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// How long the loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.dirty {
            return Duration::ZERO;
        }

        let mut wakeup = self.indicator.next_wakeup(now);
        if self.pager.is_moving() {
            let frame = now + self.config.preview.frame_interval();
            let release = self.pager.release_deadline().unwrap_or(frame);
            let pager_wakeup = frame.min(release);
            wakeup = Some(wakeup.map_or(pager_wakeup, |w| w.min(pager_wakeup)));
        }

        wakeup
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(IDLE_TIMEOUT)
            .min(IDLE_TIMEOUT)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.dirty = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.dirty = true;
    }

    fn forward_pager_events(&mut self, now: Instant) {
        let events = self.pager.drain_events();
        let page_changed = events
            .iter()
            .any(|event| matches!(event, PagerEvent::PageSelected(_)));
        for event in events {
            self.indicator.handle_event(event, now);
        }
        // Page text follows the selected page; indicator redraws go through its throttle
        if page_changed {
            self.dirty = true;
        }
    }

    fn cycle_style(&mut self, step: usize, now: Instant) {
        let styles = AnimationStyle::ALL;
        let current = self.config.indicator.animation_style;
        let index = styles.iter().position(|s| *s == current).unwrap_or(0);
        let next = styles[(index + step) % styles.len()];
        self.config.indicator.animation_style = next;
        self.reattach(now);
        self.set_status(format!("Animation style: {next}"));
    }

    fn cycle_shape(&mut self, now: Instant) {
        let next = match self.config.indicator.shape {
            IndicatorShape::Circle => IndicatorShape::RoundedRect,
            IndicatorShape::RoundedRect => IndicatorShape::Rect,
            IndicatorShape::Rect => IndicatorShape::Diamond,
            IndicatorShape::Diamond => IndicatorShape::Circle,
        };
        self.config.indicator.shape = next;
        self.reattach(now);
        self.set_status(format!("Shape: {next}"));
    }

    /// Re-bind the indicator with the edited config, keeping the pager's page
    fn reattach(&mut self, now: Instant) {
        self.indicator
            .attach(self.pages.len(), self.config.indicator.clone(), now);
        if self.pager.is_moving() {
            // The settle below then waits for the pager to stop
            self.indicator
                .handle_event(PagerEvent::GestureChanged(true), now);
        }
        let page = self.pager.selected() as i64;
        if page > 0 {
            // Plays the new style's settle animation on the current page
            self.indicator.on_page_settled(page, now);
        }
    }
}
