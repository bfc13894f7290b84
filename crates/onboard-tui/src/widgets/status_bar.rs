use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};
use crate::pager::ScrollState;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            status_line(app)
        };

        let help_hint = match app.mode {
            Mode::Help => " any key: close ",
            Mode::Normal => " q:quit h/l:drag space:release n/p:page tab:style ?:help ",
        };
        let padding_len = area
            .width
            .saturating_sub(status_text.chars().count() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Style, page, pager state and animated parameters
fn status_line(app: &App) -> String {
    let config = app.indicator.config();
    let state = app.indicator.state();
    let gesture = match app.pager.state() {
        ScrollState::Idle => "IDLE",
        ScrollState::Dragging => "DRAG",
        ScrollState::Settling => "SETTLE",
    };
    let animated = &state.animated;
    let running = app
        .indicator
        .running_style()
        .map(|style| format!(" *{style}"))
        .unwrap_or_default();

    format!(
        " {} {} | page {}/{} | {} {:.2} | scale {:.2} alpha {:.2} rot {:.0}°{}",
        config.animation_style.name().to_uppercase(),
        config.shape,
        state.current_page + 1,
        state.page_count.max(1),
        gesture,
        state.gesture_progress,
        animated.scale,
        animated.alpha,
        animated.rotation,
        running,
    )
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use onboard_core::{AnimationStyle, AppConfig};

    use super::*;

    #[test]
    fn test_status_line_reports_page_and_style() {
        let app = App::new(AppConfig::default(), Instant::now());
        let line = status_line(&app);
        assert!(line.contains("SLIDE circle"));
        assert!(line.contains("page 1/4"));
        assert!(line.contains("IDLE"));
        assert!(!line.contains('*'));
    }

    #[test]
    fn test_status_line_marks_running_animation() {
        let mut config = AppConfig::default();
        config.indicator.animation_style = AnimationStyle::Bounce;
        let now = Instant::now();
        let mut app = App::new(config, now);
        app.indicator.on_page_settled(2, now);

        let line = status_line(&app);
        assert!(line.contains("page 3/4"));
        assert!(line.ends_with("*bounce"));
    }
}
