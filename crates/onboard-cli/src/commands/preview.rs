use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use onboard_core::presets::load_preset;
use onboard_core::{AnimationStyle, AppConfig, IndicatorShape, PageContent};
use onboard_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    layout::preview_layout,
    widgets::{IndicatorWidget, PageWidget, PopupWidget, StatusBarWidget},
};

/// Command line adjustments on top of the loaded configuration
#[derive(Debug, Default)]
pub struct Overrides {
    pub preset: Option<String>,
    pub style: Option<AnimationStyle>,
    pub shape: Option<IndicatorShape>,
    pub pages: Option<usize>,
}

pub fn run(config: AppConfig, overrides: Overrides) -> Result<()> {
    let config = apply_overrides(config, overrides);
    tracing::info!(
        style = %config.indicator.animation_style,
        pages = config.preview.pages.len(),
        "starting preview"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Onboarding preview"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: AppConfig) -> Result<()> {
    let mut app = App::new(config, Instant::now());
    let event_handler = EventHandler::new(onboard_tui::app::IDLE_TIMEOUT.as_millis() as u64);

    loop {
        if app.update(Instant::now()) {
            terminal.draw(|frame| draw(frame, &app))?;
        }

        // Wake up in time for the next animation frame or deferred redraw
        let timeout = app.poll_timeout(Instant::now());
        if let Some(event) = event_handler.next(timeout)? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    if action != Action::None {
                        tracing::debug!(?action, "key action");
                    }
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Resize(_, _) => app.mark_dirty(),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("preview closed");
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let layout = preview_layout(frame.area(), app.indicator.config().placement);

    PageWidget::render(frame, layout.page, app.current_page(), &app.theme);
    IndicatorWidget::render(frame, layout.indicator, &app.indicator, &app.theme);
    StatusBarWidget::render(frame, layout.status, app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.theme);
    }
}

/// Fold the command line flags into the configuration
fn apply_overrides(mut config: AppConfig, overrides: Overrides) -> AppConfig {
    if let Some(name) = overrides.preset {
        config.indicator = load_preset(&name);
    }
    if let Some(style) = overrides.style {
        config.indicator.animation_style = style;
    }
    if let Some(shape) = overrides.shape {
        config.indicator.shape = shape;
    }
    if let Some(count) = overrides.pages {
        config.preview.pages = resize_pages(&config.preview.pages, count);
    }
    config
}

/// Exactly `count` pages, repeating the configured ones with numbered titles
fn resize_pages(pages: &[PageContent], count: usize) -> Vec<PageContent> {
    (0..count)
        .map(|i| match pages.get(i) {
            Some(page) => page.clone(),
            None if pages.is_empty() => {
                PageContent::new(format!("Page {}", i + 1), "Swipe to continue.")
            }
            None => {
                let source = &pages[i % pages.len()];
                PageContent::new(format!("{} ({})", source.title, i + 1), source.description.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let overrides = Overrides {
            preset: Some("modern".to_string()),
            style: Some(AnimationStyle::Pulse),
            shape: Some(IndicatorShape::Diamond),
            pages: Some(6),
        };
        let config = apply_overrides(AppConfig::default(), overrides);

        assert_eq!(config.indicator.size, 18.0);
        assert_eq!(config.indicator.animation_style, AnimationStyle::Pulse);
        assert_eq!(config.indicator.shape, IndicatorShape::Diamond);
        assert_eq!(config.preview.pages.len(), 6);
    }

    #[test]
    fn test_resize_pages() {
        let pages = vec![PageContent::new("A", "a"), PageContent::new("B", "b")];
        let resized = resize_pages(&pages, 3);
        assert_eq!(resized[1].title, "B");
        assert_eq!(resized[2].title, "A (3)");
        assert_eq!(resize_pages(&pages, 1).len(), 1);
        assert_eq!(resize_pages(&[], 2)[1].title, "Page 2");
    }

    #[test]
    fn test_draw_renders_page_and_status() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new(AppConfig::default(), Instant::now());

        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Material Design 3"));
        assert!(text.contains("page 1/4"));
        // Braille dots for the indicator row
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }
}
