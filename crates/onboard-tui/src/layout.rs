use onboard_core::IndicatorPlacement;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows reserved for the indicator canvas
pub const INDICATOR_ROWS: u16 = 3;

/// Screen regions of the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLayout {
    pub page: Rect,
    pub indicator: Rect,
    pub status: Rect,
}

/// Split `area` into page content, indicator and status bar for `placement`
pub fn preview_layout(area: Rect, placement: IndicatorPlacement) -> PreviewLayout {
    // Content + status bar
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let content = main[0];

    let (page, indicator) = match placement {
        IndicatorPlacement::CenterBelowDescription => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(60),
                    Constraint::Length(INDICATOR_ROWS),
                    Constraint::Min(0),
                ])
                .split(content);
            (chunks[0], chunks[1])
        }
        IndicatorPlacement::BottomCenter => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(INDICATOR_ROWS),
                    Constraint::Length(1), // Margin
                ])
                .split(content);
            (chunks[0], chunks[1])
        }
        IndicatorPlacement::TopCenter => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Margin
                    Constraint::Length(INDICATOR_ROWS),
                    Constraint::Min(1),
                ])
                .split(content);
            (chunks[2], chunks[1])
        }
    };

    PreviewLayout {
        page,
        indicator,
        status: main[1],
    }
}
