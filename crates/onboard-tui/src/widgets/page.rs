use onboard_core::PageContent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

pub struct PageWidget;

impl PageWidget {
    /// Render the title and description of one welcome page, centered
    pub fn render(frame: &mut Frame, area: Rect, page: Option<&PageContent>, theme: &Theme) {
        let block = Block::default().style(Style::default().bg(theme.bg0));
        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let Some(page) = page else {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No pages configured",
                Style::default().fg(theme.grey),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(empty, inner_area);
            return;
        };

        // Keep text off the screen edges
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .split(inner_area);

        let description_lines = wrapped_height(&page.description, columns[1].width);
        let text_height = 2 + description_lines;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(text_height),
                Constraint::Length(1),
            ])
            .split(columns[1]);

        let lines = vec![
            Line::from(Span::styled(
                page.title.as_str(),
                Style::default()
                    .fg(theme.fg0)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                page.description.as_str(),
                Style::default().fg(theme.fg1),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, chunks[1]);
    }
}

/// Lines `text` needs when wrapped at `width` columns
fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let width = width as usize;
    let mut lines = 0u16;
    for line in text.lines() {
        let chars = line.chars().count();
        lines += chars.div_ceil(width).max(1) as u16;
    }
    lines.max(1)
}
