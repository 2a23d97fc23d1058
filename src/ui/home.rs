//! Home screen: a single movie ID prompt

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::HomeState;
use crate::ui::Theme;

/// Render the home screen prompt
pub fn render_home(frame: &mut Frame, area: Rect, home: &HomeState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" HOME ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Hint
            Constraint::Length(3), // Input
            Constraint::Min(0),
        ])
        .split(inner);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Enter a TMDB movie ID and press Enter",
        Theme::label(),
    )));
    frame.render_widget(hint, chunks[0]);

    let cursor = home
        .query
        .char_indices()
        .nth(home.cursor)
        .map(|(i, _)| i)
        .unwrap_or(home.query.len());
    let (before, after) = home.query.split_at(cursor);

    let input = Paragraph::new(format!("# {}│{}", before, after))
        .style(Theme::input())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" MOVIE ID ", Theme::title())),
        );
    frame.render_widget(input, chunks[1]);
}
