//! Detail view for a single movie
//!
//! Shows a loading placeholder until the lookup has resolved, then the full
//! record: poster link, headline facts, overview, and the money/company
//! fields.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::controller::DetailSnapshot;
use crate::models::DetailRecord;
use crate::ui::Theme;

/// Text shown instead of a poster when the record has none
pub const POSTER_PLACEHOLDER: &str = "[ no poster ]";

/// Render the detail screen for the given lookup snapshot
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DetailSnapshot,
    image_base_url: &str,
    scroll: u16,
) {
    let record = match snapshot.state.record() {
        Some(record) if snapshot.should_render_content() => record,
        _ => {
            render_loading(frame, area);
            return;
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" MOVIE ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Poster
            Constraint::Min(4),    // Body
            Constraint::Length(1), // Go back
        ])
        .split(inner);

    let poster = match record.poster_url(image_base_url) {
        Some(url) => Span::styled(url, Theme::dimmed()),
        None => Span::styled(POSTER_PLACEHOLDER, Theme::dimmed()),
    };
    frame.render_widget(Paragraph::new(Line::from(poster)), chunks[0]);

    let body = Paragraph::new(detail_lines(record))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(body, chunks[1]);

    let back = Paragraph::new(Line::from(vec![
        Span::styled("← Esc", Theme::keybind()),
        Span::styled(" Go back", Theme::keybind_desc()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(back, chunks[2]);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let loading = Paragraph::new("Loading...")
        .style(Theme::loading())
        .alignment(Alignment::Center);
    frame.render_widget(loading, vertical[1]);
}

/// Body lines for a resolved record
pub fn detail_lines(record: &DetailRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(record.title.clone(), Theme::title())),
        Line::from(vec![
            Span::styled(record.release_year(), Theme::year()),
            Span::raw("  "),
            Span::styled(record.runtime_label(), Theme::label()),
        ]),
        Line::from(vec![
            Span::styled("★ ", Theme::accent()),
            Span::styled(record.rating_label(), Theme::value()),
            Span::raw(" "),
            Span::styled(record.votes_label(), Theme::label()),
        ]),
    ];

    let fields = [
        ("Overview", record.overview_label()),
        ("Genres", record.genres_label()),
        ("Budget", record.budget_label()),
        ("Revenue", record.revenue_label()),
        ("Production Companies", record.companies_label()),
    ];
    for (label, value) in fields {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(label, Theme::label())));
        lines.push(Line::from(Span::styled(value, Theme::value())));
    }

    lines
}
