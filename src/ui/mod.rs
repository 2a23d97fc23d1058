//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod detail;
pub mod home;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::nav::Route;

/// Main render function - dispatches to the screen for the current route
pub fn render_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0]);

    match app.nav.current() {
        Route::Home => home::render_home(frame, chunks[1], &app.home),
        Route::Movie(_) => match &app.detail {
            Some(screen) => detail::render_detail(
                frame,
                chunks[1],
                &screen.snapshot(),
                &app.settings.image_base_url,
                screen.scroll,
            ),
            None => home::render_home(frame, chunks[1], &app.home),
        },
    }

    render_status_bar(frame, chunks[2], app.nav.current());
}

fn render_header(frame: &mut Frame, area: Rect) {
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "MOVIE",
            ratatui::style::Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "SCOPE",
            ratatui::style::Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, route: &Route) {
    let hints: &[(&str, &str)] = match route {
        Route::Home => &[("Enter", "Open"), ("Esc", "Quit")],
        Route::Movie(_) => &[("Esc/b", "Back"), ("↑↓", "Scroll"), ("q", "Quit")],
    };

    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {} ", key), Theme::keybind()));
        spans.push(Span::styled(format!("{} ", desc), Theme::keybind_desc()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
