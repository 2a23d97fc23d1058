//! Neon theme for MovieScope
//!
//! Color palette and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Neon color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0a0a0f (deep black-blue)
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);

    /// Primary: #00fff2 (cyan neon)
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);

    /// Secondary: #ff00ff (magenta)
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x00, 0xff);

    /// Accent: #ffff00 (yellow)
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);

    /// Text: #e0e0e0 (soft white)
    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);

    /// Muted labels: #8a8aa0
    pub const LABEL: Color = Color::Rgb(0x8a, 0x8a, 0xa0);

    /// Dim: #404050 (muted)
    pub const DIM: Color = Color::Rgb(0x40, 0x40, 0x50);

    /// Border color (dim cyan)
    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Field label above a value
    pub fn label() -> Style {
        Style::default().fg(Self::LABEL)
    }

    /// Field value
    pub fn value() -> Style {
        Style::default().fg(Self::TEXT).add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Accent text style (yellow), used for the rating
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Normal border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Loading indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::ITALIC)
    }

    /// Keyboard shortcut key
    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard shortcut description
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::LABEL)
    }

    /// Text input
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT)
    }
}
