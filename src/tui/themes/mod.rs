//! Theming for the talento TUI
//!
//! Semantic colour definitions plus the few pre-built styles the shell and the
//! dialog renderer need.

use crate::tui::components::dialogs::Accent;
use ratatui::style::{Color, Modifier, Style};

/// Theme represents a complete visual style configuration
#[derive(Debug, Clone)]
pub struct Theme {
    // Primary brand colors
    pub primary: Color,

    // Background colors with semantic naming
    pub bg_subtle: Color,
    pub bg_overlay: Color,

    // Foreground colors for text and UI elements
    pub fg_base: Color,
    pub fg_muted: Color,
    pub fg_selected: Color,

    // Border colors
    pub border: Color,
    pub border_focus: Color,

    // Status and semantic colors
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(37, 99, 235),
            bg_subtle: Color::Rgb(31, 41, 55),
            bg_overlay: Color::Rgb(8, 10, 16),
            fg_base: Color::Rgb(243, 244, 246),
            fg_muted: Color::Rgb(156, 163, 175),
            fg_selected: Color::White,
            border: Color::Rgb(75, 85, 99),
            border_focus: Color::Rgb(96, 165, 250),
            success: Color::Rgb(22, 163, 74),
            error: Color::Rgb(220, 38, 38),
            warning: Color::Rgb(202, 138, 4),
            info: Color::Rgb(37, 99, 235),
        }
    }

    /// Theme colour for a dialog accent
    pub fn accent_color(&self, accent: Accent) -> Color {
        match accent {
            Accent::Blue => self.info,
            Accent::Green => self.success,
            Accent::Red => self.error,
            Accent::Yellow => self.warning,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg_base)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.fg_base)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.fg_selected)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style of the backdrop drawn behind an open dialog
    pub fn overlay(&self) -> Style {
        Style::default()
            .bg(self.bg_overlay)
            .fg(self.fg_muted)
            .add_modifier(Modifier::DIM)
    }

    pub fn dialog_surface(&self) -> Style {
        Style::default().bg(self.bg_subtle).fg(self.fg_base)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
