//! UI theme and styling
//!
//! Defines colors, styles, and visual elements for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color
    pub fg: Color,
    /// Primary background color
    pub bg: Color,
    /// Accent color for highlights
    pub accent: Color,
    /// Secondary accent color
    pub accent_secondary: Color,
    /// Success/positive color
    pub success: Color,
    /// Warning color
    pub warning: Color,
    /// Error color
    pub error: Color,
    /// Muted/dimmed color
    pub muted: Color,
    /// Border color
    pub border: Color,
    /// Selected item background
    pub selected_bg: Color,
    /// Selected item foreground
    pub selected_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Reset,
            accent: Color::Cyan,
            accent_secondary: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            selected_bg: Color::Rgb(40, 44, 52),
            selected_fg: Color::Cyan,
        }
    }

    /// Theme by configured name, falling back to dark
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            accent_secondary: Color::Cyan,
            success: Color::Green,
            warning: Color::Rgb(200, 150, 0),
            error: Color::Red,
            muted: Color::Gray,
            border: Color::Gray,
            selected_bg: Color::Rgb(230, 240, 255),
            selected_fg: Color::Blue,
        }
    }

    // Style methods

    /// Normal text style
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Muted/dimmed text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border style when focused
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Title line while a removal awaits confirmation
    pub fn confirm_title(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Description line of the selected item
    pub fn selected_desc(&self) -> Style {
        Style::default().fg(self.selected_fg).bg(self.selected_bg)
    }

    /// Unselected item style
    pub fn unselected(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Success/positive style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Error style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Key hint style
    pub fn key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Key description style
    pub fn key_desc(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Header/section style
    pub fn header(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::BOLD)
    }

    /// Input cursor style
    pub fn input_cursor(&self) -> Style {
        Style::default().fg(self.bg).bg(self.fg)
    }

    /// Prompt text style
    pub fn prompt(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Help overlay style
    pub fn help_overlay(&self) -> Style {
        Style::default().fg(self.fg).bg(Color::Rgb(20, 20, 20))
    }
}

/// Symbols used in the UI
pub struct Symbols;

impl Symbols {
    /// Selection marker
    pub const CURSOR: &'static str = "\u{2502}"; // │
    /// Separator
    pub const SEPARATOR: &'static str = "\u{2022}"; // •
}
