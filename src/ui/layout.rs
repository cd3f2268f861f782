//! Main layout and rendering
//!
//! Orchestrates the overall TUI layout and delegates to widgets.

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::host_list::{FilterState, Mode};

use super::{
    form, help, hosts,
    theme::{Symbols, Theme},
};

/// Split the screen into title, list, status and footer areas
fn areas(size: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(3),    // Host list
            Constraint::Length(2), // Status / error
            Constraint::Length(2), // Footer
        ])
        .split(size)
}

/// Area available to the host list for a given screen size
pub fn list_area(size: Rect) -> Rect {
    areas(size)[1]
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let chunks = areas(frame.size());

    draw_title(frame, app, theme, chunks[0]);
    hosts::draw(frame, app, theme, chunks[1]);
    draw_status(frame, app, theme, chunks[2]);
    draw_footer(frame, app, theme, chunks[3]);

    // Draw overlays
    if let Some(ref editor) = app.editor {
        form::draw(frame, editor, theme);
    }

    if app.show_help {
        help::draw(frame, app, theme);
    }
}

/// Draw the derived title line
fn draw_title(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let style = match app.host_list.mode() {
        Mode::ConfirmRemove => theme.confirm_title(),
        Mode::Normal => theme.title(),
    };

    let title = Line::from(vec![Span::raw(" "), Span::styled(app.host_list.title(), style)]);
    frame.render_widget(Paragraph::new(title), area);
}

/// Draw filter prompt, error or status message
fn draw_status(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let list = app.host_list.list();

    let lines: Vec<Line> = if let Some(ref msg) = app.error_message {
        msg.lines()
            .map(|l| Line::from(Span::styled(format!(" {}", l), theme.error())))
            .collect()
    } else {
        match list.filter_state() {
            FilterState::Filtering => vec![Line::from(vec![
                Span::styled(" Filter: ", theme.prompt()),
                Span::styled(list.query(), theme.normal()),
                Span::styled("_", theme.input_cursor()),
            ])],
            FilterState::FilterApplied => vec![Line::from(vec![
                Span::styled(format!(" \u{201c}{}\u{201d} ", list.query()), theme.muted()),
                Span::styled(
                    format!("{} of {} hosts", list.visible_len(), list.items().len()),
                    theme.muted(),
                ),
            ])],
            FilterState::Unfiltered => match app.status_message {
                Some(ref msg) => vec![Line::from(Span::styled(format!(" {}", msg), theme.success()))],
                None => vec![Line::from(Span::styled(
                    format_host_count(list.items().len()),
                    theme.muted(),
                ))],
            },
        }
    };

    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw footer with key hints
fn draw_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let keys = footer_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(format!(" {} ", Symbols::SEPARATOR), theme.muted()));
        }
        spans.push(Span::styled(key.clone(), theme.key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, theme.key_desc()));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border()),
    );

    frame.render_widget(footer, area);
}

/// Key hints for the current mode
pub fn footer_hints(app: &App) -> Vec<(String, &'static str)> {
    let host_list = &app.host_list;
    let keymap = host_list.keymap();

    if app.editor.is_some() {
        return vec![
            ("tab".to_string(), "next field"),
            ("enter".to_string(), "save"),
            ("esc".to_string(), "cancel"),
        ];
    }

    if host_list.list().is_filtering() {
        return vec![
            ("enter".to_string(), "apply filter"),
            ("esc".to_string(), "cancel"),
        ];
    }

    if host_list.mode() == Mode::ConfirmRemove {
        return vec![
            (keymap.confirm.help_key(), keymap.confirm.help()),
            ("any".to_string(), "cancel"),
        ];
    }

    let list_keys = host_list.list().keys();
    let mut hints: Vec<(String, &'static str)> = Vec::new();
    if host_list.list().visible_len() > 0 {
        hints.push((list_keys.down.help_key(), "down"));
        hints.push((list_keys.up.help_key(), "up"));
        hints.push((list_keys.filter.help_key(), list_keys.filter.help()));
    }
    if host_list.list().filter_state() == FilterState::FilterApplied {
        hints.push((
            list_keys.clear_filter.help_key(),
            list_keys.clear_filter.help(),
        ));
    }
    for binding in keymap.short_help() {
        hints.push((binding.help_key(), binding.help()));
    }
    hints.push((app.help_key.help_key(), "more"));
    hints.push((app.quit_key.help_key(), "quit"));

    hints
}

/// Format host count string
pub fn format_host_count(count: usize) -> String {
    if count == 1 {
        " 1 host".to_string()
    } else {
        format!(" {} hosts", count)
    }
}

/// Center a rect within another
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Create a fixed-size centered rect
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = (r.width.saturating_sub(width)) / 2;
    let y = (r.height.saturating_sub(height)) / 2;

    Rect {
        x: r.x + x,
        y: r.y + y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}
