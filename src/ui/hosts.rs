//! Host list widget
//!
//! Renders the current page of hosts: title, description and a blank spacer
//! per entry.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::host_list::{FilterState, ListItem};

use super::theme::{Symbols, Theme};

/// Draw the host list
pub fn draw(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let list = app.host_list.list();

    if list.visible_len() == 0 {
        let msg = match list.filter_state() {
            FilterState::Unfiltered => "  No hosts yet.",
            _ => "  No matches.",
        };
        frame.render_widget(Paragraph::new(Span::styled(msg, theme.muted())), area);
        return;
    }

    let start = list.page_start();
    let cursor = list.cursor();

    let mut lines: Vec<Line> = Vec::new();
    for (offset, item) in list.visible_items().skip(start).take(list.per_page()).enumerate() {
        let selected = cursor == Some(start + offset);
        lines.extend(item_lines(item, selected, theme, area.width));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn item_lines(item: &ListItem, selected: bool, theme: &Theme, width: u16) -> [Line<'static>; 3] {
    let max = usize::from(width.saturating_sub(4));
    let title = truncate(item.title(), max);
    let desc = truncate(item.description(), max);

    if selected {
        [
            Line::from(vec![
                Span::styled(format!(" {} ", Symbols::CURSOR), theme.selected()),
                Span::styled(title, theme.selected()),
            ]),
            Line::from(vec![
                Span::styled(format!(" {} ", Symbols::CURSOR), theme.selected_desc()),
                Span::styled(desc, theme.selected_desc()),
            ]),
            Line::from(""),
        ]
    } else {
        [
            Line::from(vec![Span::raw("   "), Span::styled(title, theme.unselected())]),
            Line::from(vec![Span::raw("   "), Span::styled(desc, theme.muted())]),
            Line::from(""),
        ]
    }
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}
