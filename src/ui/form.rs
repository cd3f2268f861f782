//! Host editor dialog

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::editor::{Field, HostForm};

use super::{layout::centered_rect_fixed, theme::Theme};

const LABEL_WIDTH: usize = 15;

/// Draw the editor dialog
pub fn draw(frame: &mut Frame, form: &HostForm, theme: &Theme) {
    let area = centered_rect_fixed(60, 11, frame.size());

    // Clear background
    frame.render_widget(Clear, area);

    let title = if form.is_new() { " New host " } else { " Edit host " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .title(title);

    let mut lines = vec![Line::from(Span::raw(""))];
    for field in Field::ALL {
        let focused = form.focus() == field;
        let label_style = if focused { theme.prompt() } else { theme.muted() };

        let mut spans = vec![
            Span::styled(format!(" {:<width$}", field.label(), width = LABEL_WIDTH), label_style),
            Span::styled(form.value(field), theme.normal()),
        ];
        if focused {
            spans.push(Span::styled(" ", theme.input_cursor()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::raw("")));
    lines.push(Line::from(vec![
        Span::styled(" [Tab] ", theme.key()),
        Span::styled("Next  ", theme.key_desc()),
        Span::styled("[Enter] ", theme.key()),
        Span::styled("Save  ", theme.key_desc()),
        Span::styled("[Esc] ", theme.key()),
        Span::styled("Cancel", theme.key_desc()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
