//! Help overlay widget
//!
//! Renders the help overlay with the configured keyboard shortcuts.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::host_list::Binding;

use super::{layout::centered_rect, theme::Theme};

fn describe(binding: &Binding) -> (String, &'static str) {
    let keys: Vec<String> = binding.keys().iter().map(|k| k.to_string()).collect();
    (keys.join(" / "), binding.help())
}

/// Draw the help overlay
pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = centered_rect(60, 80, frame.size());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .title(" Help - Keyboard Shortcuts ")
        .style(theme.help_overlay());

    let list_keys = app.host_list.list().keys();
    let sections = vec![
        (
            "Navigation",
            list_keys.all().into_iter().map(describe).collect::<Vec<_>>(),
        ),
        (
            "Hosts",
            app.host_list
                .keymap()
                .full_help()
                .into_iter()
                .map(describe)
                .collect(),
        ),
        (
            "General",
            vec![describe(&app.help_key), describe(&app.quit_key)],
        ),
    ];

    let mut lines: Vec<Line> = Vec::new();

    for (section_name, keys) in sections {
        lines.push(Line::from(Span::raw("")));
        lines.push(Line::from(Span::styled(
            format!(" {} ", section_name),
            theme.header(),
        )));
        lines.push(Line::from(Span::raw("")));

        for (key, desc) in keys {
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(format!("{:<16}", key), theme.key()),
                Span::styled(desc, theme.key_desc()),
            ]));
        }
    }

    lines.push(Line::from(Span::raw("")));
    lines.push(Line::from(Span::styled(
        " Press ? or Esc to close ",
        theme.muted(),
    )));

    let help = Paragraph::new(lines).block(block);

    frame.render_widget(help, area);
}
