use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::ui::help::centered_rect;
use crate::ui::theme::Theme;

/// Quit confirmation asking whether the history should be written out first.
pub fn render(frame: &mut Frame, area: Rect, path: &Path, entries: usize, theme: &Theme) {
    let width = 52u16.min(area.width.saturating_sub(4));
    let height = 6u16.min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Export history? ",
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(Span::styled(
            format!(" {entries} entries -> {}", path.display()),
            Style::default().fg(theme.text_primary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(theme.pill_key_fg)
                    .bg(theme.pill_key_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" export and quit   ", Style::default().fg(theme.pill_desc_fg)),
            Span::styled(
                " n ",
                Style::default()
                    .fg(theme.pill_key_fg)
                    .bg(theme.pill_key_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" quit", Style::default().fg(theme.pill_desc_fg)),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .style(Style::default().bg(theme.surface_bg)),
        overlay,
    );
}
