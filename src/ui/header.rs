use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::PLACEHOLDER;
use crate::system::snapshot::Sample;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, sample: &Sample, history_len: usize, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let host = sample.host_name.as_deref().unwrap_or(PLACEHOLDER);
    let spans = vec![
        Span::styled(
            " hostwatch ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            host.to_string(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {}", sample.process_count),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("History: {history_len}"),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            theme.name.to_string(),
            Style::default().fg(theme.text_secondary),
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
