use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

const OVERLAY_WIDTH: u16 = 48;
const KEY_WIDTH: usize = 8;

/// Key bindings followed by the session settings that affect export.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[(String, &str)],
    settings: &[(&str, String)],
    theme: &Theme,
) {
    let width = OVERLAY_WIDTH.min(area.width.saturating_sub(4));
    // borders, one blank separator, both sections
    let wanted = entries.len() + settings.len() + 3;
    let height = (wanted as u16).min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);
    let value_width = (inner.width as usize).saturating_sub(KEY_WIDTH + 4);

    let key_style = Style::default()
        .fg(theme.pill_key_fg)
        .bg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {key:>KEY_WIDTH$} "), key_style),
                Span::styled(format!("  {desc}"), Style::default().fg(theme.pill_desc_fg)),
            ])
        })
        .collect();

    if !settings.is_empty() {
        lines.push(Line::default());
        lines.extend(settings.iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!(" {label:>KEY_WIDTH$} "),
                    Style::default().fg(theme.text_secondary),
                ),
                Span::styled(
                    format!("  {}", truncate_unicode(value, value_width)),
                    Style::default().fg(theme.text_primary),
                ),
            ])
        }));
    }

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

/// Rect of `width` x `height` centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
