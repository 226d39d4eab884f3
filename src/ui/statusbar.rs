use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds, StatusMessage, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    keybinds: &ResolvedKeybinds,
    status_message: Option<&StatusMessage>,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Prompt and help pills always win; messages only replace the normal bar.
    if input_mode == InputMode::Normal
        && let Some(status) = status_message
    {
        let color = if status.ok {
            theme.status_ok
        } else {
            theme.status_err
        };
        let line = Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    match input_mode {
        InputMode::ConfirmExport => {
            spans.extend(pill_spans("y".to_string(), "Export and quit", theme));
            spans.extend(pill_spans("n".to_string(), "Quit", theme));
        }
        InputMode::Help => {
            spans.extend(pill_spans("Esc".to_string(), "Close help", theme));
        }
        InputMode::Normal => {
            spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
            spans.extend(pill_spans(key_label(keybinds.export), "Export", theme));
            spans.extend(pill_spans(key_label(keybinds.cycle_sort), "Sort", theme));
            spans.extend(pill_spans(key_label(keybinds.cycle_theme), "Theme", theme));
            spans.extend(pill_spans(key_label(keybinds.help), "Help", theme));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans(key: String, desc: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
