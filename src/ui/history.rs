use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Sparkline};

use crate::format::{PLACEHOLDER, percent_cell};
use crate::system::history::{HistoryBuffer, HistoryEntry};
use crate::ui::theme::Theme;

/// CPU sparkline over the retained history, then one row per entry.
pub fn render(frame: &mut Frame, area: Rect, history: &HistoryBuffer, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Usage history ({}/{}) ", history.len(), history.capacity()),
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [spark_area, rows_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

    let cpu_data = history.cpu_series();
    let sparkline = Sparkline::default()
        .data(&cpu_data)
        .max(10000)
        .style(Style::default().fg(theme.sparkline_color));
    frame.render_widget(sparkline, spark_area);

    // Newest rows win when the panel is too short for the whole history.
    let visible = rows_area.height as usize;
    let skip = history.len().saturating_sub(visible);
    let lines: Vec<Line> = history
        .iter()
        .skip(skip)
        .map(|entry| history_line(entry, theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), rows_area);
}

pub fn history_row(entry: &HistoryEntry) -> String {
    format!(
        "CPU: {} | Mem: {} | Disk: {}",
        cell(Some(entry.cpu)),
        cell(Some(entry.memory)),
        cell(entry.disk)
    )
}

fn cell(value: Option<f32>) -> String {
    match value {
        Some(_) => format!("{}%", percent_cell(value)),
        None => format!("{PLACEHOLDER:>4}"),
    }
}

fn history_line(entry: &HistoryEntry, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", history_row(entry)),
        Style::default().fg(theme.heat(entry.cpu)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_matches_export_columns() {
        let entry = HistoryEntry::new(5.2, 47.9, Some(88.0));
        assert_eq!(history_row(&entry), "CPU:   5% | Mem:  48% | Disk:  88%");
    }

    #[test]
    fn row_with_missing_disk() {
        let entry = HistoryEntry::new(100.0, 0.0, None);
        assert_eq!(history_row(&entry), "CPU: 100% | Mem:   0% | Disk:  N/A");
    }
}
