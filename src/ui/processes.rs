use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::{format_bytes, truncate_unicode};
use crate::system::process::{ProcessRow, SortMode};
use crate::ui::theme::Theme;

const NAME_WIDTH: u16 = 28;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessRow],
    sort_mode: SortMode,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Top {} processes by {} ", processes.len(), sort_mode.label()),
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));

    let header = Row::new(["PID", "Name", "CPU%", "Memory"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(truncate_unicode(&p.name, NAME_WIDTH as usize)),
                Cell::from(format!("{:.1}", p.cpu_percent))
                    .style(Style::default().fg(theme.heat(p.cpu_percent))),
                Cell::from(format_bytes(p.memory_bytes)),
            ])
            .style(Style::default().fg(theme.text_primary))
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(NAME_WIDTH),
        Constraint::Length(7),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
