use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::{PLACEHOLDER, format_bytes, or_placeholder, to_mb};
use crate::system::snapshot::Sample;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, sample: &Sample, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Sensors ",
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(sensor_lines(sample, theme)).block(block);
    frame.render_widget(paragraph, area);
}

fn sensor_lines(sample: &Sample, theme: &Theme) -> Vec<Line<'static>> {
    let net = &sample.network;
    let mut lines = vec![line(
        "CPU temp",
        or_placeholder(sample.cpu.temperature_c, |t| format!("{t:.0}°C")),
        theme,
    )];

    match &sample.gpu {
        Some(gpu) => {
            lines.push(line("GPU", format!("{} {:.1}%", gpu.name, gpu.load_percent), theme));
            lines.push(line(
                "GPU mem",
                format!(
                    "{}/{} MB",
                    to_mb(gpu.memory.used_bytes),
                    to_mb(gpu.memory.total_bytes)
                ),
                theme,
            ));
            lines.push(line(
                "GPU temp",
                or_placeholder(gpu.temperature_c, |t| format!("{t}°C")),
                theme,
            ));
        }
        None => lines.push(line("GPU", PLACEHOLDER.to_string(), theme)),
    }

    lines.push(line(
        "Net sent",
        format!(
            "{} KB ({}/s)",
            net.total_transmitted / 1024,
            format_bytes(net.transmitted_per_sec)
        ),
        theme,
    ));
    lines.push(line(
        "Net recv",
        format!(
            "{} KB ({}/s)",
            net.total_received / 1024,
            format_bytes(net.received_per_sec)
        ),
        theme,
    ));
    lines.push(line("Processes", sample.process_count.to_string(), theme));
    lines
}

fn line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    let value_style = if value == PLACEHOLDER {
        Style::default().fg(theme.placeholder)
    } else {
        Style::default().fg(theme.text_primary)
    };
    Line::from(vec![
        Span::styled(
            format!(" {label:<10}"),
            Style::default()
                .fg(theme.section_title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, value_style),
    ])
}
