use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge};

use crate::format::{PLACEHOLDER, or_placeholder, usage_label};
use crate::system::snapshot::{CpuSample, Sample, UsageSample};
use crate::ui::theme::Theme;

/// CPU, memory, swap and disk gauges in a 2x2 grid.
pub fn render(frame: &mut Frame, area: Rect, sample: &Sample, theme: &Theme) {
    let [top, bottom] = Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(area);
    let [cpu_area, mem_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [swap_area, disk_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    render_gauge(
        frame,
        cpu_area,
        " CPU ",
        sample.cpu.usage_percent,
        cpu_label(&sample.cpu),
        theme.cpu_gauge,
        theme,
    );
    render_usage(frame, mem_area, " Memory ", &sample.memory, theme.memory_gauge, theme);
    render_usage(frame, swap_area, " Swap ", &sample.swap, theme.swap_gauge, theme);

    match &sample.disk {
        Some(disk) => {
            let title = format!(" Disk {} ", disk.mount_point);
            render_usage(frame, disk_area, &title, &disk.usage, theme.disk_gauge, theme);
        }
        None => render_gauge(
            frame,
            disk_area,
            " Disk ",
            0.0,
            PLACEHOLDER.to_string(),
            theme.placeholder,
            theme,
        ),
    }
}

pub fn cpu_label(cpu: &CpuSample) -> String {
    format!(
        "{:.1}% ({} cores, {})",
        cpu.usage_percent,
        cpu.logical_cores,
        or_placeholder(cpu.frequency_mhz, |mhz| format!("{mhz} MHz"))
    )
}

fn render_usage(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    usage: &UsageSample,
    color: Color,
    theme: &Theme,
) {
    let percent = usage.percent();
    let label = usage_label(usage.used_bytes, usage.total_bytes, percent);
    render_gauge(frame, area, title, percent, label, color, theme);
}

fn render_gauge(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    percent: f32,
    label: String,
    color: Color,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD),
        ));

    let ratio = (f64::from(percent) / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color).bg(theme.gauge_unfilled))
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_label_with_and_without_frequency() {
        let mut cpu = CpuSample {
            usage_percent: 12.34,
            logical_cores: 8,
            frequency_mhz: Some(3200),
            temperature_c: None,
        };
        assert_eq!(cpu_label(&cpu), "12.3% (8 cores, 3200 MHz)");
        cpu.frequency_mhz = None;
        assert_eq!(cpu_label(&cpu), "12.3% (8 cores, N/A)");
    }
}
