pub mod export_prompt;
pub mod gauges;
pub mod header;
pub mod help;
pub mod history;
pub mod processes;
pub mod sensors;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::App;

const SENSOR_ROWS: u16 = 9;

pub fn draw(frame: &mut Frame, app: &App) {
    let _draw_span = tracing::debug_span!("ui.draw").entered();

    // table borders and header
    let process_rows = u16::try_from(app.top_limit)
        .unwrap_or(u16::MAX)
        .saturating_add(3);
    let [header_area, gauges_area, middle_area, processes_area, status_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(SENSOR_ROWS),
            Constraint::Length(process_rows),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    let [sensors_area, history_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(middle_area);

    header::render(
        frame,
        header_area,
        &app.sample,
        app.history.len(),
        &app.theme,
    );
    gauges::render(frame, gauges_area, &app.sample, &app.theme);
    sensors::render(frame, sensors_area, &app.sample, &app.theme);
    history::render(frame, history_area, &app.history, &app.theme);
    processes::render(
        frame,
        processes_area,
        &app.top_processes,
        app.sort_mode,
        &app.theme,
    );
    statusbar::render(
        frame,
        status_area,
        app.input_mode,
        &app.keybinds,
        app.status_message.as_ref(),
        &app.theme,
    );

    // Overlays are rendered last to appear on top
    if app.show_help() {
        help::render(
            frame,
            frame.area(),
            &app.help_entries(),
            &app.help_settings(),
            &app.theme,
        );
    }
    if app.confirming_export() {
        export_prompt::render(
            frame,
            frame.area(),
            &app.export_path,
            app.history.len(),
            &app.theme,
        );
    }
}
