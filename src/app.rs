use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::export::export_history;
use crate::system::collector::Collector;
use crate::system::history::{HistoryBuffer, HistoryEntry};
use crate::system::process::{ProcessRow, SortMode, top_processes};
use crate::system::snapshot::Sample;
use crate::ui::theme::{ColorSupport, Theme, resolve_color_support};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    ConfirmExport,
}

/// What happens to the history when the user quits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPolicy {
    #[default]
    Ask,
    Always,
    Never,
}

impl ExportPolicy {
    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" | "yes" => ExportPolicy::Always,
            "never" | "no" => ExportPolicy::Never,
            _ => ExportPolicy::Ask,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportPolicy::Ask => "ask on quit",
            ExportPolicy::Always => "always on quit",
            ExportPolicy::Never => "never on quit",
        }
    }
}

/// Result of the last export attempt, reported after the terminal is restored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportOutcome {
    #[default]
    Skipped,
    Written(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub export: KeyCode,
    pub help: KeyCode,
    pub cycle_sort: KeyCode,
    pub cycle_theme: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            export: parse_key(&kb.export).unwrap_or(KeyCode::Char('e')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.export), "Export history now"),
            (key_label(self.cycle_sort), "Cycle process sort"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

/// Transient message shown in the status bar until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub ok: bool,
    pub created: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, ok: bool) -> Self {
        Self {
            text: text.into(),
            ok,
            created: Instant::now(),
        }
    }
}

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub sample: Sample,
    pub history: HistoryBuffer,
    pub top_processes: Vec<ProcessRow>,
    pub top_limit: usize,
    pub sort_mode: SortMode,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub keybinds: ResolvedKeybinds,
    pub export_path: PathBuf,
    pub export_policy: ExportPolicy,
    /// Export performed on quit. On-demand exports only reach the status bar.
    pub export_outcome: ExportOutcome,
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let collector = Collector::new(&config.general.disk_mount);
        Self::with_collector(config, collector)
    }

    pub fn with_collector(config: Config, collector: Collector) -> Self {
        let color_support = resolve_color_support(&config.colors.color_support);
        let theme = Theme::from_config(&config.colors.theme, color_support);

        let mut app = App {
            running: true,
            collector,
            sample: Sample::default(),
            history: HistoryBuffer::new(config.general.history_length),
            top_processes: Vec::new(),
            top_limit: config.general.top_processes,
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            input_mode: InputMode::Normal,
            theme,
            color_support,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            export_path: config.export.path,
            export_policy: ExportPolicy::from_str_config(&config.export.on_exit),
            export_outcome: ExportOutcome::Skipped,
            status_message: None,
        };
        app.refresh_data();
        app
    }

    pub fn refresh_data(&mut self) {
        let sample = self.collector.refresh();
        self.apply_sample(sample);
    }

    /// Records a freshly collected sample: history, process ranking, status expiry.
    pub fn apply_sample(&mut self, sample: Sample) {
        self.history.push(HistoryEntry::from_sample(&sample));
        self.sample = sample;
        self.rank_processes();

        // Clear expired status messages (older than 3 seconds)
        if let Some(status) = &self.status_message
            && status.created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    fn rank_processes(&mut self) {
        self.top_processes =
            top_processes(self.sample.processes.clone(), self.sort_mode, self.top_limit);
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);

        match self.input_mode {
            InputMode::ConfirmExport => {
                if ctrl_c {
                    return Action::ForceQuit;
                }
                self.map_key_confirm(key)
            }
            _ if ctrl_c => Action::RequestQuit,
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.quit {
            return Action::RequestQuit;
        }
        if code == kb.export {
            return Action::ExportNow;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == kb.cycle_sort {
            return Action::CycleSortMode;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    fn map_key_confirm(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmExport(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmExport(false),
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::RequestQuit => match self.export_policy {
                ExportPolicy::Ask => self.input_mode = InputMode::ConfirmExport,
                ExportPolicy::Always => {
                    self.export_outcome = self.export();
                    self.running = false;
                }
                ExportPolicy::Never => self.running = false,
            },
            Action::ConfirmExport(accepted) => {
                if accepted {
                    self.export_outcome = self.export();
                }
                self.running = false;
            }
            Action::ForceQuit => self.running = false,
            Action::ExportNow => {
                self.status_message = match self.export() {
                    ExportOutcome::Written(path) => Some(StatusMessage::new(
                        format!("Exported history to {}", path.display()),
                        true,
                    )),
                    ExportOutcome::Failed(err) => {
                        Some(StatusMessage::new(format!("Export failed: {err}"), false))
                    }
                    ExportOutcome::Skipped => None,
                };
            }
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
                self.rank_processes();
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(self.color_support);
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::Refresh => self.refresh_data(),
            Action::None => {}
        }
    }

    fn export(&self) -> ExportOutcome {
        match export_history(&self.export_path, &self.history) {
            Ok(path) => ExportOutcome::Written(path),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "history export failed");
                ExportOutcome::Failed(format!("{err:#}"))
            }
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn confirming_export(&self) -> bool {
        self.input_mode == InputMode::ConfirmExport
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    /// Settings shown under the keybinds in the help overlay.
    pub fn help_settings(&self) -> Vec<(&'static str, String)> {
        vec![
            ("History", format!("{} samples", self.history.capacity())),
            ("Export", self.export_path.display().to_string()),
            ("Policy", self.export_policy.label().to_string()),
        ]
    }
}
