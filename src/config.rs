use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::export::DEFAULT_EXPORT_PATH;
use crate::system::collector::DEFAULT_DISK_MOUNT;
use crate::system::history::DEFAULT_CAPACITY;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub export: ExportConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub history_length: usize,
    pub top_processes: usize,
    pub default_sort: String,
    pub disk_mount: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            history_length: DEFAULT_CAPACITY,
            top_processes: 5,
            default_sort: "cpu".to_string(),
            disk_mount: DEFAULT_DISK_MOUNT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub on_exit: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            path: PathBuf::from(DEFAULT_EXPORT_PATH),
            on_exit: "ask".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub color_support: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            color_support: "auto".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub export: String,
    pub help: String,
    pub cycle_sort: String,
    pub cycle_theme: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            export: "e".to_string(),
            help: "?".to_string(),
            cycle_sort: "s".to_string(),
            cycle_theme: "t".to_string(),
            refresh: "r".to_string(),
        }
    }
}

/// Parses a keybind name such as `q`, `Enter` or `F5`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hostwatch").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.refresh_rate_ms, 2000);
        assert_eq!(config.general.history_length, 10);
        assert_eq!(config.general.top_processes, 5);
        assert_eq!(config.general.disk_mount, "/");
        assert_eq!(config.export.path, PathBuf::from("system_monitor.log"));
        assert_eq!(config.export.on_exit, "ask");
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 500
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 500);
        // Other fields should be defaults
        assert_eq!(config.general.history_length, 10);
        assert_eq!(config.export.on_exit, "ask");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
refresh_rate_ms = 1000
history_length = 30
top_processes = 8
default_sort = "memory"
disk_mount = "/home"

[export]
path = "/tmp/usage.log"
on_exit = "always"

[colors]
theme = "light"
color_support = "256"

[keybinds]
quit = "x"
export = "F2"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.refresh_rate_ms, 1000);
        assert_eq!(config.general.history_length, 30);
        assert_eq!(config.general.top_processes, 8);
        assert_eq!(config.general.default_sort, "memory");
        assert_eq!(config.general.disk_mount, "/home");
        assert_eq!(config.export.path, PathBuf::from("/tmp/usage.log"));
        assert_eq!(config.export.on_exit, "always");
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.colors.color_support, "256");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.export, "F2");
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.refresh_rate_ms, 2000);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("hostwatch_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.history_length, 10);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn parse_key_names() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("F5"), Some(KeyCode::F(5)));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("nonsense"), None);
    }
}
