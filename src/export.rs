use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};

use crate::format::percent_cell;
use crate::system::history::HistoryBuffer;

pub const DEFAULT_EXPORT_PATH: &str = "system_monitor.log";

const TITLE: &str = "System usage history";
const COLUMNS: &str = "CPU% | Mem% | Disk%";

/// Text written to the export file: a title, a column header, then one row
/// per retained entry, oldest first.
pub fn render_history(history: &HistoryBuffer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{COLUMNS}");
    for entry in history.iter() {
        let _ = writeln!(
            out,
            "{} | {} | {}",
            percent_cell(Some(entry.cpu)),
            percent_cell(Some(entry.memory)),
            percent_cell(entry.disk)
        );
    }
    out
}

/// Writes the history to `path`, replacing any previous export.
pub fn export_history(path: &Path, history: &HistoryBuffer) -> Result<PathBuf> {
    let _export_span =
        tracing::info_span!("export.write", path = %path.display(), entries = history.len())
            .entered();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating export directory {}", parent.display()))?;
    }
    fs::write(path, render_history(history))
        .wrap_err_with(|| format!("writing history to {}", path.display()))?;

    tracing::info!("history exported");
    Ok(path.to_path_buf())
}
