use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown wherever a reading could not be taken.
pub const PLACEHOLDER: &str = "N/A";

const MB: u64 = 1024 * 1024;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Whole mebibytes, rounded down.
pub fn to_mb(bytes: u64) -> u64 {
    bytes / MB
}

/// `used/total MB (pct%)` label used by every gauge.
pub fn usage_label(used_bytes: u64, total_bytes: u64, percent: f32) -> String {
    format!(
        "{}/{} MB ({:.0}%)",
        to_mb(used_bytes),
        to_mb(total_bytes),
        percent
    )
}

/// Right-aligned three-wide percentage, or the placeholder when missing.
pub fn percent_cell(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{v:3.0}"),
        None => format!("{PLACEHOLDER:>3}"),
    }
}

pub fn or_placeholder<T, F>(value: Option<T>, render: F) -> String
where
    F: FnOnce(T) -> String,
{
    value.map(render).unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pick_largest_unit() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2 KB");
        assert_eq!(format_bytes(5 * MB + MB / 2), "5.5 MB");
        assert_eq!(format_bytes(3 * 1024 * MB), "3.0 GB");
    }

    #[test]
    fn truncation_appends_ellipsis() {
        assert_eq!(truncate_unicode("short", 10), "short");
        assert_eq!(truncate_unicode("firefox-bin", 6), "firef\u{2026}");
    }

    #[test]
    fn usage_label_reports_whole_megabytes() {
        assert_eq!(usage_label(3 * MB + 10, 8 * MB, 37.6), "3/8 MB (38%)");
    }

    #[test]
    fn percent_cell_pads_values_and_placeholder() {
        assert_eq!(percent_cell(Some(7.4)), "  7");
        assert_eq!(percent_cell(Some(100.0)), "100");
        assert_eq!(percent_cell(None), "N/A");
    }

    #[test]
    fn missing_values_render_placeholder() {
        assert_eq!(or_placeholder(None::<f32>, |t| format!("{t:.0}°C")), "N/A");
        assert_eq!(or_placeholder(Some(41.2f32), |t| format!("{t:.0}°C")), "41°C");
    }
}
