use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

const TRACKED_SPANS: [&str; 3] = ["collector.refresh", "collector.build_sample", "ui.draw"];

/// Installs a JSON-lines subscriber writing to `output_path`.
///
/// The terminal belongs to the dashboard, so logs only ever go to a file.
/// With `span_timings` every span close is logged with its busy time, which
/// is what [`write_perf_summary`] reads back.
pub fn init_tracing_json(output_path: &Path, max_level: Level, span_timings: bool) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)?;
    let span_events = if span_timings {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(span_events)
        .with_max_level(max_level)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

/// Summarizes span timings from a perf capture into `perf_summary.json`
/// next to the span log, returning the summary path.
pub fn write_perf_summary(
    span_log_path: &Path,
    iterations: usize,
    width: u16,
    height: u16,
    process_counts: &[usize],
) -> Result<PathBuf> {
    let summary = PerfSummary {
        generated_at_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| eyre!("system clock is before UNIX_EPOCH: {e}"))?
            .as_secs(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        iterations,
        width,
        height,
        span_log_path: span_log_path.display().to_string(),
        process_counts: summarize_process_counts(process_counts)?,
        spans: parse_span_stats(span_log_path)?,
    };

    let summary_path = span_log_path.with_file_name("perf_summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    Ok(summary_path)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn parse_span_stats(path: &Path) -> Result<BTreeMap<String, SpanStats>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut samples: HashMap<String, Vec<f64>> = HashMap::new();
    for &name in &TRACKED_SPANS {
        samples.insert(name.to_string(), Vec::new());
    }

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        let Some(span_name) = extract_span_name(&value) else {
            continue;
        };
        let Some(us) = extract_busy_duration(&value).and_then(parse_duration_to_us) else {
            continue;
        };
        if let Some(vec) = samples.get_mut(span_name) {
            vec.push(us);
        }
    }

    let mut out = BTreeMap::new();
    for &name in &TRACKED_SPANS {
        let mut values = samples.remove(name).unwrap_or_default();
        out.insert(name.to_string(), summarize_samples(&mut values));
    }
    Ok(out)
}

fn extract_span_name(value: &Value) -> Option<&str> {
    value
        .get("span")
        .and_then(|span| span.get("name"))
        .and_then(Value::as_str)
        .or_else(|| {
            value
                .get("spans")
                .and_then(Value::as_array)
                .and_then(|arr| arr.last())
                .and_then(|span| span.get("name"))
                .and_then(Value::as_str)
        })
}

fn extract_busy_duration(value: &Value) -> Option<&str> {
    value
        .get("fields")
        .and_then(|f| f.get("time.busy"))
        .and_then(Value::as_str)
}

fn parse_duration_to_us(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if let Some(v) = s.strip_suffix("ns") {
        return v.trim().parse::<f64>().ok().map(|n| n / 1000.0);
    }
    if let Some(v) = s.strip_suffix("µs").or_else(|| s.strip_suffix("μs")) {
        return v.trim().parse::<f64>().ok();
    }
    if let Some(v) = s.strip_suffix("us") {
        return v.trim().parse::<f64>().ok();
    }
    if let Some(v) = s.strip_suffix("ms") {
        return v.trim().parse::<f64>().ok().map(|ms| ms * 1000.0);
    }
    if let Some(v) = s.strip_suffix('s') {
        return v.trim().parse::<f64>().ok().map(|secs| secs * 1_000_000.0);
    }
    None
}

fn summarize_samples(values: &mut [f64]) -> SpanStats {
    if values.is_empty() {
        return SpanStats::default();
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let last = values.len() - 1;
    let p50_idx = ((last as f64) * 0.50).round() as usize;
    let p95_idx = ((last as f64) * 0.95).round() as usize;

    SpanStats {
        count: values.len(),
        p50_us: round_2(values[p50_idx]),
        p95_us: round_2(values[p95_idx]),
        max_us: round_2(values[last]),
    }
}

fn summarize_process_counts(process_counts: &[usize]) -> Result<ProcessCountStats> {
    if process_counts.is_empty() {
        return Err(eyre!("no process counts captured during perf run"));
    }
    let mut values = process_counts.to_vec();
    values.sort_unstable();
    Ok(ProcessCountStats {
        min: values[0],
        p50: values[(values.len() - 1) / 2],
        max: values[values.len() - 1],
    })
}

fn round_2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
struct PerfSummary {
    generated_at_unix_s: u64,
    os: String,
    arch: String,
    iterations: usize,
    width: u16,
    height: u16,
    span_log_path: String,
    process_counts: ProcessCountStats,
    spans: BTreeMap<String, SpanStats>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ProcessCountStats {
    min: usize,
    p50: usize,
    max: usize,
}

#[derive(Debug, Default, Serialize, PartialEq)]
struct SpanStats {
    count: usize,
    p50_us: f64,
    p95_us: f64,
    max_us: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_parsing_supported_units() {
        assert_eq!(parse_duration_to_us("100ns"), Some(0.1));
        assert_eq!(parse_duration_to_us("10us"), Some(10.0));
        assert_eq!(parse_duration_to_us("10µs"), Some(10.0));
        assert_eq!(parse_duration_to_us("2.5ms"), Some(2500.0));
        assert_eq!(parse_duration_to_us("1s"), Some(1_000_000.0));
        assert_eq!(parse_duration_to_us("soon"), None);
    }

    #[test]
    fn sample_summary_percentiles() {
        let mut values: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let stats = summarize_samples(&mut values);
        assert_eq!(stats.count, 100);
        assert_eq!(stats.p50_us, 51.0);
        assert_eq!(stats.p95_us, 95.0);
        assert_eq!(stats.max_us, 100.0);
        assert_eq!(summarize_samples(&mut []), SpanStats::default());
    }

    #[test]
    fn process_counts_require_samples() {
        assert!(summarize_process_counts(&[]).is_err());
        let stats = summarize_process_counts(&[300, 100, 200]).unwrap();
        assert_eq!(stats, ProcessCountStats { min: 100, p50: 200, max: 300 });
    }

    #[test]
    fn span_log_is_summarized() {
        let dir = std::env::temp_dir().join(format!("hostwatch_perf_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let log = dir.join("spans.jsonl");
        let lines = [
            r#"{"fields":{"message":"close","time.busy":"120µs","time.idle":"3µs"},"span":{"name":"ui.draw"}}"#,
            r#"{"fields":{"message":"close","time.busy":"2ms"},"span":{"name":"collector.refresh"}}"#,
            r#"{"fields":{"message":"close","time.busy":"80µs"},"span":{"name":"ui.draw"}}"#,
            r#"{"fields":{"message":"history exported"},"spans":[{"name":"export.write"}]}"#,
            "not json",
        ];
        fs::write(&log, lines.join("\n")).unwrap();

        let stats = parse_span_stats(&log).unwrap();
        assert_eq!(stats["ui.draw"].count, 2);
        assert_eq!(stats["ui.draw"].max_us, 120.0);
        assert_eq!(stats["collector.refresh"].p50_us, 2000.0);
        assert_eq!(stats["collector.build_sample"].count, 0);

        let summary = write_perf_summary(&log, 3, 100, 40, &[10, 12, 11]).unwrap();
        assert_eq!(summary, dir.join("perf_summary.json"));
        let json: Value = serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
        assert_eq!(json["iterations"], 3);
        assert_eq!(json["process_counts"]["p50"], 11);
        let _ = fs::remove_dir_all(&dir);
    }
}
