use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::event::KeyEventKind;
use hostwatch::app::{App, ExportOutcome};
use hostwatch::config::{self, load_config, load_config_from_path};
use hostwatch::event::{Event, EventHandler};
use hostwatch::{perf, ui};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "hostwatch",
    about = "Live terminal dashboard for CPU, memory, disk, network and GPU usage"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of samples kept in the usage history
    #[arg(long)]
    history_length: Option<usize>,

    /// File the history is exported to
    #[arg(long)]
    export_path: Option<PathBuf>,

    /// Export on quit: ask, always, never
    #[arg(long)]
    export: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Write JSON logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level for --log-file: error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Run headless performance capture without interactive terminal.
    #[arg(long, default_value_t = false)]
    perf_capture: bool,

    /// Number of capture iterations for perf mode.
    #[arg(long, default_value_t = 30)]
    perf_iterations: usize,

    /// Headless terminal width for perf mode.
    #[arg(long, default_value_t = 120)]
    perf_width: u16,

    /// Headless terminal height for perf mode.
    #[arg(long, default_value_t = 40)]
    perf_height: u16,

    /// Perf tracing output file (JSON lines).
    #[arg(long, default_value = "target/perf/perf_spans.jsonl")]
    perf_output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if cli.perf_capture {
        return run_perf_capture(config, &cli);
    }

    if let Some(path) = &cli.log_file {
        let level = Level::from_str(&cli.log_level)
            .map_err(|_| eyre!("unknown log level `{}`", cli.log_level))?;
        perf::init_tracing_json(path, level, false)
            .wrap_err_with(|| format!("opening log file {}", path.display()))?;
    }

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config).await;
    ratatui::restore();

    report_exit(&result?);
    Ok(())
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<ExportOutcome> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms.max(100));
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);
    tracing::info!(tick_ms = tick_rate.as_millis() as u64, "monitor started");

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    true
                } else {
                    false
                }
            }
            Event::Tick => {
                app.refresh_data();
                true
            }
            Event::Resize => true,
        };
        if should_draw && app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    tracing::info!(entries = app.history.len(), "monitor stopped");
    Ok(app.export_outcome)
}

fn report_exit(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Written(path) => println!("History exported to {}", path.display()),
        ExportOutcome::Failed(err) => eprintln!("History export failed: {err}"),
        ExportOutcome::Skipped => {}
    }
    println!("Monitor closed.");
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(length) = cli.history_length {
        config.general.history_length = length;
    }
    if let Some(ref path) = cli.export_path {
        config.export.path = path.clone();
    }
    if let Some(ref policy) = cli.export {
        config.export.on_exit = policy.clone();
    }
    if let Some(ref support) = cli.color {
        config.colors.color_support = support.clone();
    }

    config
}

fn run_perf_capture(config: config::Config, cli: &Cli) -> Result<()> {
    if cli.perf_iterations == 0 {
        return Err(eyre!("--perf-iterations must be greater than 0"));
    }
    if cli.perf_width == 0 || cli.perf_height == 0 {
        return Err(eyre!(
            "--perf-width and --perf-height must be greater than 0"
        ));
    }

    perf::init_tracing_json(&cli.perf_output, Level::DEBUG, true)?;

    let mut app = App::new(config);
    let backend = ratatui::backend::TestBackend::new(cli.perf_width, cli.perf_height);
    let mut terminal = ratatui::Terminal::new(backend)?;
    let mut process_counts = Vec::with_capacity(cli.perf_iterations);

    for _ in 0..cli.perf_iterations {
        app.refresh_data();
        process_counts.push(app.sample.process_count);
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    let summary = perf::write_perf_summary(
        &cli.perf_output,
        cli.perf_iterations,
        cli.perf_width,
        cli.perf_height,
        &process_counts,
    )?;

    println!("Perf capture written:");
    println!(" - {}", cli.perf_output.display());
    println!(" - {}", summary.display());
    Ok(())
}
