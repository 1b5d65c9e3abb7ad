//! gem3d TUI Entry Point
//!
//! Usage:
//!   gem3d-tui [OPTIONS]
//!
//! Options:
//!   -m, --model <MODEL>       Model to query
//!       --base-url <URL>      Service base URL
//!   -c, --config <FILE>       Configuration file
//!       --timeout-secs <SECS> Request timeout
//!       --fps <FPS>           Animation frame rate
//!       --log-file <PATH>     Write logs to a file
//!
//! The API key is read from `GEMINI_API_KEY` (or `GEM3D_API_KEY`).

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gem3d_core::{ApiKey, Gem3dConfig, HttpTransport, ResponseFetcher, API_KEY_ENV};
use gem3d_tui::{App, Args, Submitter};

/// Install the tracing subscriber
///
/// The TUI owns the terminal, so events only go somewhere when a log file
/// is given.
fn init_logging(log_file: Option<&Path>, level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gem3d_tui={level},gem3d_core={level}")));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {path:?}"))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .init();

    Ok(())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
}

/// Startup file I/O (log file, config) happens here, before the runtime exists
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: gem3d-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it interactively, or over SSH with -t.");
        std::process::exit(1);
    }

    let config = args.load_config().context("Failed to load configuration")?;
    tracing::info!(
        model = %config.model,
        base_url = %config.base_url,
        source = %config.source(),
        "Configuration loaded"
    );

    // Read once; a missing key is reported per submission, not fatal
    let api_key = ApiKey::from_env();
    if api_key.is_none() {
        tracing::warn!("{API_KEY_ENV} is not set; requests will not be sent");
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(run(config, api_key))
}

async fn run(config: Gem3dConfig, api_key: Option<ApiKey>) -> Result<()> {
    let transport = HttpTransport::new(config.timeout).context("Failed to build HTTP client")?;
    let fetcher = ResponseFetcher::new(transport, config.endpoint());
    let submitter = Submitter::new(fetcher, api_key);

    // Restore the terminal before printing a panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    let mut app = App::new(&config, submitter, Rect::new(0, 0, size.width, size.height));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
