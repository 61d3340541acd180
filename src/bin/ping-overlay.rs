use anyhow::{Context, Result};
use clap::Parser;
use ping_overlay::app::App;
use ping_overlay::config::{Cli, ConfigStore, SharedSettings};
use ping_overlay::logging::init_logging_with_config;
use ping_overlay::overlay::Size;
use ping_overlay::probe::{Prober, SystemPing};
use ping_overlay::sampler::{ActivityGate, SamplingLoop};
use ping_overlay::terminal::{spawn_input_reader, TerminalOverlay, TerminalSettingsEditor};
use ping_overlay::tray::{TrayCommand, TrayController};
use std::io::{BufReader, IsTerminal};
use std::sync::mpsc;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize structured logging with CLI options
    init_logging_with_config(&cli.log_level, cli.is_json_format());

    if let Err(e) = cli.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!(error = %e, "Ping overlay failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => ConfigStore::new(path.clone()),
        None => ConfigStore::open_default().context("Failed to locate the settings file")?,
    };
    let first_run = store.is_first_run();
    let settings = store.load();
    info!(
        path = %store.path().display(),
        host = %settings.host,
        first_run,
        "Settings loaded"
    );
    let show_dialog = cli.show_startup_dialog(first_run, settings.show_on_startup);

    let shared = SharedSettings::new(settings);
    let gate = ActivityGate::default();

    // The input thread needs the event sender before the controller exists:
    // the settings editor reads its lines through the same thread.
    let (tx, rx) = mpsc::channel();
    let lines = spawn_input_reader(BufReader::new(std::io::stdin()), tx.clone())
        .context("Failed to start command input")?;

    let screen = Size::new(cli.screen_width, cli.screen_height);
    let overlay = if std::io::stdout().is_terminal() {
        TerminalOverlay::new(screen)
    } else {
        TerminalOverlay::headless(screen)
    };
    let controller = TrayController::new(
        store,
        shared.clone(),
        overlay,
        TerminalSettingsEditor::new(lines, std::io::stdout()),
        gate.clone(),
    );
    let mut app = App::with_channel(controller, tx, rx);

    if show_dialog {
        if !app.controller_mut().open_settings(true) {
            info!("Startup settings declined, exiting");
            return Ok(());
        }
    } else {
        app.controller_mut().show_overlay();
    }

    let sampler = SamplingLoop::new(
        Prober::new(SystemPing::new()),
        shared,
        app.sink(),
        cli.interval(),
        cli.timeout(),
    )
    .with_gate(gate)
    .spawn()
    .context("Failed to start the sampler")?;

    app.controller_mut()
        .notice(&format!("Commands: {}", TrayCommand::USAGE));
    app.run();

    let stats = sampler.shutdown();
    info!(
        probes = stats.probes(),
        replies = stats.replies,
        timeouts = stats.timeouts,
        errors = stats.errors,
        idle_ticks = stats.idle_ticks,
        "Ping overlay stopped"
    );

    Ok(())
}
