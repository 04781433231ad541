use anyhow::{bail, Context, Result};
use clap::Parser;
use cliphist::app::AppState;
use cliphist::cli::{Cli, Commands};
use cliphist::clipboard::SystemClipboard;
use cliphist::config::Config;
use cliphist::controller::Controller;
use cliphist::history::{HistoryView, PLACEHOLDER};
use cliphist::keybindings::KeybindingCache;
use cliphist::storage::SqliteStore;
use cliphist::ui::{self, theme::Theme};
use cliphist::utils::paths::{ensure_directories_exist, get_log_path};
use cliphist::utils::unicode::single_line;
use dialoguer::Confirm;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            init_file_logging()?;
            run_popup()
        }
        Some(command) => {
            init_stderr_logging();
            let mut controller = open_controller()?;
            match command {
                Commands::Capture => handle_capture(&mut controller),
                Commands::List => handle_list(&controller),
                Commands::Copy { index } => handle_copy(&mut controller, index),
                Commands::Clear { yes } => handle_clear(&controller, yes),
            }
        }
    }
}

/// The popup owns stdout, so its logs go to a file.
fn init_file_logging() -> Result<()> {
    ensure_directories_exist()?;
    let log_path = get_log_path()?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn init_stderr_logging() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// The process exits right after a command, so copies go through the
/// one-shot clipboard to outlive it.
fn open_controller() -> Result<Controller> {
    let store = SqliteStore::open_default()?;
    let clipboard = SystemClipboard::one_shot();
    if clipboard.waits_for_new_owner() {
        debug!("Copies wait until another program takes the clipboard");
    }
    Ok(Controller::new(Box::new(store), Box::new(clipboard)))
}

fn run_popup() -> Result<()> {
    let config = Config::load()?;
    let store = SqliteStore::open_default()?;
    let watch_path = store.path().to_path_buf();

    info!(store = %watch_path.display(), "Opening clipboard history popup");

    let controller = Controller::new(Box::new(store), Box::new(SystemClipboard::new()));
    let state = AppState::new(
        controller,
        Theme::from_config(&config),
        KeybindingCache::from_config(&config.keybindings),
        config.timeoutlen,
        config.confirm_capture,
    )?;

    ui::run_tui(state, &watch_path)
}

fn handle_capture(controller: &mut Controller) -> Result<()> {
    let outcome = controller.capture_clipboard()?;
    if let Some(message) = outcome.confirmation() {
        println!("{message}");
    }
    Ok(())
}

fn handle_list(controller: &Controller) -> Result<()> {
    match controller.render()? {
        HistoryView::Placeholder => println!("{PLACEHOLDER}"),
        HistoryView::Items(items) => {
            for item in items {
                println!("{:>2}. {}", item.index + 1, single_line(&item.text));
            }
        }
    }
    Ok(())
}

fn handle_copy(controller: &mut Controller, index: usize) -> Result<()> {
    let view = controller.render()?;
    let Some(item) = index.checked_sub(1).and_then(|i| view.get(i)).cloned() else {
        bail!(
            "No entry {} in clipboard history ({} entries)",
            index,
            view.len()
        );
    };

    println!("Holding entry {index} on the clipboard until something else is copied");
    controller.copy_item(&item)?;
    println!("✓ Copied entry {index}");
    Ok(())
}

fn handle_clear(controller: &Controller, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Clear clipboard history?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    controller.clear_history()?;
    println!("✓ Clipboard history cleared");
    Ok(())
}
