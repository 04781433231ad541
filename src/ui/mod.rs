pub mod components;
pub mod theme;

use crate::app::{event::handle_key_event, AppState};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, warn};

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = disable_raw_mode();
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();
    }
}

/// Runs the popup until the user quits. `watch_path` is the storage file;
/// changes made to it by other processes trigger a re-render.
pub fn run_tui(mut state: AppState, watch_path: &Path) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (store_tx, store_rx) = mpsc::channel();
    let _watcher = setup_store_watcher(watch_path, store_tx);

    let result = run_app(&mut terminal, &mut state, store_rx);
    terminal.show_cursor()?;

    result
}

fn setup_store_watcher(path: &Path, tx: mpsc::Sender<()>) -> Option<RecommendedWatcher> {
    let watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res
                && event.kind.is_modify()
            {
                let _ = tx.send(());
            }
        },
        Config::default(),
    );

    match watcher {
        Ok(mut w) => match w.watch(path, RecursiveMode::NonRecursive) {
            Ok(()) => Some(w),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Not watching history store");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "Could not create file watcher");
            None
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    store_rx: mpsc::Receiver<()>,
) -> Result<()> {
    loop {
        state.clear_expired_status_message();
        state.clear_expired_pending_key();

        terminal.draw(|f| {
            components::render(f, state);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key_event(key, state)?;
        }

        reload_if_store_changed(state, &store_rx)?;

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Drains pending change notifications and re-renders once if there were any.
fn reload_if_store_changed(state: &mut AppState, store_rx: &mpsc::Receiver<()>) -> Result<bool> {
    let mut should_reload = false;
    while store_rx.try_recv().is_ok() {
        should_reload = true;
    }
    if should_reload {
        debug!("History store changed on disk, re-rendering");
        state.refresh()?;
    }
    Ok(should_reload)
}
