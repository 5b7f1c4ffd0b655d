//! Kickoff - browse football teams from the terminal
//!
//! A terminal UI application that lists football teams, shows team details
//! and squads, and keeps a list of favorite teams. Responses are cached on
//! disk for thirty minutes.

use std::io;
use std::panic;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use kickoff::app::App;
use kickoff::cache::{ExpiringCache, FileStorage};
use kickoff::cli::{Cli, StartupConfig};
use kickoff::data::{Favorites, HttpFetcher, TeamsDataService};
use kickoff::nav::MemoryHistory;
use kickoff::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Picks the cache directory: the CLI override, then the XDG cache dir, then a temp dir
fn open_storage(cache_dir: Option<PathBuf>) -> FileStorage {
    match cache_dir {
        Some(dir) => FileStorage::with_dir(dir),
        None => FileStorage::new()
            .unwrap_or_else(|| FileStorage::with_dir(std::env::temp_dir().join("kickoff"))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments before any terminal setup
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let storage = Arc::new(open_storage(config.cache_dir.clone()));
    if let Err(e) = logging::init(storage.dir()) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    info!(
        path = %config.initial_path,
        proxy = config.deployment.is_proxy(),
        cache_dir = %storage.dir().display(),
        "starting kickoff"
    );

    let service = TeamsDataService::new(
        HttpFetcher::new(),
        config.deployment.clone(),
        ExpiringCache::new(Arc::clone(&storage)),
    );
    let favorites = Favorites::load(Arc::clone(&storage));
    let mut app = App::new(
        service,
        favorites,
        MemoryHistory::starting_at(config.initial_path.clone()),
    );

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial render shows the loading state
    terminal.draw(|f| ui::render(f, &app))?;

    // Trigger initial data load
    app.load_teams(config.force_refresh).await;
    app.process_pending().await;
    if let Some(error) = &app.error {
        warn!(%error, "initial team load failed");
    }

    // Main event loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }

        // Loads triggered by the key (refresh, newly opened detail)
        app.process_pending().await;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
