mod audio;
mod catalog;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod player;
mod storage;
mod view;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use audio::{EngineFactory, RodioEngineFactory};
use catalog::CatalogResolver;
use config::Settings;
use controller::AppController;
use storage::{ObjectStore, S3Store};
use view::AppView;

const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Bucket Player Starting ===");

    let settings = Settings::load().context("loading configuration")?;
    settings
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    // Optional start folder, e.g. `bucket-player albums/`
    let start_prefix = std::env::args().nth(1).unwrap_or_default();

    let http = reqwest::Client::builder()
        .build()
        .context("building HTTP client")?;
    let store = S3Store::new(&settings.storage);
    let resolver = CatalogResolver::new(store, &settings.catalog);
    let factory = RodioEngineFactory::new(http.clone()).context("opening audio output")?;

    let mut controller = AppController::new(resolver, factory, http, &settings);
    controller.open_prefix(&start_prefix);

    tracing::info!(bucket = %settings.storage.bucket, prefix = %start_prefix, "Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut controller, &settings.storage.bucket);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
        return Err(err.into());
    }

    tracing::info!("Bucket Player shutting down");
    Ok(())
}

fn run_app<S, F>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut AppController<S, F>,
    bucket: &str,
) -> io::Result<()>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    loop {
        controller.process_background();
        controller.model_mut().auto_clear_old_notifications();

        terminal.draw(|f| {
            AppView::render(f, controller.model(), bucket);
        })?;

        if event::poll(UI_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key);
            }
        }

        if controller.model().should_quit() {
            break;
        }
    }

    Ok(())
}
