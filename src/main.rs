use std::fs::OpenOptions;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use rotomdex::api::PokeApiClient;
use rotomdex::app::{App, AppMessage};
use rotomdex::cache::CatalogCache;
use rotomdex::favorites::FavoritesStore;
use rotomdex::prefs::PrefsStore;
use rotomdex::storage::{default_data_dir, FileStore, KeyValueStore, MemoryStore};
use rotomdex::terminal::{setup_panic_hook, TerminalGuard};
use rotomdex::ui;

/// Tick interval for spinner animation and the search debounce check.
const TICK_MS: u64 = 150;

const LOG_FILE: &str = "rotomdex.log";
const LOG_ENV: &str = "ROTOMDEX_LOG";

/// Route tracing output to a file under the data directory. Stdout belongs
/// to the TUI, so there is nowhere else to print. If the file cannot be
/// opened the app simply runs without logs.
fn init_tracing() {
    let Some(dir) = default_data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let store: Arc<dyn KeyValueStore> = match FileStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "data directory unavailable, state will not persist");
            Arc::new(MemoryStore::new())
        }
    };

    let client = Arc::new(PokeApiClient::new());
    let cache = Arc::new(CatalogCache::new(Arc::clone(&store)));
    let favorites = FavoritesStore::load(Arc::clone(&store));
    let prefs = PrefsStore::load(store);

    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, cache, favorites, prefs, message_tx);
    app.reload_catalog(false);

    setup_panic_hook();
    let mut guard = TerminalGuard::new()?;

    let result = run_app(&mut guard.terminal, &mut app, message_rx).await;

    guard.restore();
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut message_rx: mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    loop {
        if app.should_quit {
            return Ok(());
        }

        // Draw only when state changed since the last frame.
        if app.needs_redraw {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.needs_redraw = false;
        }

        let tick = tokio::time::sleep(Duration::from_millis(TICK_MS));

        tokio::select! {
            _ = tick => {
                app.tick();
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.mark_dirty();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "terminal event stream failed");
                    }
                    None => return Ok(()),
                }
            }

            message = message_rx.recv() => {
                match message {
                    Some(message) => app.handle_message(message),
                    None => return Ok(()),
                }
            }
        }
    }
}
