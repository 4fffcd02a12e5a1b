//! plica: collapsible heading sections with persisted fold state.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use plica::{app, config, folder, input, store, ui, watcher};
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "plica")]
#[command(about = "Collapsible heading sections with persisted fold state", long_about = None)]
struct Args {
    /// Files or directories to view
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Directory for persisted fold state
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Debounce delay before re-initialising after a document change (ms)
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(ms) = args.debounce_ms {
        cfg.debounce_ms = ms;
    }
    let state_dir = args
        .state_dir
        .unwrap_or_else(|| PathBuf::from(&cfg.state_dir));

    let documents = input::find_documents(&args.paths, &cfg.file_extensions)?;
    let Some(path) = documents.first().cloned() else {
        eprintln!("No matching files found");
        return Ok(());
    };

    // One independent state mapping per distinct document path
    let page_key = path.to_string_lossy().into_owned();
    let state = store::StateStore::new(Box::new(store::FileBackend::new(state_dir)));
    let engine = folder::Folder::new(state, page_key);
    let scheduler = watcher::Watcher::new(Duration::from_millis(cfg.debounce_ms));

    let mut app = app::App::new(path, engine, scheduler);
    if documents.len() > 1 {
        app.message = Some(format!("viewing 1 of {} matching documents", documents.len()));
    }
    app.startup(Instant::now());

    run_tui(app)
}

fn run_tui(mut app: app::App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app::App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
                    KeyCode::Char('r') => app.reload(Instant::now()),
                    _ => {}
                }
            }
        }

        let now = Instant::now();
        app.poll_source(now);
        app.sync(now);
    }
}
