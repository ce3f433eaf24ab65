mod app;
mod domain;
mod input;
mod model;
mod notifications;
mod persistence;
mod remote;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::Tab;
use model::TodoModel;
use persistence::{ensure_data_dir, init_local_dir, SlotStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Storage slot the todo list persists under
const STORE_KEY: &str = "tomatodo-todos";

#[derive(Parser)]
#[command(name = "tomatodo")]
#[command(about = "A terminal todo list with per-task pomodoro time tracking", long_about = None)]
struct Cli {
    /// URL of a pomodoro profile to load at startup
    /// (JSON: {"settings": {"work": seconds, "rest": seconds}})
    #[arg(long)]
    profile_url: Option<String>,

    /// View filter to start on: ALL, ACTIVE, or COMPLETED
    #[arg(long)]
    tab: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tomatodo directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized tomatodo directory: {}", data_dir.display());
            println!();
            println!("Tomatodo will now use this local directory for todo storage.");
            println!("Run 'tomatodo' to start.");
            Ok(())
        }
        None => run_tui(cli.profile_url, cli.tab),
    }
}

fn run_tui(profile_url: Option<String>, tab: Option<String>) -> Result<()> {
    // Ensure the data directory exists and show which one we're using
    let data_dir = ensure_data_dir()?;
    eprintln!("Using tomatodo directory: {}", data_dir.display());

    let store = SlotStore::new(data_dir);
    let mut model = TodoModel::new(store, STORE_KEY);

    if let Some(tag) = tab {
        match Tab::from_tag(&tag) {
            Some(tab) => model.set_selected_tab(tab)?,
            None => anyhow::bail!("Unknown tab '{}' (expected ALL, ACTIVE, or COMPLETED)", tag),
        }
    }

    // One-shot pomodoro profile fetch; on failure the defaults stay
    if let Some(url) = profile_url {
        match remote::fetch_pomodoro_profile(&url) {
            Ok(settings) => {
                model.update_pomodoro_settings(settings)?;
                eprintln!(
                    "Loaded pomodoro profile: work {}s / rest {}s",
                    settings.work_secs, settings.rest_secs
                );
            }
            Err(e) => eprintln!("Warning: could not load pomodoro profile: {}", e),
        }
    }

    let mut app = AppState::new(model);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // Redraw after any mutation or interaction
        if app.take_redraw() {
            terminal.draw(|f| ui::render(f, app))?;
        }

        // Handle events with timeout so time keeps ticking
        if event::poll(ticker::poll_duration())? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Tick the tracked todo once per elapsed second
        app.maybe_tick()?;
    }
}
