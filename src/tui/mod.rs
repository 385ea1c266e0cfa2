mod app;
mod input;
mod message;
mod ui;

use crate::config::Config;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

pub use app::{
    AddField, AddForm, App, ModalState, Notification, NotifyKind, OpOutcome, PendingDelete,
    SPINNER_FRAMES,
};
pub use input::InputState;
pub use message::Message;
pub use ui::link_row;

pub async fn run(config: Config) -> Result<()> {
    // Check if stdout is a terminal
    if !std::io::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("linkdeck requires an interactive terminal");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config);

    // Initial load (non-blocking - UI shows immediately with loading state)
    app.start_load();

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();
    let mut input_state = InputState::new();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Wake up for the next tick or the search debounce deadline,
        // whichever comes first.
        let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if let Some(deadline) = app.search_deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(Instant::now()));
        }

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                let msg = input::dispatch(app, &mut input_state, key);
                if app.update(msg) {
                    return Ok(()); // Quit requested
                }
            }
        }

        // Handle pending chord timeout (non-blocking)
        if input_state.has_timed_out() {
            input_state.clear();
        }

        // Fire a due debounced search pass and drain completed service calls
        app.poll_search_debounce();
        app.poll_outcomes();

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
