//! Terminal Dashboard
//!
//! Draws the four regions with ratatui and feeds key presses back into the
//! mounted [`Dashboard`]. Terminal input and fetch results are multiplexed
//! in one `select!` loop, so the screen is redrawn as soon as either
//! arrives.

pub mod app;
pub mod ui;

pub use app::App;

use chrono::FixedOffset;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use crate::dashboard::Dashboard;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the dashboard until the user quits, then unmount it
pub async fn run(dashboard: Dashboard, offset: FixedOffset) -> io::Result<()> {
    let mut app = App::new(dashboard, offset);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    let restored = restore_terminal(&mut terminal);

    app.dashboard.unmount();
    result.and(restored)
}

async fn event_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    let mut events = EventStream::new();

    while app.running {
        let area = terminal.draw(|frame| ui::render(frame, app))?.area;
        app.set_map_area(ui::layout(area).map);

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                // Resizes and everything else just redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
            Some(outcome) = app.dashboard.next_update(), if !app.dashboard.is_settled() => {
                app.on_outcome(outcome);
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    undo_on_error(execute!(stdout, EnterAlternateScreen), disable_raw_mode)?;
    undo_on_error(Terminal::new(CrosstermBackend::new(stdout)), || {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)
    })
}

/// Run `undo` when `result` is an error; the original error wins
fn undo_on_error<T>(result: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if result.is_err() {
        if let Err(e) = undo() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
    result
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
