//! The event loop: terminal input, background results and a status tick,
//! all applied to `App` on a single task.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::render;

/// What the loop should do after a key press.
pub enum Action {
    Continue,
    /// Leave the loop and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex three event sources:
/// - **Terminal input**: Key presses from crossterm's async event stream
/// - **Background tasks**: Trend fetches, favorites writes and the daily
///   digest timer via the `AppEvent` channel
/// - **Periodic tick**: 250ms timer for status expiry
///
/// A panic hook restores the terminal before the default hook prints, so a
/// crash never leaves the shell in raw mode. Returns when the user quits or
/// SIGINT/SIGTERM arrives.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Hook first: setup itself may panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();

    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    // Unix only; other targets wait on futures that never resolve
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        // Only render when state has changed
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        // Drain pending app events before handling more input so fetch
        // results are not starved by rapid typing.
        while let Ok(event) = event_rx.try_recv() {
            handle_app_event(app, event);
        }

        // Platform-specific signal futures
        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            // Signal handlers for graceful shutdown (highest priority)
            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            // Terminal input events
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.needs_redraw = true;
                        match handle_input(app, key.code, key.modifiers, &event_tx).await {
                            Ok(Action::Quit) => break,
                            Ok(Action::Continue) => {}
                            Err(e) => app.set_status(format!("Error: {}", e)),
                        }
                    }
                    Some(Ok(Event::Resize(..))) => app.needs_redraw = true,
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Terminal event stream failed");
                        break;
                    }
                    None => break,
                    _ => {}
                }
            }

            // Background task events (blocking recv for when queue was empty)
            Some(event) = event_rx.recv() => {
                handle_app_event(app, event);
            }

            // Periodic tick for status expiry
            _ = tick_interval.tick() => {
                handle_tick(app);
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Handle the periodic tick: expire the status message.
fn handle_tick(app: &mut App) {
    if app.clear_expired_status() {
        app.needs_redraw = true;
    }
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
