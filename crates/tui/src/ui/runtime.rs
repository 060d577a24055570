//! Runtime: event loop and input routing for the picker TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single loop that handles input and the modal transition.
//! - Route keys to the picker component and apply the returned `Effect`s.
//! - Render only when `App` marks itself dirty.
//!
//! Ticking strategy: a 16 ms interval while the picker transition runs, a
//! long idle interval otherwise. Each tick carries the measured time since
//! the previous one, so the transition advances by real elapsed time.
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use datepick_types::{PickerConfig, Selection};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::{App, Msg};
use crate::ui::components::DatePickerComponent;
use crate::ui::components::component::Component;

const FAST_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Spawn a task that polls the terminal and forwards `crossterm` events over
/// a Tokio channel.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(64);

    tokio::task::spawn_blocking(move || {
        loop {
            match event::poll(FAST_INTERVAL) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                }
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Err(e) = sender.blocking_send(event) {
                            tracing::debug!("input receiver dropped: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read event: {}", e);
                        break;
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to poll events: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, component: &mut DatePickerComponent) -> Result<()> {
    terminal.draw(|frame| crate::ui::main::draw(frame, app, component))?;
    app.dirty = false;
    Ok(())
}

/// Route one input event and apply the resulting effects.
fn handle_input_event(app: &mut App, component: &mut DatePickerComponent, input_event: Event) {
    let effects = match input_event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => component.handle_key_events(app, key_event),
        Event::Resize(width, height) => {
            let msg = Msg::Resize(width, height);
            app.update(msg);
            component.handle_message(app, &msg)
        }
        _ => Vec::new(),
    };
    for effect in effects {
        app.apply(effect);
    }
}

/// Sets up the terminal, runs the loop until the user commits or quits, and
/// restores the terminal. Returns the last committed selection.
pub async fn run_app(config: PickerConfig) -> Result<Option<Selection>> {
    let mut input_receiver = spawn_input_task();
    let mut app = App::new(config);
    let mut component = DatePickerComponent;
    let mut terminal = setup_terminal()?;

    let mut current_interval = IDLE_INTERVAL;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    let outcome = async {
        render(&mut terminal, &mut app, &mut component)?;

        while !app.should_quit {
            let target_interval = if app.picker.is_animating() { FAST_INTERVAL } else { IDLE_INTERVAL };
            if target_interval != current_interval {
                current_interval = target_interval;
                ticker = time::interval(current_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                last_tick = Instant::now();
            }

            tokio::select! {
                maybe_event = input_receiver.recv() => {
                    match maybe_event {
                        Some(event) => handle_input_event(&mut app, &mut component, event),
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let msg = Msg::Tick(now.duration_since(last_tick));
                    last_tick = now;
                    app.update(msg);
                    for effect in component.handle_message(&mut app, &msg) {
                        app.apply(effect);
                    }
                }
                _ = signal::ctrl_c() => { break; }
            }

            if app.dirty {
                render(&mut terminal, &mut app, &mut component)?;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    cleanup_terminal(&mut terminal)?;
    outcome?;
    Ok(app.last_selection().cloned())
}
