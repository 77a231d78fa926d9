//! Runtime: unified event loop and input routing for the drawer TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode, mouse capture).
//! - Drive a single event loop that handles input and animations.
//! - Route input to `MainView` and dispatch returned `Effect`s to `App`.
//!
//! Event Loop Strategy
//! - A dedicated input thread polls `crossterm` and forwards events over a
//!   channel, keeping `poll()` and `read()` on one OS thread.
//! - Smart ticking: 16 ms while the drawer animates, 5 s when idle.
//! - Ctrl+C exits from both the key handler and the signal handler.
use std::{
    rc::Rc,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use nestdrawer_engine::dispatch_effects;
use nestdrawer_types::{Effect, Menu, Msg};
use rat_focus::FocusBuilder;
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;
use crate::{RunOptions, RunOutcome};

const FAST_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(5000);

/// Spawn a dedicated input thread that polls terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Mouse move events are throttled to one per 16 ms. The thread exits once the
/// receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    thread::spawn(move || {
        let mut last_mouse_move = Instant::now();
        while !sender.is_closed() {
            match event::poll(FAST_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("Failed to poll events: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < FAST_INTERVAL {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Renders a frame through `MainView`.
fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so structure changes are reflected
    let old_focus = std::mem::take(&mut app.focus);
    app.focus = Rc::new(FocusBuilder::rebuild_for(app, Some(Rc::unwrap_or_clone(old_focus))));
    if app.focus.focused().is_none() {
        app.restore_focus();
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Handle raw crossterm input events and return the effects they produced.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

fn apply_effects(app: &mut App, effects: Vec<Effect>) {
    if effects.is_empty() {
        return;
    }
    if let Err(never) = dispatch_effects(effects, app) {
        match never {}
    }
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the input
/// thread, runs the event loop, and restores the terminal on exit.
pub async fn run_app(menu: Arc<Menu>, options: RunOptions) -> Result<RunOutcome> {
    let loaded_theme = theme::load(options.theme.as_deref());
    debug!(theme = loaded_theme.definition.id, keep_open = options.keep_open, "starting drawer runtime");
    let mut app = App::new(menu, loaded_theme, options.keep_open);
    let mut main_view = MainView::new();

    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    result?;

    Ok(RunOutcome { activated: app.activated })
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    // Ticking strategy: fast while animating, very slow when idle.
    let mut current_interval = IDLE_INTERVAL;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;

    while !app.should_quit {
        let target_interval = if app.is_animating() { FAST_INTERVAL } else { IDLE_INTERVAL };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut needs_render = false;
        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                let effects = handle_input_event(app, main_view, event);
                apply_effects(app, effects);
                needs_render = true;
            }

            // Periodic animation tick
            _ = ticker.tick() => {
                let was_animating = app.is_animating();
                let effects = main_view.handle_message(app, Msg::Tick);
                apply_effects(app, effects);
                needs_render = was_animating;
            }

            // Handle Ctrl+C
            _ = signal::ctrl_c() => { break; }
        }

        if needs_render && !app.should_quit {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}
