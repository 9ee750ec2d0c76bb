//! Runtime: event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (alternate screen, raw mode, mouse capture).
//! - Drive a single event loop over input, runtime messages and animation ticks.
//! - Route input to `MainView` and hand returned `Effect`s to the host `App`.
//!
//! Event Loop Strategy
//! - A dedicated OS thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel, so `poll`/`read` never race across threads.
//! - Projects load on a Tokio task that reports back with `Msg::ProjectsLoaded`
//!   or `Msg::ProjectsLoadFailed`; an optional delay keeps the loading
//!   indicator visible.
//! - Smart ticking: a fast interval (100 ms) only while the spinner is shown;
//!   a long interval (5 s) when idle.
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rail_types::Msg;
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

const FAST_TICK: Duration = Duration::from_millis(100);
const IDLE_TICK: Duration = Duration::from_millis(5000);
const MOUSE_MOVE_THROTTLE: Duration = Duration::from_millis(16);

/// Where the project list is read from once the UI is up.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    File(PathBuf),
    Embedded(&'static str),
}

impl SnapshotSource {
    async fn read(&self) -> Result<rail_types::WorkspaceSnapshot> {
        match self {
            Self::File(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read snapshot {}", path.display()))?;
                rail_util::parse_snapshot(&text).with_context(|| format!("invalid snapshot {}", path.display()))
            }
            Self::Embedded(text) => rail_util::parse_snapshot(text).context("invalid embedded snapshot"),
        }
    }
}

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        let mut last_mouse_move = std::time::Instant::now();
        loop {
            match event::read() {
                Ok(event) => {
                    // Throttle mouse move events.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < MOUSE_MOVE_THROTTLE {
                            continue;
                        }
                        last_mouse_move = std::time::Instant::now();
                    }
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

/// Loads projects after `delay` and reports the outcome as a runtime message.
fn spawn_project_loader(source: SnapshotSource, delay: Duration, sender: mpsc::Sender<Msg>) {
    tokio::spawn(async move {
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
        let messages = match source.read().await {
            Ok(snapshot) => vec![Msg::ProjectsLoaded(snapshot.projects), Msg::CountsUpdated(snapshot.counts)],
            Err(error) => vec![Msg::ProjectsLoadFailed(format!("{error:#}"))],
        };
        for msg in messages {
            if sender.send(msg).await.is_err() {
                debug!("runtime closed before projects finished loading");
                break;
            }
        }
    });
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(())
}

fn is_quit_key(app: &App, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => app.rail.popover.is_none(),
        _ => false,
    }
}

/// Entry point for the TUI runtime: sets up the terminal, starts the input
/// thread and the project loader, runs the event loop and cleans up on exit.
pub async fn run_app(mut app: App, source: SnapshotSource, load_delay: Duration) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let (msg_sender, mut msg_receiver) = mpsc::channel::<Msg>(16);
    spawn_project_loader(source, load_delay, msg_sender);

    let mut main_view = MainView::new();
    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    info!("rail started");

    let mut current_interval = if app.rail.is_loading() { FAST_TICK } else { IDLE_TICK };
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let result = loop {
        if let Err(error) = render(&mut terminal, &mut app, &mut main_view) {
            break Err(error);
        }

        let target_interval = if app.rail.is_loading() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    break Ok(());
                };
                match event {
                    Event::Key(key) if is_quit_key(&app, &key) => break Ok(()),
                    Event::Key(key) => {
                        let effects = main_view.handle_key_events(&mut app, key);
                        main_view.apply_effects(&mut app, effects);
                    }
                    Event::Mouse(mouse) => {
                        let effects = main_view.handle_mouse_events(&mut app, mouse);
                        main_view.apply_effects(&mut app, effects);
                    }
                    Event::Resize(width, height) => {
                        app.update(&Msg::Resize(width, height));
                    }
                    Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                }
            }
            Some(msg) = msg_receiver.recv() => {
                app.update(&msg);
                app.rebuild_focus();
            }
            _ = ticker.tick() => {
                app.update(&Msg::Tick);
            }
            _ = signal::ctrl_c() => break Ok(()),
        }
    };

    cleanup_terminal(&mut terminal)?;
    info!("rail stopped");
    result
}
