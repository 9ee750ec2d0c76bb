//! # Rail TUI Library
//!
//! A terminal rendition of a workspace navigation rail: a narrow column of
//! buttons for the workspaces view, one badge per project, project creation,
//! the account switcher and social counters, next to an activity pane that
//! plays the host application.
//!
//! ## Architecture
//!
//! The rail derives what it shows from caller-owned state on every change and
//! reports activation back as `Effect`s; the host `App` applies them. Rendering
//! goes through ratatui components, focus through rat-focus, and the runtime
//! multiplexes input, loader messages and animation ticks on Tokio.

mod app;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rail_util::Translator;
use ratatui::{Terminal, backend::TestBackend};

pub use app::App;
pub use ui::components::rail::{RAIL_WIDTH, RailItem, RailItemKind, RailSection, derive_rail_items};
pub use ui::theme;

use ui::components::Component;
use ui::main_component::MainView;
use ui::runtime::SnapshotSource;

/// Workspace shown when no snapshot file is given.
pub const DEMO_SNAPSHOT: &str = include_str!("../assets/demo_workspace.json");

/// Options for the interactive terminal UI.
#[derive(Debug)]
pub struct RunOptions {
    /// Snapshot file; the built-in demo workspace when `None`.
    pub snapshot: Option<PathBuf>,
    /// Artificial delay before projects arrive.
    pub load_delay: Duration,
    pub theme: Box<dyn theme::Theme>,
    pub strings: Translator,
}

/// Runs the terminal UI until the user quits.
///
/// Organizations and sign-in state come from the snapshot right away; the
/// project list is loaded asynchronously so the loading indicator is shown
/// until it arrives.
pub async fn run(options: RunOptions) -> Result<()> {
    let (initial, source) = match options.snapshot {
        Some(path) => {
            let snapshot = rail_util::load_snapshot(&path)
                .with_context(|| format!("failed to load snapshot {}", path.display()))?;
            (snapshot, SnapshotSource::File(path))
        }
        None => {
            let snapshot = rail_util::parse_snapshot(DEMO_SNAPSHOT).context("invalid demo snapshot")?;
            (snapshot, SnapshotSource::Embedded(DEMO_SNAPSHOT))
        }
    };
    let app = App::new(&initial, true, options.theme, options.strings);
    ui::runtime::run_app(app, source, options.load_delay).await
}

/// Renders one frame of the UI off-screen and returns it as text lines with
/// trailing blanks trimmed.
pub fn render_snapshot(app: &mut App, width: u16, height: u16) -> Result<Vec<String>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).context("failed to create test terminal")?;
    let mut view = MainView::new();
    terminal
        .draw(|frame| {
            let area = frame.area();
            view.render(frame, area, app);
        })
        .context("failed to draw frame")?;

    let buffer = terminal.backend().buffer();
    let lines = (0..height)
        .map(|y| {
            let line: String = (0..width).map(|x| buffer[(x, y)].symbol()).collect();
            line.trim_end().to_string()
        })
        .collect();
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DraculaTheme;

    fn demo_app(defer: bool) -> App {
        let snapshot = rail_util::parse_snapshot(DEMO_SNAPSHOT).expect("demo snapshot");
        App::new(&snapshot, defer, Box::new(DraculaTheme::new()), Translator::english())
    }

    fn rail_column(lines: &[String]) -> String {
        lines
            .iter()
            .map(|line| line.chars().take(RAIL_WIDTH as usize).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn demo_renders_badges_and_counters() {
        let mut app = demo_app(false);
        let lines = render_snapshot(&mut app, 60, 30).expect("render");
        assert_eq!(lines.len(), 30);

        let rail = rail_column(&lines);
        for label in ["PR", "BT", "WR", "Q"] {
            assert!(rail.contains(label), "missing {label} in\n{rail}");
        }
        assert!(rail.contains("★ 12k"), "{rail}");
        assert!(rail.contains("● 1.3k"), "{rail}");
        assert!(rail.contains("AC"), "account initials missing in\n{rail}");
    }

    #[test]
    fn loading_shows_spinner_without_badges() {
        let mut app = demo_app(true);
        let lines = render_snapshot(&mut app, 60, 30).expect("render");
        let rail = rail_column(&lines);
        assert!(rail.contains(ui::components::rail::SPINNER_FRAMES[0]), "{rail}");
        assert!(!rail.contains("PR"), "{rail}");
    }

    #[test]
    fn activity_pane_titles_active_project() {
        let mut app = demo_app(false);
        let lines = render_snapshot(&mut app, 60, 30).expect("render");
        assert!(lines[0].contains("Product Roadmap"), "{}", lines[0]);
    }
}
