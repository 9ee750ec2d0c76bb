//! Component system for the Rail TUI.
//!
//! Components are self-contained UI elements that handle their own events
//! and rendering while reporting navigation events back to the host through
//! [`Effect`]s. They never mutate caller-owned state directly.

use crossterm::event::{KeyEvent, MouseEvent};
use rail_types::Effect;
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::App;

/// A trait representing a UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: components receive input through `handle_key_events()`
///    and `handle_mouse_events()`; runtime messages go through `App::update`
/// 2. **Reporting**: handlers return the `Effect`s the host should apply
/// 3. **Rendering**: `render()` draws the component into the provided frame area
pub(crate) trait Component {
    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events that land on this component.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Besides drawing, implementations may record layout (areas used for hit
    /// testing) in their state. Anything else belongs in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while the component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }
}

/// Finds which of `areas` contains the point, restricted to `container`.
pub(crate) fn find_target_index_by_mouse_position(container: &Rect, areas: &[Rect], x: u16, y: u16) -> Option<usize> {
    if !container.contains((x, y).into()) {
        return None;
    }
    areas.iter().position(|area| area.contains((x, y).into()))
}
