use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use rail_types::Effect;
use ratatui::{
    prelude::*,
    style::Style,
    widgets::Paragraph,
};

use super::components::rail::RAIL_WIDTH;
use super::components::{ActivityComponent, Component, RailComponent};
use crate::app::App;

/// Root view: the rail on the left, the activity pane on the right and a
/// hint bar underneath. Rail popovers are drawn last so they overlay the pane.
#[derive(Default, Debug)]
pub struct MainView {
    pub rail_view: RailComponent,
    pub activity_view: ActivityComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies rail effects to the host and refreshes the focus tree, since
    /// effects may add or remove rail items.
    pub fn apply_effects(&mut self, app: &mut App, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        for effect in effects {
            app.apply_effect(effect);
        }
        app.rebuild_focus();
    }

    fn layout(area: Rect) -> [Rect; 3] {
        let [rail, right] = Layout::horizontal([Constraint::Length(RAIL_WIDTH), Constraint::Min(1)]).areas(area);
        let [content, hints] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(right);
        [rail, content, hints]
    }
}

impl Component for MainView {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.rail.popover.is_some() {
            return self.rail_view.handle_key_events(app, key);
        }

        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }

        if app.rail.container_focus.get() {
            return self.rail_view.handle_key_events(app, key);
        }
        if app.activity.focus.get() {
            return self.activity_view.handle_key_events(app, key);
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let popover_open = app.rail.popover.is_some();
        let effects = self.rail_view.handle_mouse_events(app, mouse);
        if popover_open {
            return effects;
        }
        let mut effects = effects;
        effects.extend(self.activity_view.handle_mouse_events(app, mouse));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Paragraph::new("").style(Style::default().bg(app.theme.roles().background));
        frame.render_widget(background, area);

        let [rail_area, content_area, hints_area] = Self::layout(area);
        self.rail_view.render(frame, rail_area, app);
        self.activity_view.render(frame, content_area, app);

        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.theme.text_muted_style());
        frame.render_widget(hints, hints_area);

        self.rail_view.render_popover(frame, area, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let label = app.strings.t("appBar.hints.label").to_string();
        let mut spans = vec![Span::styled(label, app.theme.text_muted_style())];
        if app.rail.popover.is_some() || app.rail.container_focus.get() {
            spans.extend(self.rail_view.get_hint_spans(app));
        } else if app.activity.focus.get() {
            spans.extend(self.activity_view.get_hint_spans(app));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use crossterm::event::KeyModifiers;
    use rail_types::WorkspaceSnapshot;
    use rail_util::Translator;

    fn app() -> App {
        let snapshot = rail_util::parse_snapshot(
            r#"{
                "signed_in": true,
                "organizations": [{ "id": "o1", "name": "Acme" }],
                "projects": [{ "id": "p1", "name": "Acme Corp", "color": 217 }]
            }"#,
        )
        .expect("valid snapshot");
        App::new(&snapshot, false, Box::new(DraculaTheme::new()), Translator::english())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn rail_has_initial_focus_and_tab_moves_to_activity() {
        let mut app = app();
        let mut view = MainView::new();
        assert!(app.rail.container_focus.get());

        let interactive = app.rail.items.iter().filter(|item| item.is_interactive()).count();
        for _ in 0..interactive {
            view.handle_key_events(&mut app, key(KeyCode::Tab));
        }
        assert!(app.activity.focus.get());
        assert!(!app.rail.container_focus.get());
    }

    #[test]
    fn created_project_becomes_focusable() {
        let mut app = app();
        let mut view = MainView::new();
        let create = app
            .rail
            .items
            .iter()
            .position(|item| item.key() == "create-project")
            .expect("create button");
        let flag = app.rail.focus_flag(create).cloned().expect("flag");
        app.focus.focus(&flag);

        let effects = view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::CreateProject]);
        view.apply_effects(&mut app, effects);

        let created = app
            .rail
            .items
            .iter()
            .position(|item| item.key() == "project:local-1")
            .expect("created badge");
        let created_flag = app.rail.focus_flag(created).cloned().expect("flag");
        app.focus.focus(&created_flag);
        assert!(created_flag.get());
    }

    #[test]
    fn hint_bar_uses_translated_strings() {
        let snapshot = rail_util::parse_snapshot(r#"{ "signed_in": true }"#).expect("valid snapshot");
        let overrides = [("appBar.hints.label", "Aide :"), ("appBar.hints.navigate", "Naviguer")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let mut app = App::new(
            &snapshot,
            false,
            Box::new(DraculaTheme::new()),
            Translator::with_overrides(overrides),
        );
        let mut view = MainView::new();
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(70, 12)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &mut app);
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let hint_line: String = (0..70).map(|x| buffer[(x, 11)].symbol()).collect();
        assert!(hint_line.contains("Aide : ↑/↓ Naviguer"), "{hint_line}");
        assert!(!hint_line.contains("Hints"), "{hint_line}");
    }

    #[test]
    fn empty_snapshot_still_renders() {
        let mut app = App::new(
            &WorkspaceSnapshot::default(),
            false,
            Box::new(DraculaTheme::new()),
            Translator::english(),
        );
        let mut view = MainView::new();
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(40, 12)).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area, &mut app);
            })
            .expect("draw");
    }
}
