use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use rail_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{ActivityLevel, ActivityState};
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

/// Content pane next to the rail: the current view and the session activity log.
#[derive(Debug, Default)]
pub struct ActivityComponent;

fn level_style(theme: &dyn Theme, level: ActivityLevel) -> Style {
    match level {
        ActivityLevel::Info => theme.text_primary_style(),
        ActivityLevel::Success => theme.success_style(),
        ActivityLevel::Warning => theme.warning_style(),
        ActivityLevel::Error => theme.error_style(),
    }
}

impl Component for ActivityComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up => app.activity.scroll(true),
            KeyCode::Down => app.activity.scroll(false),
            KeyCode::End => app.activity.scroll_back = 0,
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if !app.activity.last_area.contains((mouse.column, mouse.row).into()) {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => app.activity.scroll(true),
            MouseEventKind::ScrollDown => app.activity.scroll(false),
            MouseEventKind::Down(_) => {
                app.focus.focus(&app.activity.focus);
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let title = app.current_view_title();
        let title_style = match app.active_hue() {
            Some(hue) => Style::default().fg(th::project_tint(theme, hue).0),
            None => theme.text_secondary_style(),
        };
        let block = th::block(theme, None, app.activity.focus.get())
            .title(Span::styled(title, title_style.add_modifier(Modifier::BOLD)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header_area, log_area] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
        let org = app
            .inputs
            .selected_org()
            .map(|org| org.name.as_str())
            .unwrap_or_else(|| app.strings.t("appBar.account.noOrgs"));
        let session = if app.inputs.is_signed_in { "signed in" } else { "signed out" };
        let header = Line::from(vec![
            Span::styled(org.to_string(), theme.accent_bold_style()),
            Span::styled(format!("  {session}  "), theme.text_muted_style()),
            Span::styled(
                format!("{} projects", app.inputs.projects.len()),
                theme.text_secondary_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        let lines: Vec<Line> = app
            .activity
            .visible(log_area.height as usize)
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(entry.at.format("%H:%M:%S ").to_string(), theme.text_muted_style()),
                    Span::styled(entry.message.clone(), level_style(theme, entry.level)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), log_area);

        app.activity.last_area = area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(
            &*app.theme,
            &app.strings,
            &[
                ("↑/↓", "appBar.hints.scroll"),
                ("End", "appBar.hints.latest"),
                ("Tab", "appBar.hints.nextPane"),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use crossterm::event::KeyModifiers;
    use rail_types::WorkspaceSnapshot;
    use rail_util::Translator;

    #[test]
    fn arrow_keys_scroll_the_log() {
        let mut app = App::new(
            &WorkspaceSnapshot::default(),
            false,
            Box::new(DraculaTheme::new()),
            Translator::english(),
        );
        for i in 0..3 {
            app.activity.push(ActivityLevel::Info, format!("{i}"));
        }
        let mut component = ActivityComponent;
        component.handle_key_events(&mut app, KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(app.activity.scroll_back, 1);
        component.handle_key_events(&mut app, KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(app.activity.scroll_back, 0);
    }
}
