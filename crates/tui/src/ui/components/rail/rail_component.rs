use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rail_types::Effect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use super::popover::{AccountEntry, AccountPopoverState, RailPopover, SignInAction, popover_rect};
use super::state::{RailActivation, layout_items};
use super::view::{RailItemKind, RailSection};
use crate::app::App;
use crate::ui::components::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::{
    Theme,
    theme_helpers::{self as th, ButtonRenderOptions, render_button},
};

/// Total width of the rail including its border.
pub const RAIL_WIDTH: u16 = 9;

const WORKSPACES_GLYPH: &str = "⊞";
const SIGN_IN_GLYPH: &str = "☰";
const CREATE_PROJECT_GLYPH: &str = "+";
const STAR_GLYPH: &str = "★";
const ONLINE_GLYPH: &str = "●";

const SIGN_IN_POPOVER_WIDTH: u16 = 44;
const ACCOUNT_POPOVER_MIN_WIDTH: u16 = 28;

/// Vertical navigation rail.
///
/// Draws the items derived into [`super::RailState`] and turns activation into
/// [`Effect`]s. Popovers are drawn by [`RailComponent::render_popover`], which
/// the host calls after every other pane so they sit on top.
#[derive(Debug, Default)]
pub struct RailComponent;

impl RailComponent {
    fn focus_index(app: &mut App, index: usize) {
        if let Some(flag) = app.rail.focus_flag(index).cloned() {
            app.focus.focus(&flag);
        }
        let inner_height = app.rail.last_area.height.saturating_sub(2);
        app.rail.ensure_visible(index, inner_height);
    }

    fn activate(app: &mut App, index: usize) -> Vec<Effect> {
        let inputs = app.inputs.clone();
        match app.rail.activate(index, &inputs) {
            RailActivation::Emit(effect) => vec![effect],
            RailActivation::OpenedPopover => {
                debug!(index, "rail popover opened");
                Vec::new()
            }
            RailActivation::Ignored => Vec::new(),
        }
    }

    fn handle_popover_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            app.rail.close_popover();
            return Vec::new();
        }
        let organizations = app.inputs.organizations.clone();
        match app.rail.popover.as_mut() {
            Some(RailPopover::SignIn(prompt)) => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                    prompt.selected = prompt.selected.toggled();
                    Vec::new()
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let selected = prompt.selected;
                    app.rail.dismiss_sign_in(selected).into_iter().collect()
                }
                _ => Vec::new(),
            },
            Some(RailPopover::Account(account)) => match key.code {
                KeyCode::Down | KeyCode::Tab => {
                    account.move_cursor(&organizations, true);
                    Vec::new()
                }
                KeyCode::Up | KeyCode::BackTab => {
                    account.move_cursor(&organizations, false);
                    Vec::new()
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let effect = account
                        .entry(&organizations, account.cursor)
                        .and_then(|entry| AccountPopoverState::effect_for(&organizations, &entry));
                    app.rail.close_popover();
                    effect.into_iter().collect()
                }
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    /// Handles a left click inside the open popover. Returns `None` when the
    /// click landed outside of it.
    fn handle_popover_click(app: &mut App, x: u16, y: u16) -> Option<Vec<Effect>> {
        if !app.rail.popover_area.contains((x, y).into()) {
            return None;
        }
        let organizations = app.inputs.organizations.clone();
        let effects = match app.rail.popover.as_ref() {
            Some(RailPopover::SignIn(prompt)) => match prompt.action_at(x, y) {
                Some(action) => app.rail.dismiss_sign_in(action).into_iter().collect(),
                None => Vec::new(),
            },
            Some(RailPopover::Account(account)) => match account.entry_at(&organizations, x, y) {
                Some(entry) => {
                    let effect = AccountPopoverState::effect_for(&organizations, &entry);
                    app.rail.close_popover();
                    effect.into_iter().collect()
                }
                None => Vec::new(),
            },
            None => Vec::new(),
        };
        Some(effects)
    }

    fn scroll(app: &mut App, down: bool) {
        let rail = &mut app.rail;
        if down {
            let top_len = rail.items.iter().filter(|item| item.section() == RailSection::Top).count();
            rail.top_offset = (rail.top_offset + 1).min(top_len.saturating_sub(1));
        } else {
            rail.top_offset = rail.top_offset.saturating_sub(1);
        }
    }

    /// Renders the open popover, if any, anchored beside its trigger.
    ///
    /// `bounds` is the full frame area; the popover may extend over other panes.
    pub fn render_popover(&mut self, frame: &mut Frame, bounds: Rect, app: &mut App) {
        let Some(popover) = app.rail.popover.clone() else {
            app.rail.popover_area = Rect::default();
            return;
        };
        let anchor = app
            .rail
            .items
            .iter()
            .position(|item| item.key() == popover.anchor_key())
            .and_then(|index| app.rail.per_item_areas.get(index).copied())
            .unwrap_or(app.rail.last_area);

        match popover {
            RailPopover::SignIn(prompt) => {
                let area = popover_rect(anchor, SIGN_IN_POPOVER_WIDTH, 9, bounds);
                let action_areas = render_sign_in_popover(frame, area, app, prompt.selected);
                if let Some(RailPopover::SignIn(state)) = app.rail.popover.as_mut() {
                    state.action_areas = action_areas;
                }
                app.rail.popover_area = area;
            }
            RailPopover::Account(account) => {
                let rows = app.inputs.organizations.len().max(1) as u16 + 1;
                let width = account_popover_width(app);
                let area = popover_rect(anchor, width, rows + 2, bounds);
                let entry_areas = render_account_popover(frame, area, app, account.cursor);
                if let Some(RailPopover::Account(state)) = app.rail.popover.as_mut() {
                    state.entry_areas = entry_areas;
                }
                app.rail.popover_area = area;
            }
        }
    }
}

impl Component for RailComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.rail.popover.is_some() {
            return Self::handle_popover_key(app, key);
        }

        match key.code {
            KeyCode::Down => {
                if let Some(index) = app.rail.cycle_focus(true) {
                    Self::focus_index(app, index);
                }
            }
            KeyCode::Up => {
                if let Some(index) = app.rail.cycle_focus(false) {
                    Self::focus_index(app, index);
                }
            }
            KeyCode::Home => {
                if let Some(index) = app.rail.first_interactive() {
                    Self::focus_index(app, index);
                }
            }
            KeyCode::End => {
                if let Some(index) = app.rail.last_interactive() {
                    Self::focus_index(app, index);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = app.rail.focused_index() {
                    return Self::activate(app, index);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::ScrollDown if app.rail.last_area.contains((x, y).into()) => {
                Self::scroll(app, true);
                return Vec::new();
            }
            MouseEventKind::ScrollUp if app.rail.last_area.contains((x, y).into()) => {
                Self::scroll(app, false);
                return Vec::new();
            }
            _ => return Vec::new(),
        }

        if app.rail.popover.is_some() {
            if let Some(effects) = Self::handle_popover_click(app, x, y) {
                return effects;
            }
            app.rail.close_popover();
        }

        let hit = find_target_index_by_mouse_position(&app.rail.last_area, &app.rail.per_item_areas, x, y);
        let Some(index) = hit else {
            return Vec::new();
        };
        if !app.rail.items.get(index).is_some_and(|item| item.is_interactive()) {
            return Vec::new();
        }
        Self::focus_index(app, index);
        Self::activate(app, index)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.theme;
        let block = th::rail_block(theme, app.rail.any_item_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rects = layout_items(&app.rail.items, inner, app.rail.top_offset);
        for (index, (item, rect)) in app.rail.items.iter().zip(&rects).enumerate() {
            if rect.is_empty() {
                continue;
            }
            let is_focused = app.rail.focus_flag(index).is_some_and(|flag| flag.get());
            let options = ButtonRenderOptions::new(is_focused, item.is_highlighted());
            match &item.kind {
                RailItemKind::Workspaces { .. } => {
                    render_button(frame, *rect, WORKSPACES_GLYPH, theme, options);
                }
                RailItemKind::SignInPrompt => {
                    let options = options.with_style(th::button_primary_style(theme, is_focused));
                    render_button(frame, *rect, SIGN_IN_GLYPH, theme, options);
                }
                RailItemKind::Loading => {
                    let options = options.with_style(theme.accent_style());
                    render_button(frame, *rect, app.rail.spinner_symbol(), theme, options);
                }
                RailItemKind::Project { label, color, active, .. } => {
                    let style = if *active {
                        th::project_badge_active_style(theme, *color)
                    } else {
                        th::project_badge_style(theme)
                    };
                    render_button(frame, *rect, label, theme, options.with_style(style));
                }
                RailItemKind::CreateProject => {
                    render_button(frame, *rect, CREATE_PROJECT_GLYPH, theme, options);
                }
                RailItemKind::Account { label } => {
                    let options = options.with_style(theme.accent_bold_style());
                    render_button(frame, *rect, label, theme, options);
                }
                RailItemKind::Stars { text } => {
                    render_counter(frame, *rect, STAR_GLYPH, text, theme);
                }
                RailItemKind::Online { text } => {
                    render_counter(frame, *rect, ONLINE_GLYPH, text, theme);
                }
            }
        }

        app.rail.last_area = area;
        app.rail.per_item_areas = rects;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.theme;
        let hints: &[(&str, &str)] = match app.rail.popover {
            Some(RailPopover::SignIn(_)) => &[
                ("←/→", "appBar.hints.choose"),
                ("Enter", "appBar.hints.confirm"),
                ("Esc", "appBar.hints.close"),
            ],
            Some(RailPopover::Account(_)) => &[
                ("↑/↓", "appBar.hints.choose"),
                ("Enter", "appBar.hints.select"),
                ("Esc", "appBar.hints.close"),
            ],
            None => &[
                ("↑/↓", "appBar.hints.navigate"),
                ("Enter", "appBar.hints.open"),
                ("Tab", "appBar.hints.nextPane"),
            ],
        };
        let mut spans = th::build_hint_spans(theme, &app.strings, hints);
        if app.rail.popover.is_none()
            && let Some(item) = app.rail.focused_item()
        {
            spans.push(Span::styled(format!("  {}", item.tooltip), theme.text_secondary_style()));
        }
        spans
    }
}

fn render_counter(frame: &mut Frame, area: Rect, glyph: &str, text: &str, theme: &dyn Theme) {
    let line = Line::from(vec![
        Span::styled(glyph.to_string(), theme.counter_style()),
        Span::raw(" "),
        Span::styled(text.to_string(), theme.text_muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line).centered(), area);
}

fn account_popover_width(app: &App) -> u16 {
    let title = app.strings.t("appBar.account.title");
    let create = app.strings.t("appBar.account.createOrg");
    let widest = app
        .inputs
        .organizations
        .iter()
        .map(|org| org.name.width() + org.role.as_str().width() + 5)
        .chain([title.width() + 2, create.width() + 4])
        .max()
        .unwrap_or_default();
    (widest as u16 + 2).max(ACCOUNT_POPOVER_MIN_WIDTH)
}

/// Draws the sign-in prompt and returns the areas of its two buttons.
fn render_sign_in_popover(frame: &mut Frame, area: Rect, app: &App, selected: SignInAction) -> [Rect; 2] {
    let theme = &*app.theme;
    let block = th::popover_block(theme, Some(app.strings.t("appBar.kanban.title")));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [description_area, actions_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);
    frame.render_widget(
        Paragraph::new(app.strings.t("appBar.kanban.description"))
            .style(theme.text_secondary_style())
            .wrap(Wrap { trim: true }),
        description_area,
    );

    let labels = SignInAction::ALL.map(|action| app.strings.t(action.label_key()));
    let widths = labels.map(|label| Constraint::Length(label.width() as u16 + 4));
    let [sign_in_area, migrate_area] = Layout::horizontal(widths).spacing(1).areas(actions_area);
    let areas = [sign_in_area, migrate_area];

    for ((action, label), button_area) in SignInAction::ALL.into_iter().zip(labels).zip(areas) {
        let is_selected = action == selected;
        let style = match action {
            SignInAction::SignIn => th::button_primary_style(theme, is_selected),
            SignInAction::Migrate => th::button_secondary_style(theme, true, is_selected),
        };
        render_button(
            frame,
            button_area,
            label,
            theme,
            ButtonRenderOptions::new(is_selected, false).with_style(style),
        );
    }
    areas
}

/// Draws the account popover and returns one row area per entry.
fn render_account_popover(frame: &mut Frame, area: Rect, app: &App, cursor: usize) -> Vec<Rect> {
    let theme = &*app.theme;
    let block = th::popover_block(theme, Some(app.strings.t("appBar.account.title")));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let organizations = &app.inputs.organizations;
    let mut entries: Vec<(Option<AccountEntry>, Line)> = organizations
        .iter()
        .enumerate()
        .map(|(index, org)| {
            let marker = if org.id == app.inputs.selected_org_id { "✓ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, theme.success_style()),
                Span::styled(org.name.clone(), theme.text_primary_style()),
                Span::styled(format!(" · {}", org.role.as_str()), theme.text_muted_style()),
            ]);
            (Some(AccountEntry::Org(index)), line)
        })
        .collect();
    if organizations.is_empty() {
        let empty = Line::styled(format!("  {}", app.strings.t("appBar.account.noOrgs")), theme.text_muted_style());
        entries.push((None, empty));
    }
    entries.push((
        Some(AccountEntry::CreateOrg),
        Line::styled(format!("+ {}", app.strings.t("appBar.account.createOrg")), theme.accent_style()),
    ));

    let mut entry_areas = Vec::with_capacity(organizations.len() + 1);
    for (row, (entry, line)) in entries.into_iter().enumerate() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }
        let row_area = Rect::new(inner.x, y, inner.width, 1);
        let Some(entry) = entry else {
            frame.render_widget(Paragraph::new(line), row_area);
            continue;
        };
        let entry_index = match entry {
            AccountEntry::Org(index) => index,
            AccountEntry::CreateOrg => organizations.len(),
        };
        let mut paragraph = Paragraph::new(line);
        if entry_index == cursor {
            paragraph = paragraph.style(theme.selection_style().add_modifier(Modifier::BOLD));
        }
        frame.render_widget(paragraph, row_area);
        entry_areas.push(row_area);
    }
    entry_areas
}
