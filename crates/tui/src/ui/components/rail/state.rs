use rail_types::{Effect, RailInputs, SocialCounts};
use rail_util::Translator;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::debug;

use super::popover::{AccountPopoverState, RailPopover, SignInAction, SignInPromptState};
use super::view::{RailItem, RailItemKind, RailSection, derive_rail_items};

/// Braille spinner frames used by the loading indicator.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// What activating a rail item leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RailActivation {
    /// An event for the caller.
    Emit(Effect),
    /// A popover was opened; nothing leaves the rail.
    OpenedPopover,
    /// The item is display-only.
    Ignored,
}

/// State for the navigation rail.
///
/// Holds the items derived from the caller's inputs on the last sync, the
/// rat-focus flags for the interactive ones, the open popover and layout
/// bookkeeping for hit testing. Items are never edited in place; they are
/// re-derived on every [`RailState::sync`].
#[derive(Debug, Default, Clone)]
pub struct RailState {
    pub items: Vec<RailItem>,
    /// Focus flags aligned with `items`, keyed by [`RailItem::key`].
    pub item_focus_flags: Vec<(String, FocusFlag)>,
    /// Focus flag for the rail in the global focus tree.
    pub container_focus: FocusFlag,
    pub popover: Option<RailPopover>,
    pub spinner_frame: usize,
    /// Number of top-section items scrolled out of view.
    pub top_offset: usize,
    /// Last rendered area of the rail; used for mouse hit testing.
    pub last_area: Rect,
    /// Last computed per-item areas, aligned with `items`. Hidden items get an empty rect.
    pub per_item_areas: Vec<Rect>,
    /// Last rendered popover area.
    pub popover_area: Rect,
}

impl RailState {
    pub fn new() -> Self {
        Self {
            container_focus: FocusFlag::named("rail"),
            ..Self::default()
        }
    }

    /// Re-derives the items from caller state.
    ///
    /// Focus flags survive for items whose key is unchanged. A popover whose
    /// trigger is no longer derived (e.g. the sign-in prompt after signing in)
    /// is closed.
    pub fn sync(&mut self, inputs: &RailInputs, counts: &SocialCounts, strings: &Translator) {
        self.items = derive_rail_items(inputs, counts, strings);

        let previous = std::mem::take(&mut self.item_focus_flags);
        self.item_focus_flags = self
            .items
            .iter()
            .map(|item| {
                let key = item.key();
                let flag = previous
                    .iter()
                    .find(|(existing, _)| *existing == key)
                    .map(|(_, flag)| flag.clone())
                    .unwrap_or_else(|| FocusFlag::named(&format!("rail.{key}")));
                (key, flag)
            })
            .collect();

        if let Some(popover) = &self.popover
            && !self.items.iter().any(|item| item.key() == popover.anchor_key())
        {
            debug!(anchor = popover.anchor_key(), "closing popover; trigger no longer visible");
            self.popover = None;
        }

        let top_len = self.items.iter().filter(|item| item.section() == RailSection::Top).count();
        self.top_offset = self.top_offset.min(top_len.saturating_sub(1));
    }

    pub fn is_loading(&self) -> bool {
        self.items.iter().any(|item| item.kind == RailItemKind::Loading)
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner_symbol(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn any_item_focused(&self) -> bool {
        self.item_focus_flags.iter().any(|(_, flag)| flag.get())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.item_focus_flags.iter().position(|(_, flag)| flag.get())
    }

    pub fn focused_item(&self) -> Option<&RailItem> {
        self.focused_index().and_then(|index| self.items.get(index))
    }

    /// Index of the first interactive item.
    pub fn first_interactive(&self) -> Option<usize> {
        self.items.iter().position(RailItem::is_interactive)
    }

    /// Index of the last interactive item.
    pub fn last_interactive(&self) -> Option<usize> {
        self.items.iter().rposition(RailItem::is_interactive)
    }

    /// Next interactive item from the focused one, wrapping, skipping display-only items.
    pub fn cycle_focus(&self, forward: bool) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let Some(start) = self.focused_index() else {
            return if forward { self.first_interactive() } else { self.last_interactive() };
        };
        (1..=len)
            .map(|step| if forward { (start + step) % len } else { (start + len - step) % len })
            .find(|&index| self.items[index].is_interactive())
    }

    pub fn focus_flag(&self, index: usize) -> Option<&FocusFlag> {
        self.item_focus_flags.get(index).map(|(_, flag)| flag)
    }

    /// Activates the item at `index`.
    pub fn activate(&mut self, index: usize, inputs: &RailInputs) -> RailActivation {
        let Some(item) = self.items.get(index) else {
            return RailActivation::Ignored;
        };
        match &item.kind {
            RailItemKind::Workspaces { .. } => RailActivation::Emit(Effect::OpenWorkspaces),
            RailItemKind::Project { id, .. } => RailActivation::Emit(Effect::OpenProject(id.clone())),
            RailItemKind::CreateProject => RailActivation::Emit(Effect::CreateProject),
            RailItemKind::SignInPrompt => {
                self.popover = Some(RailPopover::SignIn(SignInPromptState::default()));
                RailActivation::OpenedPopover
            }
            RailItemKind::Account { .. } => {
                self.popover = Some(RailPopover::Account(AccountPopoverState::new(
                    &inputs.organizations,
                    &inputs.selected_org_id,
                )));
                RailActivation::OpenedPopover
            }
            RailItemKind::Loading | RailItemKind::Stars { .. } | RailItemKind::Online { .. } => RailActivation::Ignored,
        }
    }

    /// Closes the sign-in prompt through one of its actions.
    ///
    /// Returns the action's effect, or `None` when the prompt was not open.
    pub fn dismiss_sign_in(&mut self, action: SignInAction) -> Option<Effect> {
        match self.popover.take() {
            Some(RailPopover::SignIn(_)) => Some(action.effect()),
            other => {
                self.popover = other;
                None
            }
        }
    }

    pub fn close_popover(&mut self) {
        self.popover = None;
        self.popover_area = Rect::default();
    }

    /// Moves `top_offset` so the item at `index` is inside the top section.
    pub fn ensure_visible(&mut self, index: usize, inner_height: u16) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        if item.section() != RailSection::Top {
            return;
        }
        let top: Vec<&RailItem> = self.items.iter().filter(|i| i.section() == RailSection::Top).collect();
        let position = self.items[..index].iter().filter(|i| i.section() == RailSection::Top).count();
        let budget = top_budget(&self.items, inner_height);

        if position < self.top_offset {
            self.top_offset = position;
            return;
        }
        while self.top_offset < position {
            let used: u16 = top[self.top_offset..=position].iter().map(|i| i.height()).sum();
            if used <= budget {
                break;
            }
            self.top_offset += 1;
        }
    }
}

/// Rows available to the top section once the bottom section is pinned.
pub fn top_budget(items: &[RailItem], inner_height: u16) -> u16 {
    let bottom: u16 = items
        .iter()
        .filter(|item| item.section() == RailSection::Bottom)
        .map(RailItem::height)
        .sum();
    inner_height.saturating_sub(bottom)
}

/// Lays out rail items inside `inner`.
///
/// Top items stack downward starting at `top_offset`; items scrolled out or
/// not fitting above the bottom section get an empty rect. Bottom items stack
/// upward from the bottom edge, keeping their relative order.
pub fn layout_items(items: &[RailItem], inner: Rect, top_offset: usize) -> Vec<Rect> {
    let mut rects = vec![Rect::default(); items.len()];
    let budget = top_budget(items, inner.height);

    let mut y = inner.y;
    let top_limit = inner.y.saturating_add(budget);
    for (seen, (index, item)) in items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.section() == RailSection::Top)
        .enumerate()
    {
        if seen < top_offset {
            continue;
        }
        let height = item.height();
        if y.saturating_add(height) > top_limit {
            break;
        }
        rects[index] = Rect::new(inner.x, y, inner.width, height);
        y += height;
    }

    let mut bottom_y = inner.bottom();
    for (index, item) in items.iter().enumerate().rev() {
        if item.section() != RailSection::Bottom {
            continue;
        }
        let height = item.height();
        if bottom_y < inner.y.saturating_add(height) {
            break;
        }
        bottom_y -= height;
        rects[index] = Rect::new(inner.x, bottom_y, inner.width, height);
    }

    rects
}

impl HasFocus for RailState {
    /// Builds a focus subtree with each interactive item as a leaf under the
    /// rail container flag.
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for (item, (_, flag)) in self.items.iter().zip(&self.item_focus_flags) {
            if item.is_interactive() {
                builder.leaf_widget(flag);
            }
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_types::{Hue, OrgRole, Organization, Project};

    fn inputs(signed_in: bool, projects: usize) -> RailInputs {
        let hue = Hue::new(200).expect("valid hue");
        RailInputs {
            is_signed_in: signed_in,
            projects: (0..projects)
                .map(|i| Project::new(format!("p{i}"), format!("Project {i}"), hue))
                .collect(),
            organizations: vec![Organization {
                id: "org".into(),
                name: "Acme".into(),
                role: OrgRole::Admin,
            }],
            selected_org_id: "org".into(),
            ..RailInputs::default()
        }
    }

    fn synced(inputs: &RailInputs, counts: SocialCounts) -> RailState {
        let mut state = RailState::new();
        state.sync(inputs, &counts, &Translator::english());
        state
    }

    fn index_of(state: &RailState, key: &str) -> usize {
        state.items.iter().position(|item| item.key() == key).expect("item present")
    }

    #[test]
    fn sign_in_prompt_dismissal_emits_exactly_one_effect() {
        for action in SignInAction::ALL {
            let state_inputs = inputs(false, 1);
            let mut state = synced(&state_inputs, SocialCounts::default());
            let trigger = index_of(&state, "sign-in");
            assert_eq!(state.activate(trigger, &state_inputs), RailActivation::OpenedPopover);

            assert_eq!(state.dismiss_sign_in(action), Some(action.effect()));
            assert!(state.popover.is_none());
            assert_eq!(state.dismiss_sign_in(action), None);
        }
    }

    #[test]
    fn dismiss_sign_in_leaves_account_popover_alone() {
        let state_inputs = inputs(true, 0);
        let mut state = synced(&state_inputs, SocialCounts::default());
        state.activate(index_of(&state, "account"), &state_inputs);
        assert_eq!(state.dismiss_sign_in(SignInAction::SignIn), None);
        assert!(matches!(state.popover, Some(RailPopover::Account(_))));
    }

    #[test]
    fn sync_closes_popover_when_trigger_disappears() {
        let mut state_inputs = inputs(false, 0);
        let mut state = synced(&state_inputs, SocialCounts::default());
        state.activate(index_of(&state, "sign-in"), &state_inputs);
        assert!(state.popover.is_some());

        state_inputs.is_signed_in = true;
        state.sync(&state_inputs, &SocialCounts::default(), &Translator::english());
        assert!(state.popover.is_none());
    }

    #[test]
    fn activation_maps_items_to_effects() {
        let state_inputs = inputs(true, 2);
        let mut state = synced(&state_inputs, SocialCounts::default());
        assert_eq!(
            state.activate(index_of(&state, "workspaces"), &state_inputs),
            RailActivation::Emit(Effect::OpenWorkspaces)
        );
        assert_eq!(
            state.activate(index_of(&state, "project:p1"), &state_inputs),
            RailActivation::Emit(Effect::OpenProject("p1".into()))
        );
        assert_eq!(
            state.activate(index_of(&state, "create-project"), &state_inputs),
            RailActivation::Emit(Effect::CreateProject)
        );
    }

    #[test]
    fn focus_flags_survive_resync_by_key() {
        let state_inputs = inputs(true, 2);
        let mut state = synced(&state_inputs, SocialCounts::default());
        let index = index_of(&state, "project:p1");
        state.item_focus_flags[index].1.set(true);

        let mut more = state_inputs.clone();
        more.projects.insert(0, Project::new("new", "New", Hue::default()));
        state.sync(&more, &SocialCounts::default(), &Translator::english());

        assert_eq!(state.focused_item().map(RailItem::key).as_deref(), Some("project:p1"));
    }

    #[test]
    fn cycle_focus_skips_display_only_items() {
        let mut state_inputs = inputs(false, 1);
        state_inputs.is_loading_projects = true;
        let counts = SocialCounts {
            stars: Some(5),
            online: None,
        };
        let state = synced(&state_inputs, counts);
        assert_eq!(state.cycle_focus(true), Some(0));

        let prompt = index_of(&state, "sign-in");
        state.item_focus_flags[prompt].1.set(true);
        assert_eq!(state.cycle_focus(true), Some(index_of(&state, "project:p0")));

        state.item_focus_flags[prompt].1.set(false);
        let account = index_of(&state, "account");
        state.item_focus_flags[account].1.set(true);
        assert_eq!(state.cycle_focus(true), Some(0));
    }

    #[test]
    fn layout_pins_bottom_section_and_hides_overflow() {
        let state = synced(
            &inputs(true, 10),
            SocialCounts {
                stars: Some(1),
                online: Some(2),
            },
        );
        let inner = Rect::new(1, 1, 7, 20);
        let rects = layout_items(&state.items, inner, 0);

        let account = index_of(&state, "account");
        let stars = index_of(&state, "stars");
        let online = index_of(&state, "online");
        assert_eq!(rects[online], Rect::new(1, 20, 7, 1));
        assert_eq!(rects[stars], Rect::new(1, 19, 7, 1));
        assert_eq!(rects[account], Rect::new(1, 16, 7, 3));

        // budget = 20 - 5 = 15 rows -> five 3-row top items
        let visible_top = rects[..account].iter().filter(|r| !r.is_empty()).count();
        assert_eq!(visible_top, 5);
        assert_eq!(rects[0], Rect::new(1, 1, 7, 3));
    }

    #[test]
    fn ensure_visible_scrolls_top_section() {
        let mut state = synced(&inputs(true, 10), SocialCounts::default());
        // budget = 20 - 3 = 17 rows -> five 3-row items fit
        let last_project = index_of(&state, "project:p9");
        state.ensure_visible(last_project, 20);
        assert_eq!(state.top_offset, last_project - 4);

        let rects = layout_items(&state.items, Rect::new(0, 0, 7, 20), state.top_offset);
        assert!(!rects[last_project].is_empty());
        assert!(rects[0].is_empty());

        state.ensure_visible(0, 20);
        assert_eq!(state.top_offset, 0);
    }

    #[test]
    fn spinner_cycles_frames() {
        let mut state = RailState::new();
        let first = state.spinner_symbol();
        for _ in 0..SPINNER_FRAMES.len() {
            state.advance_spinner();
        }
        assert_eq!(state.spinner_symbol(), first);
    }
}
