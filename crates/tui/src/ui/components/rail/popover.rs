//! Popovers anchored to rail items.
//!
//! Two popovers hang off the rail: the sign-in prompt shown to signed-out
//! users and the account popover listing organizations. Their state is the
//! only state the rail keeps between renders, and every activation closes the
//! popover and yields exactly one [`Effect`].

use rail_types::{Effect, Organization};
use ratatui::layout::Rect;

/// The two actions of the sign-in prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInAction {
    #[default]
    SignIn,
    Migrate,
}

impl SignInAction {
    pub const ALL: [SignInAction; 2] = [SignInAction::SignIn, SignInAction::Migrate];

    pub fn effect(self) -> Effect {
        match self {
            Self::SignIn => Effect::SignIn,
            Self::Migrate => Effect::MigrateProjects,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::SignIn => "signIn",
            Self::Migrate => "appBar.kanban.migrateOldProjects",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::Migrate,
            Self::Migrate => Self::SignIn,
        }
    }
}

/// State of the open sign-in prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInPromptState {
    pub selected: SignInAction,
    /// Last rendered button areas, aligned with [`SignInAction::ALL`].
    pub action_areas: [Rect; 2],
}

impl SignInPromptState {
    pub fn action_at(&self, x: u16, y: u16) -> Option<SignInAction> {
        SignInAction::ALL
            .into_iter()
            .zip(self.action_areas)
            .find(|(_, area)| area.contains((x, y).into()))
            .map(|(action, _)| action)
    }
}

/// An entry of the account popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEntry {
    Org(usize),
    CreateOrg,
}

/// State of the open account popover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPopoverState {
    /// Index into organizations; `organizations.len()` is the create entry.
    pub cursor: usize,
    /// Last rendered row areas, one per entry.
    pub entry_areas: Vec<Rect>,
}

impl AccountPopoverState {
    /// Opens with the cursor on the selected organization.
    pub fn new(organizations: &[Organization], selected_org_id: &str) -> Self {
        let cursor = organizations.iter().position(|org| org.id == selected_org_id).unwrap_or(0);
        Self {
            cursor,
            entry_areas: Vec::new(),
        }
    }

    pub fn move_cursor(&mut self, organizations: &[Organization], forward: bool) {
        let len = organizations.len() + 1;
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    pub fn entry(&self, organizations: &[Organization], index: usize) -> Option<AccountEntry> {
        match index.cmp(&organizations.len()) {
            std::cmp::Ordering::Less => Some(AccountEntry::Org(index)),
            std::cmp::Ordering::Equal => Some(AccountEntry::CreateOrg),
            std::cmp::Ordering::Greater => None,
        }
    }

    pub fn entry_at(&self, organizations: &[Organization], x: u16, y: u16) -> Option<AccountEntry> {
        let index = self.entry_areas.iter().position(|area| area.contains((x, y).into()))?;
        self.entry(organizations, index)
    }

    /// Effect for an entry; organization callbacks pass ids through unchanged.
    pub fn effect_for(organizations: &[Organization], entry: &AccountEntry) -> Option<Effect> {
        match entry {
            AccountEntry::Org(index) => organizations.get(*index).map(|org| Effect::SelectOrg(org.id.clone())),
            AccountEntry::CreateOrg => Some(Effect::CreateOrg),
        }
    }
}

/// The popover currently open over the rail, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RailPopover {
    SignIn(SignInPromptState),
    Account(AccountPopoverState),
}

impl RailPopover {
    /// Key of the rail item the popover is anchored to.
    pub fn anchor_key(&self) -> &'static str {
        match self {
            Self::SignIn(_) => "sign-in",
            Self::Account(_) => "account",
        }
    }
}

/// Places a popover of `width` x `height` to the right of `anchor`, inside `bounds`.
///
/// The popover is top-aligned with the anchor and shifted up when it would
/// overflow the bottom edge. It shrinks when `bounds` is too small.
pub fn popover_rect(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let x = anchor.right().max(bounds.x);
    let available_width = bounds.right().saturating_sub(x);
    let width = width.min(available_width);
    let height = height.min(bounds.height);
    let y = anchor.y.min(bounds.bottom().saturating_sub(height)).max(bounds.y);
    Rect::new(x, y, width, height)
}
