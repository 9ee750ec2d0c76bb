//! Visibility and labeling of rail items.
//!
//! [`derive_rail_items`] is a pure function of the caller's inputs: the same
//! inputs always produce the same ordered list, and nothing is cached between
//! calls. Rendering, focus and hit testing all work off this list.

use rail_types::{Hue, RailInputs, SocialCounts};
use rail_util::{NO_ORG_INITIALS, Translator, derive_initials, format_count};

/// Where an item is stacked inside the rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailSection {
    /// Stacked downward from the top edge.
    Top,
    /// Pinned to the bottom edge.
    Bottom,
}

/// What a rail item is, with everything needed to draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RailItemKind {
    Workspaces {
        active: bool,
    },
    /// Opens the sign-in / migration popover.
    SignInPrompt,
    Loading,
    Project {
        id: String,
        label: String,
        color: Hue,
        active: bool,
    },
    CreateProject,
    /// Opens the account popover; labeled with the selected organization's initials.
    Account {
        label: String,
    },
    Stars {
        text: String,
    },
    Online {
        text: String,
    },
}

/// A single derived rail item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailItem {
    pub kind: RailItemKind,
    /// Localized description shown while the item is focused.
    pub tooltip: String,
}

impl RailItem {
    fn new(kind: RailItemKind, tooltip: impl Into<String>) -> Self {
        Self {
            kind,
            tooltip: tooltip.into(),
        }
    }

    /// Stable identity used to carry focus across re-derivations.
    pub fn key(&self) -> String {
        match &self.kind {
            RailItemKind::Workspaces { .. } => "workspaces".into(),
            RailItemKind::SignInPrompt => "sign-in".into(),
            RailItemKind::Loading => "loading".into(),
            RailItemKind::Project { id, .. } => format!("project:{id}"),
            RailItemKind::CreateProject => "create-project".into(),
            RailItemKind::Account { .. } => "account".into(),
            RailItemKind::Stars { .. } => "stars".into(),
            RailItemKind::Online { .. } => "online".into(),
        }
    }

    pub fn section(&self) -> RailSection {
        match self.kind {
            RailItemKind::Account { .. } | RailItemKind::Stars { .. } | RailItemKind::Online { .. } => RailSection::Bottom,
            _ => RailSection::Top,
        }
    }

    /// Whether the item can take focus and be activated.
    pub fn is_interactive(&self) -> bool {
        !matches!(
            self.kind,
            RailItemKind::Loading | RailItemKind::Stars { .. } | RailItemKind::Online { .. }
        )
    }

    /// Rows the item occupies.
    pub fn height(&self) -> u16 {
        match self.kind {
            RailItemKind::Stars { .. } | RailItemKind::Online { .. } => 1,
            _ => 3,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(
            self.kind,
            RailItemKind::Workspaces { active: true } | RailItemKind::Project { active: true, .. }
        )
    }
}

/// Derives the ordered rail items for a snapshot of caller state.
///
/// Each rule is evaluated on its own:
/// - the workspaces button is always present, highlighted when active;
/// - the sign-in prompt is present when signed out;
/// - the loading indicator is present while projects load, signed in or not,
///   so a signed-out user whose projects are loading sees both;
/// - one badge per project, in the given order, highlighted only when its id
///   equals the active project id;
/// - the create-project button is present when signed in;
/// - the account button is always present;
/// - social counters appear only when their value is known.
pub fn derive_rail_items(inputs: &RailInputs, counts: &SocialCounts, strings: &Translator) -> Vec<RailItem> {
    let mut items = Vec::with_capacity(inputs.projects.len() + 7);

    items.push(RailItem::new(
        RailItemKind::Workspaces {
            active: inputs.is_workspaces_active,
        },
        strings.t("appBar.workspaces"),
    ));

    if !inputs.is_signed_in {
        items.push(RailItem::new(RailItemKind::SignInPrompt, strings.t("appBar.kanban.tooltip")));
    }

    if inputs.is_loading_projects {
        items.push(RailItem::new(RailItemKind::Loading, strings.t("appBar.loadingProjects")));
    }

    let active_id = inputs.active_project_id.as_deref();
    items.extend(inputs.projects.iter().map(|project| {
        RailItem::new(
            RailItemKind::Project {
                id: project.id.clone(),
                label: derive_initials(&project.name),
                color: project.color,
                active: active_id == Some(project.id.as_str()),
            },
            project.name.clone(),
        )
    }));

    if inputs.is_signed_in {
        items.push(RailItem::new(RailItemKind::CreateProject, strings.t("appBar.createProject")));
    }

    let account_label = inputs
        .selected_org()
        .map(|org| derive_initials(&org.name))
        .unwrap_or_else(|| NO_ORG_INITIALS.to_string());
    items.push(RailItem::new(
        RailItemKind::Account { label: account_label },
        strings.t("appBar.account"),
    ));

    if let Some(stars) = counts.stars {
        items.push(RailItem::new(
            RailItemKind::Stars {
                text: format_count(stars),
            },
            strings.t("appBar.stars"),
        ));
    }
    if let Some(online) = counts.online {
        items.push(RailItem::new(
            RailItemKind::Online {
                text: format_count(online),
            },
            strings.t("appBar.online"),
        ));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_types::{OrgRole, Organization, Project};

    fn hue(value: u16) -> Hue {
        Hue::new(value).expect("valid hue")
    }

    fn inputs(signed_in: bool, loading: bool) -> RailInputs {
        RailInputs {
            is_signed_in: signed_in,
            is_loading_projects: loading,
            is_workspaces_active: false,
            projects: vec![
                Project::new("p3", "zeta board", hue(10)),
                Project::new("p1", "Acme Corp", hue(217)),
                Project::new("p2", "roadmap", hue(120)),
            ],
            active_project_id: Some("p1".into()),
            organizations: vec![Organization {
                id: "org".into(),
                name: "Vibe Labs".into(),
                role: OrgRole::Owner,
            }],
            selected_org_id: "org".into(),
        }
    }

    fn derive(inputs: &RailInputs) -> Vec<RailItem> {
        derive_rail_items(inputs, &SocialCounts::default(), &Translator::english())
    }

    fn has(items: &[RailItem], wanted: &RailItemKind) -> bool {
        items.iter().any(|item| &item.kind == wanted)
    }

    #[test]
    fn badges_preserve_input_order() {
        let items = derive(&inputs(true, false));
        let ids: Vec<&str> = items
            .iter()
            .filter_map(|item| match &item.kind {
                RailItemKind::Project { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, ["p3", "p1", "p2"]);
    }

    #[test]
    fn badges_use_derived_initials_and_name_tooltip() {
        let items = derive(&inputs(true, false));
        let badge = items.iter().find(|item| item.key() == "project:p1").expect("badge p1");
        assert_eq!(badge.tooltip, "Acme Corp");
        assert!(matches!(&badge.kind, RailItemKind::Project { label, .. } if label == "AC"));
    }

    #[test]
    fn exactly_the_active_project_is_highlighted() {
        let items = derive(&inputs(true, false));
        let highlighted: Vec<String> = items.iter().filter(|item| item.is_highlighted()).map(RailItem::key).collect();
        assert_eq!(highlighted, ["project:p1"]);
    }

    #[test]
    fn unmatched_active_id_highlights_nothing() {
        let mut state = inputs(true, false);
        state.active_project_id = Some("gone".into());
        assert!(derive(&state).iter().all(|item| !item.is_highlighted()));

        state.active_project_id = None;
        assert!(derive(&state).iter().all(|item| !item.is_highlighted()));
    }

    #[test]
    fn create_project_requires_sign_in() {
        for loading in [false, true] {
            assert!(!has(&derive(&inputs(false, loading)), &RailItemKind::CreateProject));
            assert!(has(&derive(&inputs(true, loading)), &RailItemKind::CreateProject));
        }
    }

    #[test]
    fn loading_indicator_ignores_sign_in() {
        for signed_in in [false, true] {
            assert!(has(&derive(&inputs(signed_in, true)), &RailItemKind::Loading));
            assert!(!has(&derive(&inputs(signed_in, false)), &RailItemKind::Loading));
        }
    }

    #[test]
    fn signed_out_and_loading_shows_prompt_and_spinner_together() {
        let items = derive(&inputs(false, true));
        let keys: Vec<String> = items.iter().take(3).map(RailItem::key).collect();
        assert_eq!(keys, ["workspaces", "sign-in", "loading"]);
    }

    #[test]
    fn sign_in_prompt_only_when_signed_out() {
        assert!(has(&derive(&inputs(false, false)), &RailItemKind::SignInPrompt));
        assert!(!has(&derive(&inputs(true, false)), &RailItemKind::SignInPrompt));
    }

    #[test]
    fn workspaces_and_account_are_always_present() {
        for (signed_in, loading) in [(false, false), (false, true), (true, false), (true, true)] {
            let items = derive(&inputs(signed_in, loading));
            assert_eq!(items.first().map(RailItem::key).as_deref(), Some("workspaces"));
            assert!(has(&items, &RailItemKind::Account { label: "VL".into() }));
        }
    }

    #[test]
    fn account_without_selected_org_uses_placeholder() {
        let mut state = inputs(true, false);
        state.organizations.clear();
        state.selected_org_id.clear();
        let items = derive(&state);
        assert!(has(&items, &RailItemKind::Account { label: NO_ORG_INITIALS.into() }));
        assert_eq!(NO_ORG_INITIALS, "@");
    }

    #[test]
    fn workspaces_highlight_follows_flag() {
        let mut state = inputs(true, false);
        state.is_workspaces_active = true;
        assert_eq!(derive(&state)[0].kind, RailItemKind::Workspaces { active: true });
    }

    #[test]
    fn counters_hidden_until_known() {
        let state = inputs(true, false);
        let strings = Translator::english();
        let without = derive_rail_items(&state, &SocialCounts::default(), &strings);
        assert!(without.iter().all(|item| item.section() != RailSection::Bottom || item.key() == "account"));

        let counts = SocialCounts {
            stars: Some(12_345),
            online: Some(999),
        };
        let with = derive_rail_items(&state, &counts, &strings);
        let tail: Vec<&RailItemKind> = with.iter().rev().take(2).map(|item| &item.kind).collect();
        assert_eq!(
            tail,
            [
                &RailItemKind::Online { text: "999".into() },
                &RailItemKind::Stars { text: "12k".into() }
            ]
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let state = inputs(false, true);
        assert_eq!(derive(&state), derive(&state));
    }
}
