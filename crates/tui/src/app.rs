//! Host application state.
//!
//! The rail is stateless with respect to navigation: the `App` plays the
//! caller. It owns the `RailInputs` and `SocialCounts`, applies runtime
//! messages, reacts to the `Effect`s the rail emits, and re-derives the rail
//! after every change.

use rail_types::{Effect, Hue, Msg, OrgRole, Organization, Project, RailInputs, SocialCounts, WorkspaceSnapshot};
use rail_util::Translator;
use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::ui::components::activity::{ActivityLevel, ActivityState};
use crate::ui::components::rail::RailState;
use crate::ui::theme::Theme;

/// Degrees between hues of consecutively created projects.
const NEW_PROJECT_HUE_STEP: u16 = 137;

/// The main application state.
#[derive(Debug)]
pub struct App {
    pub inputs: RailInputs,
    pub counts: SocialCounts,
    pub strings: Translator,
    pub theme: Box<dyn Theme>,
    pub rail: RailState,
    pub activity: ActivityState,
    pub focus: Focus,
    container_focus: FocusFlag,
    created_projects: usize,
    created_orgs: usize,
}

impl App {
    /// Builds the host from a snapshot.
    ///
    /// With `defer_projects` the project list starts empty and the loading
    /// indicator is shown until `Msg::ProjectsLoaded` arrives.
    pub fn new(snapshot: &WorkspaceSnapshot, defer_projects: bool, theme: Box<dyn Theme>, strings: Translator) -> Self {
        let inputs = RailInputs {
            is_signed_in: snapshot.signed_in,
            is_loading_projects: defer_projects,
            is_workspaces_active: snapshot.active_project_id.is_none(),
            projects: if defer_projects { Vec::new() } else { snapshot.projects.clone() },
            active_project_id: snapshot.active_project_id.clone(),
            organizations: snapshot.organizations.clone(),
            selected_org_id: snapshot.selected_org_id.clone().unwrap_or_default(),
        };

        let mut app = Self {
            inputs,
            counts: snapshot.counts,
            strings,
            theme,
            rail: RailState::new(),
            activity: ActivityState::default(),
            focus: Focus::default(),
            container_focus: FocusFlag::named("app"),
            created_projects: 0,
            created_orgs: 0,
        };
        app.sync_rail();
        app.rebuild_focus();
        app
    }

    /// Re-derives the rail from the current inputs.
    pub fn sync_rail(&mut self) {
        self.rail.sync(&self.inputs, &self.counts, &self.strings);
    }

    /// Rebuilds the focus tree; focus stays on the same flag when it still exists.
    pub fn rebuild_focus(&mut self) {
        let previous = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&*self, Some(previous));
        if self.focus.focused().is_none() {
            self.focus.first();
        }
    }

    /// Applies a runtime message. Returns `true` when the screen should be redrawn.
    pub fn update(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::Tick => {
                if !self.rail.is_loading() {
                    return false;
                }
                self.rail.advance_spinner();
                return true;
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
            }
            Msg::ProjectsLoaded(projects) => {
                info!(count = projects.len(), "projects loaded");
                self.inputs.projects = projects.clone();
                self.inputs.is_loading_projects = false;
                self.activity
                    .push(ActivityLevel::Success, format!("Loaded {} projects", projects.len()));
            }
            Msg::ProjectsLoadFailed(error) => {
                warn!(%error, "project load failed");
                self.inputs.is_loading_projects = false;
                self.activity
                    .push(ActivityLevel::Error, format!("Could not load projects: {error}"));
            }
            Msg::CountsUpdated(counts) => {
                self.counts = *counts;
            }
        }
        self.sync_rail();
        true
    }

    /// Reacts to a navigation event emitted by the rail.
    pub fn apply_effect(&mut self, effect: Effect) {
        debug!(?effect, "applying rail effect");
        match effect {
            Effect::OpenProject(id) => {
                let name = self
                    .inputs
                    .projects
                    .iter()
                    .find(|project| project.id == id)
                    .map(|project| project.name.clone())
                    .unwrap_or_else(|| id.clone());
                self.inputs.active_project_id = Some(id);
                self.inputs.is_workspaces_active = false;
                self.activity.push(ActivityLevel::Info, format!("Opened project {name}"));
            }
            Effect::OpenWorkspaces => {
                self.inputs.active_project_id = None;
                self.inputs.is_workspaces_active = true;
                self.activity.push(ActivityLevel::Info, "Opened workspaces");
            }
            Effect::CreateProject => {
                self.created_projects += 1;
                let hue = self
                    .inputs
                    .projects
                    .last()
                    .map(|project| project.color.rotate(NEW_PROJECT_HUE_STEP))
                    .unwrap_or_default();
                let project = Project::new(
                    format!("local-{}", self.created_projects),
                    format!("Untitled project {}", self.created_projects),
                    hue,
                );
                self.activity
                    .push(ActivityLevel::Success, format!("Created {}", project.name));
                self.inputs.active_project_id = Some(project.id.clone());
                self.inputs.is_workspaces_active = false;
                self.inputs.projects.push(project);
            }
            Effect::SignIn => {
                self.inputs.is_signed_in = true;
                self.activity.push(ActivityLevel::Success, "Signed in");
            }
            Effect::MigrateProjects => {
                self.activity
                    .push(ActivityLevel::Warning, "Migration of legacy projects requested");
            }
            Effect::SelectOrg(id) => {
                let name = self
                    .inputs
                    .organizations
                    .iter()
                    .find(|org| org.id == id)
                    .map(|org| org.name.clone())
                    .unwrap_or_else(|| id.clone());
                self.inputs.selected_org_id = id;
                self.activity
                    .push(ActivityLevel::Info, format!("Switched to organization {name}"));
            }
            Effect::CreateOrg => {
                self.created_orgs += 1;
                let org = Organization {
                    id: format!("local-org-{}", self.created_orgs),
                    name: format!("New organization {}", self.created_orgs),
                    role: OrgRole::Owner,
                };
                self.activity.push(ActivityLevel::Success, format!("Created {}", org.name));
                self.inputs.selected_org_id = org.id.clone();
                self.inputs.organizations.push(org);
            }
        }
        self.sync_rail();
    }

    /// Title of the content pane.
    pub fn current_view_title(&self) -> String {
        if let Some(project) = self.inputs.active_project() {
            return project.name.clone();
        }
        self.strings.t("appBar.workspaces").to_string()
    }

    /// Hue of the active project, used to accent the content pane.
    pub fn active_hue(&self) -> Option<Hue> {
        self.inputs.active_project().map(|project| project.color)
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.rail);
        builder.leaf_widget(&self.activity.focus);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    fn snapshot() -> WorkspaceSnapshot {
        rail_util::parse_snapshot(
            r#"{
                "signed_in": false,
                "organizations": [
                    { "id": "o1", "name": "Acme", "role": "owner" },
                    { "id": "o2", "name": "Beta", "role": "member" }
                ],
                "projects": [
                    { "id": "p1", "name": "Acme Corp", "color": 217 },
                    { "id": "p2", "name": "roadmap", "color": 300 }
                ]
            }"#,
        )
        .expect("valid snapshot")
    }

    fn app(defer: bool) -> App {
        App::new(&snapshot(), defer, Box::new(DraculaTheme::new()), Translator::english())
    }

    #[test]
    fn deferred_projects_show_loading_until_loaded() {
        let mut app = app(true);
        assert!(app.inputs.is_loading_projects);
        assert!(app.inputs.projects.is_empty());
        assert!(app.rail.is_loading());

        assert!(app.update(&Msg::Tick));
        assert!(app.update(&Msg::ProjectsLoaded(snapshot().projects)));
        assert!(!app.rail.is_loading());
        assert_eq!(app.inputs.projects.len(), 2);
        assert!(!app.update(&Msg::Tick));
    }

    #[test]
    fn load_failure_clears_loading_and_logs() {
        let mut app = app(true);
        app.update(&Msg::ProjectsLoadFailed("boom".into()));
        assert!(!app.inputs.is_loading_projects);
        assert_eq!(app.activity.entries.last().map(|e| e.level), Some(ActivityLevel::Error));
    }

    #[test]
    fn open_project_moves_highlight() {
        let mut app = app(false);
        assert!(app.inputs.is_workspaces_active);
        app.apply_effect(Effect::OpenProject("p2".into()));
        assert_eq!(app.inputs.active_project_id.as_deref(), Some("p2"));
        assert!(!app.inputs.is_workspaces_active);
        assert_eq!(app.current_view_title(), "roadmap");

        app.apply_effect(Effect::OpenWorkspaces);
        assert_eq!(app.inputs.active_project_id, None);
        assert_eq!(app.current_view_title(), "Workspaces");
    }

    #[test]
    fn sign_in_reveals_create_project() {
        let mut app = app(false);
        assert!(!app.rail.items.iter().any(|item| item.key() == "create-project"));
        app.apply_effect(Effect::SignIn);
        assert!(app.rail.items.iter().any(|item| item.key() == "create-project"));
        assert!(!app.rail.items.iter().any(|item| item.key() == "sign-in"));
    }

    #[test]
    fn created_projects_append_and_activate() {
        let mut app = app(false);
        app.apply_effect(Effect::CreateProject);
        let created = app.inputs.projects.last().expect("created project");
        assert_eq!(created.name, "Untitled project 1");
        assert_eq!(created.color.degrees(), (300 + NEW_PROJECT_HUE_STEP) % 360);
        assert_eq!(app.inputs.active_project_id.as_deref(), Some("local-1"));
    }

    #[test]
    fn org_effects_update_selection() {
        let mut app = app(false);
        assert_eq!(app.inputs.selected_org_id, "o1");
        app.apply_effect(Effect::SelectOrg("o2".into()));
        assert_eq!(app.inputs.selected_org_id, "o2");

        app.apply_effect(Effect::CreateOrg);
        assert_eq!(app.inputs.organizations.len(), 3);
        assert_eq!(app.inputs.selected_org().map(|org| org.role), Some(OrgRole::Owner));
    }
}
