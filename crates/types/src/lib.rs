//! Shared data types for the Rail workspace.
//!
//! Everything here is plain data: the caller-owned inputs of the navigation
//! rail, the events it emits upward, and the messages the runtime feeds into
//! the host application.

mod hue;

pub use hue::{Hue, HueError, MAX_HUE};

use serde::{Deserialize, Serialize};

/// A project listed in the rail as a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque identifier.
    pub id: String,
    /// Free-text display name; the badge label is derived from it.
    pub name: String,
    /// Hue used to tint the badge while the project is active.
    pub color: Hue,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Hue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// The caller's role within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Owner,
    Admin,
    #[default]
    Member,
}

impl OrgRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// An organization the signed-in user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: OrgRole,
}

/// Caller-owned inputs from which the rail is derived on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RailInputs {
    pub is_signed_in: bool,
    pub is_loading_projects: bool,
    pub is_workspaces_active: bool,
    /// Ordered as the caller wants the badges ordered.
    pub projects: Vec<Project>,
    pub active_project_id: Option<String>,
    pub organizations: Vec<Organization>,
    pub selected_org_id: String,
}

impl RailInputs {
    /// Returns the organization matching `selected_org_id`, if any.
    pub fn selected_org(&self) -> Option<&Organization> {
        self.organizations.iter().find(|org| org.id == self.selected_org_id)
    }

    /// Returns the project matching `active_project_id`, if any.
    pub fn active_project(&self) -> Option<&Project> {
        let active = self.active_project_id.as_deref()?;
        self.projects.iter().find(|project| project.id == active)
    }
}

/// Already-resolved social proof counters. `None` hides the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialCounts {
    #[serde(default)]
    pub stars: Option<u64>,
    #[serde(default)]
    pub online: Option<u64>,
}

/// On-disk description of the workspace the host starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub signed_in: bool,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    /// Defaults to the first organization when absent.
    #[serde(default)]
    pub selected_org_id: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub active_project_id: Option<String>,
    #[serde(default)]
    pub counts: SocialCounts,
}

/// Navigation events emitted by the rail to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// An organization was picked in the account popover.
    SelectOrg(String),
    /// "Create organization" was chosen in the account popover.
    CreateOrg,
    CreateProject,
    OpenWorkspaces,
    /// A project badge was activated.
    OpenProject(String),
    /// Sign-in action of the sign-in prompt.
    SignIn,
    /// Migrate-legacy-projects action of the sign-in prompt.
    MigrateProjects,
}

/// Messages delivered to the host application by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic tick driving the loading spinner.
    Tick,
    /// Terminal resized.
    Resize(u16, u16),
    ProjectsLoaded(Vec<Project>),
    ProjectsLoadFailed(String),
    CountsUpdated(SocialCounts),
}
