//! Navigation rail.
//!
//! A narrow vertical column on the left edge: the workspaces button, an
//! optional sign-in prompt and loading indicator, one badge per project, a
//! create-project button, and a bottom section with the account button and
//! social counters. What is visible is derived from caller state on every
//! sync ([`derive_rail_items`]); the rail only reports activation back as
//! [`rail_types::Effect`]s.

mod popover;
mod rail_component;
mod state;
mod view;

pub use popover::{AccountEntry, AccountPopoverState, RailPopover, SignInAction, SignInPromptState, popover_rect};
pub use rail_component::{RAIL_WIDTH, RailComponent};
pub use state::{RailActivation, RailState, SPINNER_FRAMES, layout_items, top_budget};
pub use view::{RailItem, RailItemKind, RailSection, derive_rail_items};
