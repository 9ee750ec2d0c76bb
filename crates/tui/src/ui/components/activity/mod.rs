mod activity_component;
mod state;

pub use activity_component::ActivityComponent;
pub use state::{ActivityEntry, ActivityLevel, ActivityState, MAX_ACTIVITY_ENTRIES};
