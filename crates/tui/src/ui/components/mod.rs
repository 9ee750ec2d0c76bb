//! UI components: navigation rail and activity pane.

pub mod activity;
pub mod component;
pub mod rail;

pub use activity::ActivityComponent;
pub use component::*;
pub use rail::RailComponent;
