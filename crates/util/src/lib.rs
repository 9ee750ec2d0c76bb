//! # Rail Utilities
//!
//! Framework-free helpers shared by the TUI and CLI:
//!
//! - badge label and compact count derivation ([`text_processing`])
//! - localized string lookup ([`i18n`])
//! - preference and workspace snapshot persistence

pub mod i18n;
pub mod path_processing;
pub mod preferences;
pub mod snapshot;
pub mod text_processing;

pub use i18n::{LocaleError, Translator};
pub use path_processing::expand_tilde;
pub use preferences::{PreferencesError, PreferencesPayload, UserPreferences, config_root};
pub use snapshot::{SnapshotError, load_snapshot, parse_snapshot};
pub use text_processing::{EMPTY_INITIALS, NO_ORG_INITIALS, derive_initials, format_count};
