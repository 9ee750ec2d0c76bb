use chrono::{DateTime, Local};
use rat_focus::FocusFlag;
use ratatui::layout::Rect;

/// Maximum number of entries kept in memory.
pub const MAX_ACTIVITY_ENTRIES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single line in the activity pane.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub level: ActivityLevel,
    pub message: String,
}

/// Host-side log of what happened in the session, newest last.
#[derive(Debug, Clone)]
pub struct ActivityState {
    pub entries: Vec<ActivityEntry>,
    pub focus: FocusFlag,
    /// Rows scrolled up from the bottom.
    pub scroll_back: usize,
    pub last_area: Rect,
}

impl Default for ActivityState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            focus: FocusFlag::named("activity"),
            scroll_back: 0,
            last_area: Rect::default(),
        }
    }
}

impl ActivityState {
    pub fn push(&mut self, level: ActivityLevel, message: impl Into<String>) {
        self.entries.push(ActivityEntry {
            at: Local::now(),
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_ACTIVITY_ENTRIES {
            let overflow = self.entries.len() - MAX_ACTIVITY_ENTRIES;
            self.entries.drain(..overflow);
        }
        self.scroll_back = 0;
    }

    pub fn scroll(&mut self, up: bool) {
        if up {
            self.scroll_back = (self.scroll_back + 1).min(self.entries.len().saturating_sub(1));
        } else {
            self.scroll_back = self.scroll_back.saturating_sub(1);
        }
    }

    /// Entries visible in a viewport of `rows`, oldest first.
    pub fn visible(&self, rows: usize) -> &[ActivityEntry] {
        let end = self.entries.len().saturating_sub(self.scroll_back);
        let start = end.saturating_sub(rows);
        &self.entries[start..end]
    }
}
