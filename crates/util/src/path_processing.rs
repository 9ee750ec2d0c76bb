use std::path::PathBuf;

use dirs_next::home_dir;

/// Expands a leading `~` to the user's home directory.
///
/// Both `/` and `\` are accepted after the tilde. Paths such as `~alice/x`
/// and paths without a home directory are returned as given (trimmed).
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let Some(after_tilde) = trimmed.strip_prefix('~') else {
        return PathBuf::from(trimmed);
    };
    let relative = match after_tilde.chars().next() {
        None => "",
        Some('/' | '\\') => &after_tilde[1..],
        Some(_) => return PathBuf::from(trimmed),
    };
    match home_dir() {
        Some(home) if relative.is_empty() => home,
        Some(home) => home.join(relative),
        None => PathBuf::from(trimmed),
    }
}
