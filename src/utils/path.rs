//! Path utilities: expand ~ in user supplied paths and make them absolute.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `~`-expanded, and joined to the current directory when relative.
pub fn absolute(path: &str) -> String {
    let p = expand_tilde(path);
    let p = if p.is_absolute() {
        p
    } else {
        std::env::current_dir().map(|d| d.join(&p)).unwrap_or(p)
    };
    p.to_string_lossy().to_string()
}
