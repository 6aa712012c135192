//! Path validation for rendered output locations
//!
//! Rendered path components come from user-supplied variables, so they are
//! checked component by component before anything is written.
//!
//! `Path::is_absolute()` is platform dependent (`/tmp` is absolute on Unix but
//! only rooted on Windows), so checks here look at components instead.

use std::path::{Component, Path};

/// Check if path is absolute OR rooted (cross-platform)
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use hatch_core::path::has_absolute_or_rooted_component;
///
/// assert!(has_absolute_or_rooted_component(Path::new("/tmp")));
/// assert!(!has_absolute_or_rooted_component(Path::new("sam-app/hello_world")));
/// ```
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Check that a rendered name is usable as exactly one path component
///
/// Rejects empty names, `.`, `..`, and anything containing a separator or a
/// drive prefix.
///
/// ```rust
/// use hatch_core::path::is_single_normal_component;
///
/// assert!(is_single_normal_component("sam-app"));
/// assert!(is_single_normal_component(".gitignore"));
/// assert!(!is_single_normal_component("../etc"));
/// assert!(!is_single_normal_component("a/b"));
/// assert!(!is_single_normal_component(""));
/// ```
pub fn is_single_normal_component(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
