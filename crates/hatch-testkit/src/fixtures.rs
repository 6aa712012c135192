//! Fixture helpers for template directories

use std::path::Path;

/// Write a template directory: `hatch.toml` plus the given `(path, content)` files
///
/// Paths use `/` separators and may contain template markers.
///
/// # Panics
///
/// Panics if any directory or file cannot be created.
pub fn write_template_dir(root: &Path, manifest: &str, files: &[(&str, &str)]) {
    std::fs::create_dir_all(root).expect("Failed to create template directory");
    std::fs::write(root.join("hatch.toml"), manifest).expect("Failed to write hatch.toml");

    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create template subdirectory");
        }
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    }
}
