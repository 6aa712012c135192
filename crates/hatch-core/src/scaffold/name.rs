//! Project name validation

use crate::path::has_absolute_or_rooted_component;
use anyhow::{bail, Result};
use std::path::{Component, Path};

/// Validate a project name given on the command line
///
/// The name becomes the top-level directory of the generated project, so it
/// must be a single, relative path component.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Project name cannot be empty");
    }

    let path = Path::new(name);

    if has_absolute_or_rooted_component(path) {
        bail!("Project name cannot be an absolute path: '{}'", name);
    }

    let mut normal_count = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => normal_count += 1,
            Component::Prefix(_) => bail!("Project name cannot contain drive prefix: '{}'", name),
            Component::RootDir => bail!("Project name cannot be an absolute path: '{}'", name),
            Component::CurDir => {
                bail!("Project name cannot contain current directory (.): '{}'", name)
            }
            Component::ParentDir => {
                bail!("Project name cannot contain parent directory (..): '{}'", name)
            }
        }
    }

    if normal_count != 1 || name.contains(['/', '\\']) {
        bail!(
            "Project name must be a single directory name without path separators: '{}'",
            name
        );
    }

    if name.contains("{{") || name.contains("{%") || name.contains("{#") {
        bail!("Project name cannot contain template markers: '{}'", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("sam-app").is_ok());
        assert!(validate_name("my_project2").is_ok());
        assert!(validate_name(".hidden").is_ok());
    }

    #[test]
    fn test_empty_name() {
        let err = validate_name("  ").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_absolute_name() {
        let err = validate_name("/tmp/app").unwrap_err();
        assert!(err.to_string().contains("absolute path"));
    }

    #[test]
    fn test_parent_and_current_dir() {
        assert!(validate_name("..").unwrap_err().to_string().contains(".."));
        assert!(validate_name(".").unwrap_err().to_string().contains("(.)"));
        assert!(validate_name("../app").is_err());
    }

    #[test]
    fn test_nested_name() {
        let err = validate_name("a/b").unwrap_err();
        assert!(err.to_string().contains("single directory name"));
        assert!(validate_name("a\\b").is_err());
    }

    #[test]
    fn test_template_markers() {
        let err = validate_name("{{ cookiecutter.runtime }}").unwrap_err();
        assert!(err.to_string().contains("template markers"));
    }
}
