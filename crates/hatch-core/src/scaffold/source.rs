//! Template sources: a directory on disk or a builtin template

use crate::config::consts::MANIFEST_FILE;
use crate::config::Manifest;
use crate::error::{HatchError, Result};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One file of a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Relative path with `/` separators; components may contain placeholders
    pub path: String,
    pub content: Vec<u8>,
}

impl TemplateFile {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Where a template was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Directory(PathBuf),
}

/// A template manifest together with the files it renders
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub manifest: Manifest,
    pub files: Vec<TemplateFile>,
    pub origin: TemplateOrigin,
}

impl TemplateSource {
    /// Template name from the manifest
    pub fn name(&self) -> &str {
        &self.manifest.template.name
    }

    /// Resolve a template by directory path or builtin name
    ///
    /// Resolution order:
    /// 1. An existing directory at `name_or_dir`
    /// 2. Builtin template
    pub fn resolve(name_or_dir: &str) -> Result<Self> {
        let dir = Path::new(name_or_dir);
        if dir.is_dir() {
            return Self::from_dir(dir);
        }

        super::builtin::get_builtin_template(name_or_dir)?
            .ok_or_else(|| HatchError::TemplateNotFound(name_or_dir.to_string()))
    }

    /// Load every file under `dir` except the manifest itself
    ///
    /// Files are ordered by path so generation is deterministic.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let manifest = Manifest::from_file(dir.join(MANIFEST_FILE))?;

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| HatchError::Generic(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(dir)
                .map_err(|e| HatchError::Generic(e.to_string()))?;
            if relative == Path::new(MANIFEST_FILE) {
                continue;
            }

            let path = relative_to_slash(relative)?;
            let content = std::fs::read(entry.path())?;
            files.push(TemplateFile { path, content });
        }

        Ok(Self {
            manifest,
            files,
            origin: TemplateOrigin::Directory(dir.to_path_buf()),
        })
    }
}

fn relative_to_slash(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    HatchError::Generic(format!(
                        "Template path is not valid UTF-8: {}",
                        relative.display()
                    ))
                })?;
                parts.push(part);
            }
            _ => {
                return Err(HatchError::Generic(format!(
                    "Unexpected component in template path: {}",
                    relative.display()
                )));
            }
        }
    }
    Ok(parts.join("/"))
}
