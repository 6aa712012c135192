//! Project generation - renders a template source into an output directory

use super::source::{TemplateFile, TemplateSource};
use crate::error::{HatchError, Result};
use crate::path::is_single_normal_component;
use crate::template::{TemplateContext, TemplateEngine, TemplateError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// What to do when a file fails to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Fail the whole run; nothing is written
    #[default]
    Abort,
    /// Leave the file out and record it in the report
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub on_error: OnError,
    /// Replace existing top-level entries in the output directory
    pub overwrite: bool,
}

/// A file left out under `OnError::Skip`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Source path as written in the template
    pub path: String,
    pub error: String,
}

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Directory the rendered tree was placed in
    pub destination: PathBuf,
    /// Top-level entries created in `destination`
    pub roots: Vec<PathBuf>,
    /// Written files, relative to `destination`, in template order
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

struct RenderedFile {
    path: PathBuf,
    content: Vec<u8>,
}

/// Generate a project from a template
///
/// # Steps
/// 1. Render every path and file body in parallel
/// 2. Apply the failure policy to render errors
/// 3. Refuse existing targets unless `overwrite` is set
/// 4. Write to a temp directory inside `output_dir` → rename into place
///
/// `PathEscape` always aborts, whatever the policy.
pub fn generate(
    source: &TemplateSource,
    context: &TemplateContext,
    output_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerateReport> {
    let engine = TemplateEngine::new();

    let results: Vec<Result<RenderedFile>> = source
        .files
        .par_iter()
        .map(|file| render_file(&engine, file, context))
        .collect();

    let mut rendered = Vec::new();
    let mut skipped = Vec::new();
    for (file, result) in source.files.iter().zip(results) {
        match result {
            Ok(output) => {
                tracing::debug!("Rendered {} -> {}", file.path, output.path.display());
                rendered.push(output);
            }
            Err(HatchError::TemplateRenderFailed { path, reason })
                if options.on_error == OnError::Skip =>
            {
                tracing::warn!("Skipping {}: {}", path.display(), reason);
                skipped.push(SkippedFile {
                    path: file.path.clone(),
                    error: reason.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let roots = top_level_entries(&rendered)?;
    for root in &roots {
        let target = output_dir.join(root);
        if target.exists() && !options.overwrite {
            return Err(HatchError::OutputExists(target));
        }
    }

    fs::create_dir_all(output_dir)?;

    // Create temp directory for atomic generation
    let temp_dir = TempDir::new_in(output_dir)?;
    for file in &rendered {
        let target = temp_dir.path().join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &file.content)?;
    }

    for root in &roots {
        let target = output_dir.join(root);

        // Remove old entry if exists
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        } else if target.exists() {
            fs::remove_file(&target)?;
        }

        // Rename temp to target (atomic on same filesystem)
        fs::rename(temp_dir.path().join(root), &target)?;
    }

    tracing::info!(
        "Generated {} file(s) from '{}' in {} ({} skipped)",
        rendered.len(),
        source.name(),
        output_dir.display(),
        skipped.len()
    );

    Ok(GenerateReport {
        destination: output_dir.to_path_buf(),
        roots,
        written: rendered.into_iter().map(|file| file.path).collect(),
        skipped,
    })
}

/// Render one file's path components and body
fn render_file(
    engine: &TemplateEngine,
    file: &TemplateFile,
    context: &TemplateContext,
) -> Result<RenderedFile> {
    let failed = |reason: TemplateError| HatchError::TemplateRenderFailed {
        path: PathBuf::from(&file.path),
        reason,
    };

    let mut path = PathBuf::new();
    for component in file.path.split('/') {
        let rendered = engine.render(component, context).map_err(failed)?;
        if !is_single_normal_component(&rendered) {
            return Err(HatchError::PathEscape {
                path: PathBuf::from(&file.path),
                component: rendered,
            });
        }
        path.push(rendered);
    }

    // Binary files are copied as-is
    let content = match std::str::from_utf8(&file.content) {
        Ok(text) => engine.render(text, context).map_err(failed)?.into_bytes(),
        Err(_) => file.content.clone(),
    };

    Ok(RenderedFile { path, content })
}

/// First path component of every rendered file, deduplicated in order
///
/// Two template files rendering to the same path is an error.
fn top_level_entries(files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
    let mut seen = BTreeSet::new();
    let mut roots = Vec::new();

    for file in files {
        if !seen.insert(&file.path) {
            return Err(HatchError::Generic(format!(
                "Several template files render to {}",
                file.path.display()
            )));
        }
        if let Some(first) = file.path.components().next() {
            let root = PathBuf::from(first.as_os_str());
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
    }

    Ok(roots)
}
