use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HatchError {
    // Template source errors
    #[error("TEMPLATE_NOT_FOUND: '{0}' is neither a builtin template nor a template directory")]
    TemplateNotFound(String),

    #[error("TEMPLATE_RENDER_FAILED: {path}: {reason}")]
    TemplateRenderFailed { path: PathBuf, reason: TemplateError },

    // Manifest errors
    #[error("MANIFEST_NOT_FOUND: hatch.toml not found in '{0}'")]
    ManifestNotFound(PathBuf),

    #[error("MANIFEST_INVALID: {0}")]
    ManifestInvalid(String),

    // Variable errors
    #[error("UNKNOWN_VARIABLE: template '{template}' does not declare variable '{name}'")]
    UnknownVariable { name: String, template: String },

    #[error("INVALID_CHOICE: '{value}' is not a valid {name} (choose from: {choices})")]
    InvalidChoice {
        name: String,
        value: String,
        choices: String,
    },

    #[error("MISSING_VARIABLE: variable '{0}' has no default and no value was given")]
    MissingVariable(String),

    // Output errors
    #[error("PATH_ESCAPE: '{path}' renders to an unsafe path component '{component}'")]
    PathEscape { path: PathBuf, component: String },

    #[error("OUTPUT_EXISTS: '{0}' already exists (use --overwrite to replace it)")]
    OutputExists(PathBuf),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, HatchError>;
