//! Scaffolding engine - renders a template tree into a new project directory

pub mod builtin;
pub mod generate;
pub mod name;
pub mod source;

pub use builtin::{get_builtin_template, BUILTIN_TEMPLATES};
pub use generate::{generate, GenerateOptions, GenerateReport, OnError, SkippedFile};
pub use name::validate_name;
pub use source::{TemplateFile, TemplateOrigin, TemplateSource};
