//! Template manifest (`hatch.toml`)

pub mod consts;
pub mod model;

pub use model::{Manifest, TemplateInfo, VariableSpec};
