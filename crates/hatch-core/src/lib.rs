// Core modules
pub mod config;
pub mod error;
pub mod handler;
pub mod path;
pub mod scaffold;
pub mod template;

// Re-export commonly used types
pub use error::{HatchError, Result};
