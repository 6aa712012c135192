//! Test utilities for hatch
//!
//! This crate provides shared testing utilities used across the hatch workspace.

mod fixtures;

pub use fixtures::write_template_dir;

use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Environment variables the hatch binary reads
const HATCH_ENV_VARS: &[&str] = &["HATCH_TEMPLATE", "RUST_LOG"];

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This ensures all test temporary files are centralized in a single location
/// that is gitignored and easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use hatch_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Run a test with the hatch environment variables cleared
///
/// `HATCH_TEMPLATE` and `RUST_LOG` are removed for the duration of `f` and
/// restored afterwards. A mutex keeps tests that touch the environment from
/// interleaving.
///
/// ```no_run
/// use hatch_testkit::with_isolated_env;
///
/// with_isolated_env(|| {
///     assert!(std::env::var("HATCH_TEMPLATE").is_err());
/// });
/// ```
pub fn with_isolated_env<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let original: Vec<(&str, Option<String>)> = HATCH_ENV_VARS
        .iter()
        .map(|name| (*name, std::env::var(name).ok()))
        .collect();

    // SAFETY: ENV_LOCK is held, so no other test reads or writes these variables.
    unsafe {
        for name in HATCH_ENV_VARS {
            std::env::remove_var(name);
        }
    }

    let result = f();

    // Restore environment (important for test isolation)
    // SAFETY: We still hold ENV_LOCK, ensuring exclusive access to env vars.
    unsafe {
        for (name, value) in original {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    result
}
