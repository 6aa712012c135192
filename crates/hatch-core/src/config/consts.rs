//! Constants shared by the manifest loader, scaffolder and CLI

/// Manifest file name at the root of every template directory
pub const MANIFEST_FILE: &str = "hatch.toml";

/// Table the template variables are exposed under (`cookiecutter.runtime`)
pub const DEFAULT_NAMESPACE: &str = "cookiecutter";

/// Template used by `hatch init` when none is given
pub const DEFAULT_TEMPLATE: &str = "hello-world-nodejs";

/// Variable names with dedicated CLI flags
pub mod vars {
    /// `--name`
    pub const PROJECT_NAME: &str = "project_name";

    /// `--runtime`
    pub const RUNTIME: &str = "runtime";
}
