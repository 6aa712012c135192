//! Shared test helpers for template engine tests

use crate::template::engine::TemplateContext;
use toml::{toml, Value};

/// Create a simple test context with basic scalar values
pub(super) fn simple_context() -> TemplateContext {
    let data = toml! {
        title = "My Title"
        count = 42
        price = 9.99
        enabled = true
        empty = ""
        date = 2026-01-15
    };
    TemplateContext::new(Value::Table(data))
}

/// Create a nested context shaped like a scaffolding request
pub(super) fn runtime_context(runtime: &str) -> TemplateContext {
    let mut data = toml! {
        [cookiecutter]
        project_name = "sam-app"

        [[cookiecutter.handlers]]
        name = "hello"
    };
    if let Some(Value::Table(cookiecutter)) = data.get_mut("cookiecutter") {
        cookiecutter.insert("runtime".to_string(), Value::String(runtime.to_string()));
    }
    TemplateContext::new(Value::Table(data))
}
