//! Builtin template definitions

use super::source::{TemplateFile, TemplateOrigin, TemplateSource};
use crate::config::Manifest;
use crate::error::Result;

/// Names of the templates compiled into the binary
pub const BUILTIN_TEMPLATES: &[&str] = &["hello-world-nodejs"];

/// Get builtin template by name
pub fn get_builtin_template(name: &str) -> Result<Option<TemplateSource>> {
    match name {
        "hello-world-nodejs" => hello_world_nodejs().map(Some),
        _ => Ok(None),
    }
}

/// Hello world serverless function with a runtime-dependent handler and tests
fn hello_world_nodejs() -> Result<TemplateSource> {
    let manifest = Manifest::from_toml_str(include_str!(
        "../../builtin_templates/hello-world-nodejs/hatch.toml"
    ))?;

    let files = vec![
        TemplateFile::new(
            "{{cookiecutter.project_name}}/README.md",
            include_str!("../../builtin_templates/hello-world-nodejs/README.md"),
        ),
        // Kept on disk as `gitignore`
        TemplateFile::new(
            "{{cookiecutter.project_name}}/.gitignore",
            include_str!("../../builtin_templates/hello-world-nodejs/gitignore"),
        ),
        TemplateFile::new(
            "{{cookiecutter.project_name}}/template.yaml",
            include_str!("../../builtin_templates/hello-world-nodejs/template.yaml"),
        ),
        TemplateFile::new(
            "{{cookiecutter.project_name}}/hello_world/index.js",
            include_str!("../../builtin_templates/hello-world-nodejs/hello_world/index.js"),
        ),
        TemplateFile::new(
            "{{cookiecutter.project_name}}/hello_world/package.json",
            include_str!("../../builtin_templates/hello-world-nodejs/hello_world/package.json"),
        ),
        TemplateFile::new(
            "{{cookiecutter.project_name}}/hello_world/tests/unit/test_handler.js",
            include_str!(
                "../../builtin_templates/hello-world-nodejs/hello_world/tests/unit/test_handler.js"
            ),
        ),
    ];

    Ok(TemplateSource {
        manifest,
        files,
        origin: TemplateOrigin::Builtin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Template;

    #[test]
    fn test_get_builtin_hello_world() {
        let source = get_builtin_template("hello-world-nodejs").unwrap().unwrap();
        assert_eq!(source.name(), "hello-world-nodejs");
        assert_eq!(source.files.len(), 6);
        assert_eq!(
            source.manifest.choices("runtime"),
            ["nodejs8.10", "nodejs6.11", "nodejs4.3"]
        );
    }

    #[test]
    fn test_get_builtin_nonexistent() {
        assert!(get_builtin_template("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_every_listed_builtin_resolves() {
        for name in BUILTIN_TEMPLATES {
            assert!(get_builtin_template(name).unwrap().is_some(), "{}", name);
        }
    }

    #[test]
    fn test_builtin_files_parse() {
        let source = get_builtin_template("hello-world-nodejs").unwrap().unwrap();
        for file in &source.files {
            let text = std::str::from_utf8(&file.content).unwrap();
            Template::parse(text).unwrap_or_else(|e| panic!("{}: {}", file.path, e));
            Template::parse(&file.path).unwrap();
        }
    }

    #[test]
    fn test_builtin_handler_selects_by_runtime() {
        let source = get_builtin_template("hello-world-nodejs").unwrap().unwrap();
        let index = source
            .files
            .iter()
            .find(|f| f.path.ends_with("hello_world/index.js"))
            .unwrap();
        let text = std::str::from_utf8(&index.content).unwrap();

        let legacy = source.manifest.build_context([("runtime", "nodejs4.3")]).unwrap();
        let rendered = Template::parse(text).unwrap().render(&legacy).unwrap();
        assert!(rendered.starts_with("'use strict';"));
        assert!(rendered.contains("callback(null, response);"));
        assert!(!rendered.contains("async"));

        let modern = source
            .manifest
            .build_context(Vec::<(String, String)>::new())
            .unwrap();
        let rendered = Template::parse(text).unwrap().render(&modern).unwrap();
        assert!(rendered.contains("exports.handler = async (event, context) => {"));
        assert!(!rendered.contains("callback"));
    }
}
