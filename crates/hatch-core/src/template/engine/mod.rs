//! Template engine implementation

mod blocks;
mod helpers;
pub(crate) mod predicate;
mod tokenize;

use crate::template::ast::{collect_variables, Node, VariableRef};
use crate::template::error::TemplateError;
use toml::Value;

use blocks::parse_blocks;
use helpers::{insert_key, resolve_key, stringify_scalar};

/// Template context holding TOML data for rendering
///
/// Read-only while rendering; clone it to derive a context with overrides.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    data: Value,
}

impl TemplateContext {
    /// Create a new template context from TOML value
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Create an empty context
    pub fn empty() -> Self {
        Self::new(Value::Table(toml::map::Map::new()))
    }

    /// Build a context of string values from `(dotted.key, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut context = Self::empty();
        for (key, value) in pairs {
            context.insert(key.as_ref(), Value::String(value.into()));
        }
        context
    }

    /// Set a value at a dotted key, creating intermediate tables
    pub fn insert(&mut self, key: &str, value: Value) {
        insert_key(&mut self.data, key, value);
    }

    /// Return a copy with one value replaced
    pub fn with_override(&self, key: &str, value: impl Into<String>) -> Self {
        let mut context = self.clone();
        context.insert(key, Value::String(value.into()));
        context
    }

    /// Look up a dotted key
    pub fn get(&self, key: &str) -> Option<&Value> {
        resolve_key(&self.data, key)
    }

    /// Get the underlying TOML value
    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// A parsed template document
///
/// Parsing checks structure only; the context is consulted at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template text
    ///
    /// # Errors
    ///
    /// `MalformedTemplate` for unbalanced `if`/`elif`/`else`/`endif`, unclosed
    /// markers, unknown tags and unparsable predicates.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            nodes: parse_blocks(source)?,
        })
    }

    /// Top-level segments
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every variable referenced anywhere in the document, in order of first use
    pub fn variables(&self) -> Vec<VariableRef> {
        let mut refs = Vec::new();
        collect_variables(&self.nodes, &mut refs);
        refs
    }

    /// Render against a context
    ///
    /// # Errors
    ///
    /// `UndefinedVariable` if any referenced key (in any branch) is missing,
    /// `NonScalarValue` if a placeholder or comparison hits an array or table.
    pub fn render(&self, context: &TemplateContext) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables()
            .into_iter()
            .find(|var| context.get(&var.key).is_none())
        {
            return Err(TemplateError::UndefinedVariable {
                key: missing.key,
                line: missing.line,
            });
        }

        let mut output = String::new();
        render_nodes(&self.nodes, context, &mut output)?;
        Ok(output)
    }
}

fn render_nodes(
    nodes: &[Node],
    context: &TemplateContext,
    output: &mut String,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Literal(text) => output.push_str(text),
            Node::Variable { key, line } => {
                let value = context
                    .get(key)
                    .ok_or_else(|| TemplateError::UndefinedVariable {
                        key: key.clone(),
                        line: *line,
                    })?;
                output.push_str(&stringify_scalar(value, key, *line)?);
            }
            Node::Conditional(block) => {
                if block.predicate.evaluate(context, block.line)? {
                    render_nodes(&block.then_branch, context, output)?;
                } else if let Some(else_branch) = &block.else_branch {
                    render_nodes(else_branch, context, output)?;
                }
            }
        }
    }
    Ok(())
}

/// Template engine for rendering template text with TOML data
pub struct TemplateEngine;

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self
    }

    /// Parse and render a template with the given context
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        Template::parse(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to render a template
pub fn render(template: &str, context: &TemplateContext) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
mod tests;
