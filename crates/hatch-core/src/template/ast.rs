//! Parsed template document

use super::engine::predicate::Predicate;

/// A single segment of a template document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, emitted as-is
    Literal(String),

    /// `{{ key }}` placeholder
    Variable { key: String, line: usize },

    /// `{% if %} ... {% else %} ... {% endif %}`
    Conditional(Conditional),
}

/// Conditional block; `elif` chains are nested conditionals in the false branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    pub predicate: Predicate,
    /// Line of the opening `if` / `elif` tag
    pub line: usize,
    pub then_branch: Vec<Node>,
    /// Absent `else` renders as empty
    pub else_branch: Option<Vec<Node>>,
}

/// A variable reference with the line it first appears on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRef {
    pub key: String,
    pub line: usize,
}

/// Collect variable references from every branch, first occurrence per key
pub(crate) fn collect_variables(nodes: &[Node], out: &mut Vec<VariableRef>) {
    for node in nodes {
        match node {
            Node::Literal(_) => {}
            Node::Variable { key, line } => push_unique(out, key, *line),
            Node::Conditional(block) => {
                let mut keys = Vec::new();
                block.predicate.collect_variables(&mut keys);
                for key in keys {
                    push_unique(out, key, block.line);
                }
                collect_variables(&block.then_branch, out);
                if let Some(else_branch) = &block.else_branch {
                    collect_variables(else_branch, out);
                }
            }
        }
    }
}

fn push_unique(out: &mut Vec<VariableRef>, key: &str, line: usize) {
    if !out.iter().any(|existing| existing.key == key) {
        out.push(VariableRef {
            key: key.to_string(),
            line,
        });
    }
}
