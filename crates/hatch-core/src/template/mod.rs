//! Template module - conditional template renderer
//!
//! Renders text templates against a TOML data context. Output is the template's
//! literal text with every conditional resolved to exactly one branch and every
//! placeholder substituted.
//!
//! ## Syntax
//!
//! - Placeholders: `{{key}}` or `{{ nested.key }}`
//! - Conditionals: `{% if runtime == 'nodejs6.11' or runtime == 'nodejs4.3' %} ... {% elif flag %} ... {% else %} ... {% endif %}`
//! - Predicates: `==`, `!=`, `and`, `or`, `not`, parentheses, bare-variable truthiness
//! - Comments: `{# ignored #}`
//! - Literal blocks: `{% raw %}{{ kept as-is }}{% endraw %}`
//! - Whitespace control: `{%- ... -%}`; tags alone on a line disappear with the line

pub mod ast;
pub mod engine;
pub mod error;

pub use ast::{Conditional, Node, VariableRef};
pub use engine::predicate::{CompareOp, Operand, Predicate};
pub use engine::{render, Template, TemplateContext, TemplateEngine};
pub use error::TemplateError;
