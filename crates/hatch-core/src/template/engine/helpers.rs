//! Helper functions for template rendering

use crate::template::error::TemplateError;
use toml::Value;

/// Resolve a nested key from TOML data
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = data;

    for part in key.split('.') {
        current = match current {
            Value::Table(table) => table.get(part)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Stringify a scalar TOML value for output or comparison
pub(crate) fn stringify_scalar(value: &Value, key: &str, line: usize) -> Result<String, TemplateError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(TemplateError::NonScalarValue {
            key: key.to_string(),
            line,
        }),
    }
}

/// Truthiness of a bare variable in a predicate
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Integer(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Boolean(b) => *b,
        Value::Datetime(_) => true,
        Value::Array(items) => !items.is_empty(),
        Value::Table(table) => !table.is_empty(),
    }
}

/// Insert a value at a dotted key, creating intermediate tables
pub(crate) fn insert_key(data: &mut Value, key: &str, value: Value) {
    if !data.is_table() {
        *data = Value::Table(toml::map::Map::new());
    }

    if let Value::Table(table) = data {
        match key.split_once('.') {
            Some((head, rest)) => {
                let child = table
                    .entry(head.to_string())
                    .or_insert(Value::Table(toml::map::Map::new()));
                insert_key(child, rest, value);
            }
            None => {
                table.insert(key.to_string(), value);
            }
        }
    }
}
