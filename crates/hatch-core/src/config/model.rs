use crate::config::consts::DEFAULT_NAMESPACE;
use crate::error::{HatchError, Result};
use crate::template::TemplateContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use toml::Value;

/// hatch.toml schema - declares a template and its variables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub template: TemplateInfo,
    #[serde(default)]
    pub variables: BTreeMap<String, VariableSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableSpec {
    /// Used when no value is supplied; a variable without one is required
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Closed set of accepted values
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

impl VariableSpec {
    fn accepts(&self, value: &str) -> bool {
        self.choices
            .as_ref()
            .is_none_or(|choices| choices.iter().any(|choice| choice == value))
    }
}

impl Manifest {
    /// Read hatch.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                let dir = path.parent().unwrap_or(path);
                HatchError::ManifestNotFound(dir.to_path_buf())
            } else {
                HatchError::IoError(e)
            }
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate manifest text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(content).map_err(|e| HatchError::ManifestInvalid(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check declarations that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.template.namespace) {
            return Err(HatchError::ManifestInvalid(format!(
                "namespace '{}' must be a plain identifier",
                self.template.namespace
            )));
        }

        for (name, spec) in &self.variables {
            if !is_identifier(name) {
                return Err(HatchError::ManifestInvalid(format!(
                    "variable name '{}' must be a plain identifier",
                    name
                )));
            }

            if let Some(choices) = &spec.choices {
                if choices.is_empty() {
                    return Err(HatchError::ManifestInvalid(format!(
                        "variable '{}' declares an empty choices list",
                        name
                    )));
                }
            }

            if let Some(default) = &spec.default {
                if !spec.accepts(default) {
                    return Err(HatchError::ManifestInvalid(format!(
                        "default '{}' of variable '{}' is not one of its choices",
                        default, name
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve variable values and expose them under the namespace table
    ///
    /// Overrides win over defaults. Every override must name a declared
    /// variable and respect its `choices`; every declared variable must end up
    /// with a value.
    pub fn build_context<K, V>(
        &self,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> Result<TemplateContext>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values: BTreeMap<&str, String> = self
            .variables
            .iter()
            .filter_map(|(name, spec)| Some((name.as_str(), spec.default.clone()?)))
            .collect();

        for (key, value) in overrides {
            let key = key.as_ref();
            let (name, spec) = self.variables.get_key_value(key).ok_or_else(|| {
                HatchError::UnknownVariable {
                    name: key.to_string(),
                    template: self.template.name.clone(),
                }
            })?;

            let value = value.into();
            if !spec.accepts(&value) {
                return Err(HatchError::InvalidChoice {
                    name: name.clone(),
                    value,
                    choices: spec.choices.as_deref().unwrap_or_default().join(", "),
                });
            }
            values.insert(name.as_str(), value);
        }

        if let Some(missing) = self
            .variables
            .keys()
            .find(|name| !values.contains_key(name.as_str()))
        {
            return Err(HatchError::MissingVariable(missing.clone()));
        }

        let mut context = TemplateContext::empty();
        context.insert(&self.template.namespace, Value::Table(toml::map::Map::new()));
        for (name, value) in values {
            context.insert(
                &format!("{}.{}", self.template.namespace, name),
                Value::String(value),
            );
        }
        Ok(context)
    }

    /// Choices declared for a variable, if any
    pub fn choices(&self, variable: &str) -> &[String] {
        self.variables
            .get(variable)
            .and_then(|spec| spec.choices.as_deref())
            .unwrap_or_default()
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
