//! Configuration loading and management
//!
//! Deployments can reword the compiled-in validation messages through a YAML
//! file, without rebuilding. Keys are `field.rule` (the rule name is the
//! last dot-separated segment, so wildcard paths like `tags.*.max` work).

use crate::core::validation::ruleset::MessageTable;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message overrides layered on top of a request's message table
///
/// ```yaml
/// messages:
///   email.unique: "That email address is already in use."
///   tags.*.max: "Tags are limited to 50 characters."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageOverrides {
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

impl MessageOverrides {
    /// Load overrides from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load overrides from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: Self = serde_yaml::from_str(yaml)?;
        Ok(overrides)
    }

    /// Apply the overrides to a message table
    pub fn apply(&self, table: &mut MessageTable) -> Result<()> {
        for (key, text) in &self.messages {
            let Some((field, rule)) = key.rsplit_once('.') else {
                bail!("Invalid message key '{}': expected 'field.rule'", key);
            };
            table.set(field, rule, text.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply_overrides() {
        let overrides = MessageOverrides::from_yaml_str(
            r#"
messages:
  email.unique: "That email address is already in use."
  name.required: "A name is mandatory."
"#,
        )
        .unwrap();

        let mut table = MessageTable::new().message("email", "unique", "Email taken.");
        overrides.apply(&mut table).unwrap();

        assert_eq!(
            table.resolve("email", "email", "unique"),
            "That email address is already in use."
        );
        assert_eq!(
            table.resolve("name", "name", "required"),
            "A name is mandatory."
        );
    }

    #[test]
    fn test_wildcard_key_targets_element_rules() {
        let overrides = MessageOverrides::from_yaml_str(
            r#"
messages:
  tags.*.max: "Tags are limited to 50 characters."
"#,
        )
        .unwrap();

        let mut table = MessageTable::new();
        overrides.apply(&mut table).unwrap();

        assert_eq!(
            table.resolve("tags.*", "tags.1", "max"),
            "Tags are limited to 50 characters."
        );
    }

    #[test]
    fn test_key_without_rule_segment_is_rejected() {
        let overrides = MessageOverrides::from_yaml_str(
            r#"
messages:
  email: "missing rule segment"
"#,
        )
        .unwrap();

        let mut table = MessageTable::new();
        assert!(overrides.apply(&mut table).is_err());
    }

    #[test]
    fn test_empty_document_parses() {
        let overrides = MessageOverrides::from_yaml_str("messages: {}").unwrap();
        assert!(overrides.messages.is_empty());
    }
}
