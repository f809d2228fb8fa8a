//! Rule tables, message tables and accumulated validation errors
//!
//! A [`RuleSet`] maps field paths to ordered constraint lists. Paths ending
//! in `.*` apply their constraints to each element of the named array field
//! (e.g. `tags.*`); violations are reported per element (`tags.1`).

use crate::core::validation::constraint::FieldConstraint;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Ordered mapping from field path to constraint list
///
/// Declaration order is evaluation order, both across fields and within a
/// field's constraint list. Rule sets are pure values: built once per
/// resource kind and operation mode, immutable and shareable afterwards.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: IndexMap<&'static str, Vec<FieldConstraint>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field's ordered constraint list
    pub fn field(mut self, path: &'static str, constraints: Vec<FieldConstraint>) -> Self {
        self.fields.insert(path, constraints);
        self
    }

    /// Iterate field paths and their constraint lists in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[FieldConstraint])> {
        self.fields.iter().map(|(path, cs)| (*path, cs.as_slice()))
    }

    /// Constraint list for a field path, if declared
    pub fn get(&self, path: &str) -> Option<&[FieldConstraint]> {
        self.fields.get(path).map(Vec::as_slice)
    }

    /// Number of declared field paths
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Top-level field names declared in this rule set, deduplicated and in
    /// declaration order (`tags.*` contributes `tags`)
    pub fn roots(&self) -> Vec<&'static str> {
        let mut roots = Vec::new();
        for path in self.fields.keys() {
            let root = path.strip_suffix(".*").unwrap_or(path);
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }
}

/// Mapping from (field path, rule name) to a user-facing message
///
/// Falls back to a generic message when no explicit entry exists for a
/// violated rule. Entries are registered against declared paths, so element
/// violations under `tags.*` resolve through the wildcard path while the
/// reported message names the concrete element.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    entries: HashMap<(String, String), String>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message for a (field path, rule) pair
    pub fn message(mut self, field: &'static str, rule: &'static str, text: &'static str) -> Self {
        self.set(field, rule, text);
        self
    }

    /// Insert or replace a message entry
    pub fn set(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.entries
            .insert((field.into(), rule.into()), text.into());
    }

    /// Resolve the message for a violated rule
    ///
    /// `declared` is the path as it appears in the rule set (`tags.*`);
    /// `concrete` is the path reported to the client (`tags.1`). The generic
    /// fallback names the concrete path.
    pub fn resolve(&self, declared: &str, concrete: &str, rule: &str) -> String {
        self.entries
            .get(&(declared.to_string(), rule.to_string()))
            .cloned()
            .unwrap_or_else(|| format!("The {} field failed {} validation.", concrete, rule))
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulated per-field validation failures
///
/// Serializes to a JSON object mapping field paths to ordered message lists,
/// which is the body of a 422 response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    fields: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message for a field path
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for a field path
    pub fn field_messages(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// True when a field has at least one recorded failure
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields with recorded failures
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields and their messages in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(f, ms)| (f.as_str(), ms.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::constraint::{FieldConstraint, ValueType};

    #[test]
    fn test_rule_set_preserves_declaration_order() {
        let rules = RuleSet::new()
            .field("name", vec![FieldConstraint::Required])
            .field("email", vec![FieldConstraint::TypeOf(ValueType::Email)])
            .field("phone", vec![FieldConstraint::Nullable]);

        let paths: Vec<_> = rules.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["name", "email", "phone"]);
    }

    #[test]
    fn test_rule_set_roots_collapse_wildcards() {
        let rules = RuleSet::new()
            .field("tags", vec![FieldConstraint::TypeOf(ValueType::Array)])
            .field("tags.*", vec![FieldConstraint::TypeOf(ValueType::String)])
            .field("amount", vec![FieldConstraint::Required]);

        assert_eq!(rules.roots(), vec!["tags", "amount"]);
    }

    #[test]
    fn test_message_table_explicit_entry() {
        let table = MessageTable::new().message("email", "unique", "Email already taken.");
        assert_eq!(
            table.resolve("email", "email", "unique"),
            "Email already taken."
        );
    }

    #[test]
    fn test_message_table_generic_fallback() {
        let table = MessageTable::new();
        let msg = table.resolve("tags.*", "tags.1", "max");
        assert_eq!(msg, "The tags.1 field failed max validation.");
    }

    #[test]
    fn test_message_table_wildcard_lookup_concrete_display() {
        let table = MessageTable::new().message("tags.*", "max", "Tags may not exceed 50 characters.");
        assert_eq!(
            table.resolve("tags.*", "tags.1", "max"),
            "Tags may not exceed 50 characters."
        );
    }

    #[test]
    fn test_message_override_replaces_entry() {
        let mut table = MessageTable::new().message("name", "required", "Name is required.");
        table.set("name", "required", "Please provide a name.");
        assert_eq!(
            table.resolve("name", "name", "required"),
            "Please provide a name."
        );
    }

    #[test]
    fn test_validation_errors_accumulate_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "invalid format");
        errors.add("amount", "too small");
        errors.add("email", "already taken");

        let fields: Vec<_> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["email", "amount"]);
        assert_eq!(
            errors.field_messages("email").unwrap(),
            &["invalid format".to_string(), "already taken".to_string()]
        );
    }

    #[test]
    fn test_validation_errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"][0], "The name field is required.");
    }
}
