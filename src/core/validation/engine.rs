//! Rule table evaluation
//!
//! [`RequestValidator`] evaluates a payload against a rule set: every
//! declared field is checked in declaration order, evaluation of a single
//! field stops at its first violated constraint, and failures accumulate
//! across fields. On success the payload is normalized down to the declared
//! fields; extraneous input is dropped.

use crate::core::error::{GateError, StorageError};
use crate::core::service::LookupService;
use crate::core::validation::FormRequest;
use crate::core::validation::constraint::{FieldConstraint, is_empty};
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::ruleset::{MessageTable, RuleSet, ValidationErrors};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Stateless evaluator for declarative rule tables
///
/// Holds only the storage collaborator handle; safe to share and call
/// concurrently. Each `validate` call is independent.
#[derive(Clone)]
pub struct RequestValidator {
    lookup: Arc<dyn LookupService>,
}

impl RequestValidator {
    pub fn new(lookup: Arc<dyn LookupService>) -> Self {
        Self { lookup }
    }

    /// Validate a payload against a form request type's rule and message tables
    pub async fn validate_request<T: FormRequest>(
        &self,
        mode: OperationMode,
        ctx: &ValidationContext,
        payload: Value,
    ) -> Result<Value, GateError> {
        let rules = T::rules(mode, ctx);
        let messages = T::messages();
        self.run(&rules, &messages, ctx, payload).await
    }

    /// Evaluate a payload against an explicit rule set and message table
    ///
    /// Returns the normalized attributes on success. Rule violations come
    /// back as `GateError::Validation`; a storage collaborator failure aborts
    /// the call with `GateError::Storage`.
    pub async fn run(
        &self,
        rules: &RuleSet,
        messages: &MessageTable,
        ctx: &ValidationContext,
        payload: Value,
    ) -> Result<Value, GateError> {
        let mut errors = ValidationErrors::new();

        for (path, constraints) in rules.iter() {
            if let Some(root) = path.strip_suffix(".*") {
                // Element rules apply to each member of the named array field.
                let Some(elements) = payload.get(root).and_then(Value::as_array) else {
                    continue;
                };
                for (index, element) in elements.iter().enumerate() {
                    let concrete = format!("{}.{}", root, index);
                    self.evaluate_field(
                        path,
                        &concrete,
                        Some(element),
                        constraints,
                        &payload,
                        ctx,
                        messages,
                        &mut errors,
                    )
                    .await?;
                }
            } else {
                self.evaluate_field(
                    path,
                    path,
                    payload.get(path),
                    constraints,
                    &payload,
                    ctx,
                    messages,
                    &mut errors,
                )
                .await?;
            }
        }

        if errors.is_empty() {
            tracing::debug!(fields = rules.len(), "validation passed");
            Ok(normalize(rules, &payload))
        } else {
            tracing::debug!(failed_fields = errors.len(), "validation failed");
            Err(GateError::Validation(errors))
        }
    }

    /// Evaluate one field's constraint list, stopping at the first violation
    #[allow(clippy::too_many_arguments)]
    async fn evaluate_field(
        &self,
        declared: &str,
        concrete: &str,
        value: Option<&Value>,
        constraints: &[FieldConstraint],
        payload: &Value,
        ctx: &ValidationContext,
        messages: &MessageTable,
        errors: &mut ValidationErrors,
    ) -> Result<(), GateError> {
        if is_empty(value) {
            // Required fails on empty; Nullable (or absence of Required)
            // passes through and skips the rest of the list.
            if constraints
                .iter()
                .any(|c| matches!(c, FieldConstraint::Required))
            {
                errors.add(concrete, messages.resolve(declared, concrete, "required"));
            }
            return Ok(());
        }
        let Some(value) = value else {
            return Ok(());
        };

        for constraint in constraints {
            let violated = match constraint {
                FieldConstraint::Exists { collection, key } => {
                    let found = self
                        .lookup
                        .exists(collection, key, value)
                        .await
                        .map_err(|e| lookup_failure(collection, e))?;
                    (!found).then_some("exists")
                }
                FieldConstraint::Unique { collection, key } => {
                    let conflict = self
                        .lookup
                        .find_conflicting(collection, key, value, ctx.current_id())
                        .await
                        .map_err(|e| lookup_failure(collection, e))?;
                    conflict.then_some("unique")
                }
                local => local.violation(value, payload),
            };

            if let Some(rule) = violated {
                errors.add(concrete, messages.resolve(declared, concrete, rule));
                break;
            }
        }
        Ok(())
    }
}

fn lookup_failure(collection: &str, err: anyhow::Error) -> GateError {
    tracing::warn!(collection, error = %err, "storage lookup failed");
    GateError::Storage(StorageError::LookupFailed {
        collection: collection.to_string(),
        message: err.to_string(),
    })
}

/// Filter the payload down to the fields declared in the rule set
fn normalize(rules: &RuleSet, payload: &Value) -> Value {
    let mut attributes = Map::new();
    if let Value::Object(submitted) = payload {
        for root in rules.roots() {
            if let Some(value) = submitted.get(root) {
                attributes.insert(root.to_string(), value.clone());
            }
        }
    }
    Value::Object(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::constraint::ValueType;
    use crate::storage::InMemoryLookupService;
    use serde_json::json;

    fn validator() -> RequestValidator {
        RequestValidator::new(Arc::new(InMemoryLookupService::new()))
    }

    fn name_rules() -> RuleSet {
        RuleSet::new()
            .field(
                "name",
                vec![
                    FieldConstraint::Required,
                    FieldConstraint::TypeOf(ValueType::String),
                    FieldConstraint::MaxLength(10),
                ],
            )
            .field(
                "notes",
                vec![
                    FieldConstraint::Nullable,
                    FieldConstraint::TypeOf(ValueType::String),
                ],
            )
    }

    #[tokio::test]
    async fn test_missing_required_field_fails() {
        let result = validator()
            .run(
                &name_rules(),
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({}),
            )
            .await;

        let Err(GateError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert!(errors.has_field("name"));
        assert!(!errors.has_field("notes"));
    }

    #[tokio::test]
    async fn test_nullable_field_skips_remaining_checks() {
        let result = validator()
            .run(
                &name_rules(),
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({"name": "ok", "notes": null}),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_first_violation_stops_field_evaluation() {
        // A non-string value violates the type check; the length check after
        // it must not add a second message.
        let result = validator()
            .run(
                &name_rules(),
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({"name": 12345}),
            )
            .await;

        let Err(GateError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.field_messages("name").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_errors_accumulate_across_fields() {
        let rules = RuleSet::new()
            .field("a", vec![FieldConstraint::Required])
            .field("b", vec![FieldConstraint::Required]);
        let result = validator()
            .run(&rules, &MessageTable::new(), &ValidationContext::new(), json!({}))
            .await;

        let Err(GateError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_normalization_drops_extraneous_fields() {
        let result = validator()
            .run(
                &name_rules(),
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({"name": "ok", "injected": "value"}),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"name": "ok"}));
    }

    #[tokio::test]
    async fn test_wildcard_reports_per_element() {
        let rules = RuleSet::new()
            .field(
                "tags",
                vec![
                    FieldConstraint::Nullable,
                    FieldConstraint::TypeOf(ValueType::Array),
                ],
            )
            .field(
                "tags.*",
                vec![
                    FieldConstraint::TypeOf(ValueType::String),
                    FieldConstraint::MaxLength(5),
                ],
            );

        let result = validator()
            .run(
                &rules,
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({"tags": ["ok", "much-too-long", 7]}),
            )
            .await;

        let Err(GateError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert!(!errors.has_field("tags.0"));
        assert!(errors.has_field("tags.1"));
        assert!(errors.has_field("tags.2"));
    }

    #[tokio::test]
    async fn test_registered_message_is_used() {
        let rules = RuleSet::new().field("name", vec![FieldConstraint::Required]);
        let messages = MessageTable::new().message("name", "required", "Please provide a name.");

        let result = validator()
            .run(&rules, &messages, &ValidationContext::new(), json!({}))
            .await;

        let Err(GateError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.field_messages("name").unwrap()[0],
            "Please provide a name."
        );
    }

    #[tokio::test]
    async fn test_exists_check_consults_lookup() {
        let store = InMemoryLookupService::new();
        let org_id = uuid::Uuid::new_v4();
        store
            .insert("organizations", org_id, json!({"name": "Acme"}))
            .unwrap();

        let validator = RequestValidator::new(Arc::new(store));
        let rules = RuleSet::new().field(
            "organization_id",
            vec![
                FieldConstraint::Required,
                FieldConstraint::Exists {
                    collection: "organizations",
                    key: "id",
                },
            ],
        );

        let ok = validator
            .run(
                &rules,
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({"organization_id": org_id.to_string()}),
            )
            .await;
        assert!(ok.is_ok());

        let missing = validator
            .run(
                &rules,
                &MessageTable::new(),
                &ValidationContext::new(),
                json!({"organization_id": uuid::Uuid::new_v4().to_string()}),
            )
            .await;
        assert!(matches!(missing, Err(GateError::Validation(_))));
    }
}
