//! Validation engine
//!
//! This module provides a declarative approach to validating and filtering
//! request payloads before they reach the handlers. Each resource kind
//! declares a rule table (field path to ordered constraint list) and a
//! message table; the engine evaluates both against an untyped JSON payload.

pub mod constraint;
pub mod context;
pub mod engine;
pub mod extractor;
pub mod ruleset;

pub use constraint::{DateAnchor, DateComparator, FieldConstraint, ValueType};
pub use context::{CurrentResource, OperationMode, ValidationContext};
pub use engine::RequestValidator;
pub use extractor::Validated;
pub use ruleset::{MessageTable, RuleSet, ValidationErrors};

/// Trait for request types that carry declarative validation rules
///
/// A form request bundles three things: an authorize gate (permissive by
/// default), a rule table builder parameterized by the operation mode and
/// the bound current resource, and a table of user-facing messages for
/// violated rules.
pub trait FormRequest {
    /// Authorization gate, checked before validation runs
    fn authorize(_ctx: &ValidationContext) -> bool {
        true
    }

    /// Build the rule table for the given operation mode and context
    fn rules(mode: OperationMode, ctx: &ValidationContext) -> RuleSet;

    /// User-facing messages for violated rules
    fn messages() -> MessageTable;
}
