//! Core module containing the error hierarchy and the validation engine

pub mod error;
pub mod service;
pub mod validation;

pub use error::{GateError, GateResult, RequestError, StorageError};
pub use service::LookupService;
pub use validation::{
    FormRequest,
    constraint::{DateAnchor, DateComparator, FieldConstraint, ValueType},
    context::{CurrentResource, OperationMode, ValidationContext},
    engine::RequestValidator,
    ruleset::{MessageTable, RuleSet, ValidationErrors},
};
