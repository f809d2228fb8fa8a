//! Validation rules for loan create/update requests
//!
//! The repayment window must be coherent: the start date may not be in the
//! past and the end date must fall strictly after the start date.

use crate::core::validation::FormRequest;
use crate::core::validation::constraint::{
    DateAnchor, DateComparator, FieldConstraint, ValueType,
};
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::ruleset::{MessageTable, RuleSet};

/// Allowed loan statuses
pub const STATUSES: &[&str] = &["pending", "approved", "active", "closed", "defaulted"];

/// Inclusive principal bounds
pub const MIN_AMOUNT: f64 = 1.0;
pub const MAX_AMOUNT: f64 = 1_000_000.0;

pub struct LoanRequest;

impl FormRequest for LoanRequest {
    fn rules(_mode: OperationMode, _ctx: &ValidationContext) -> RuleSet {
        use FieldConstraint::*;

        RuleSet::new()
            .field(
                "employee_id",
                vec![
                    Required,
                    Exists {
                        collection: "employees",
                        key: "id",
                    },
                ],
            )
            .field(
                "loan_number",
                vec![
                    Required,
                    TypeOf(ValueType::String),
                    MaxLength(50),
                    Unique {
                        collection: "loans",
                        key: "loan_number",
                    },
                ],
            )
            .field(
                "amount",
                vec![
                    Required,
                    TypeOf(ValueType::Numeric),
                    Min(MIN_AMOUNT),
                    Max(MAX_AMOUNT),
                ],
            )
            .field(
                "interest_rate",
                vec![
                    Nullable,
                    TypeOf(ValueType::Numeric),
                    Min(0.0),
                    Max(100.0),
                ],
            )
            .field(
                "start_date",
                vec![
                    Required,
                    TypeOf(ValueType::Date),
                    DateCompare {
                        anchor: DateAnchor::Today,
                        comparator: DateComparator::AfterOrEqual,
                    },
                ],
            )
            .field(
                "end_date",
                vec![
                    Required,
                    TypeOf(ValueType::Date),
                    DateCompare {
                        anchor: DateAnchor::Field("start_date"),
                        comparator: DateComparator::After,
                    },
                ],
            )
            .field("status", vec![Required, OneOf(STATUSES)])
            .field("tags", vec![Nullable, TypeOf(ValueType::Array)])
            .field(
                "tags.*",
                vec![TypeOf(ValueType::String), MaxLength(50)],
            )
            .field("documents", vec![Nullable, TypeOf(ValueType::Array)])
            .field("documents.*", vec![TypeOf(ValueType::String)])
            .field("settings", vec![Nullable, TypeOf(ValueType::Array)])
            .field("settings.*", vec![TypeOf(ValueType::String)])
    }

    fn messages() -> MessageTable {
        MessageTable::new()
            .message("employee_id", "required", "The borrowing employee is required.")
            .message(
                "employee_id",
                "exists",
                "The selected employee does not exist.",
            )
            .message("loan_number", "required", "The loan number is required.")
            .message(
                "loan_number",
                "unique",
                "A loan with this loan number already exists.",
            )
            .message("amount", "required", "The loan amount is required.")
            .message("amount", "min", "The loan amount must be at least 1.")
            .message("amount", "max", "The loan amount may not exceed 1,000,000.")
            .message(
                "interest_rate",
                "max",
                "The interest rate may not exceed 100 percent.",
            )
            .message("start_date", "required", "The start date is required.")
            .message("start_date", "date", "The start date is not a valid date.")
            .message(
                "start_date",
                "after_or_equal",
                "The start date may not be in the past.",
            )
            .message("end_date", "required", "The end date is required.")
            .message("end_date", "date", "The end date is not a valid date.")
            .message(
                "end_date",
                "after",
                "The end date must be after the start date.",
            )
            .message("status", "in", "The selected status is not valid.")
            .message("tags.*", "string", "Each tag must be a string.")
            .message("tags.*", "max", "Tags may not exceed 50 characters.")
            .message("documents.*", "string", "Each document reference must be a string.")
            .message("settings.*", "string", "Each setting must be a string.")
    }
}
