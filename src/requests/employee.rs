//! Validation rules for employee create/update requests

use crate::core::validation::FormRequest;
use crate::core::validation::constraint::{
    DateAnchor, DateComparator, FieldConstraint, ValueType,
};
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::ruleset::{MessageTable, RuleSet};

/// Allowed employment statuses
pub const STATUSES: &[&str] = &["active", "inactive", "terminated"];

pub struct EmployeeRequest;

impl FormRequest for EmployeeRequest {
    fn rules(_mode: OperationMode, _ctx: &ValidationContext) -> RuleSet {
        use FieldConstraint::*;

        RuleSet::new()
            .field(
                "first_name",
                vec![Required, TypeOf(ValueType::String), MaxLength(100)],
            )
            .field(
                "last_name",
                vec![Required, TypeOf(ValueType::String), MaxLength(100)],
            )
            .field(
                "email",
                vec![
                    Required,
                    TypeOf(ValueType::Email),
                    Unique {
                        collection: "employees",
                        key: "email",
                    },
                ],
            )
            .field(
                "employee_id",
                vec![
                    Required,
                    TypeOf(ValueType::String),
                    MaxLength(50),
                    Unique {
                        collection: "employees",
                        key: "employee_id",
                    },
                ],
            )
            .field(
                "phone",
                vec![Nullable, TypeOf(ValueType::String), MaxLength(20)],
            )
            .field(
                "date_of_birth",
                vec![
                    Nullable,
                    TypeOf(ValueType::Date),
                    DateCompare {
                        anchor: DateAnchor::Today,
                        comparator: DateComparator::Before,
                    },
                ],
            )
            .field(
                "organization_id",
                vec![
                    Required,
                    Exists {
                        collection: "organizations",
                        key: "id",
                    },
                ],
            )
            .field("salary", vec![Nullable, TypeOf(ValueType::Numeric), Min(0.0)])
            .field("status", vec![Required, OneOf(STATUSES)])
    }

    fn messages() -> MessageTable {
        MessageTable::new()
            .message("first_name", "required", "The first name is required.")
            .message("last_name", "required", "The last name is required.")
            .message("email", "required", "The email address is required.")
            .message("email", "email", "The email address is not valid.")
            .message(
                "email",
                "unique",
                "An employee with this email address is already registered.",
            )
            .message("employee_id", "required", "The employee number is required.")
            .message(
                "employee_id",
                "unique",
                "An employee with this employee number already exists.",
            )
            .message(
                "date_of_birth",
                "before",
                "The date of birth must be in the past.",
            )
            .message(
                "organization_id",
                "required",
                "The employee must belong to an organization.",
            )
            .message(
                "organization_id",
                "exists",
                "The selected organization does not exist.",
            )
            .message("salary", "min", "The salary may not be negative.")
            .message("status", "in", "The selected status is not valid.")
    }
}
