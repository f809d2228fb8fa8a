//! Validation rules for organization (tenant) requests
//!
//! The password rule is conditional on the bound context rather than on the
//! HTTP verb: registering a new tenant requires a password, while updates to
//! an existing organization only validate one when it is submitted.

use crate::core::validation::FormRequest;
use crate::core::validation::constraint::{FieldConstraint, ValueType};
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::ruleset::{MessageTable, RuleSet};

/// Minimum password length for tenant accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub struct OrganizationRequest;

impl FormRequest for OrganizationRequest {
    fn rules(_mode: OperationMode, ctx: &ValidationContext) -> RuleSet {
        use FieldConstraint::*;

        let password_presence = if ctx.current.is_none() { Required } else { Nullable };

        RuleSet::new()
            .field(
                "name",
                vec![Required, TypeOf(ValueType::String), MaxLength(255)],
            )
            .field(
                "code",
                vec![
                    Required,
                    TypeOf(ValueType::String),
                    MaxLength(50),
                    Unique {
                        collection: "organizations",
                        key: "code",
                    },
                ],
            )
            .field(
                "registration_number",
                vec![
                    Nullable,
                    TypeOf(ValueType::String),
                    MaxLength(100),
                    Unique {
                        collection: "organizations",
                        key: "registration_number",
                    },
                ],
            )
            .field(
                "email",
                vec![
                    Required,
                    TypeOf(ValueType::Email),
                    Unique {
                        collection: "users",
                        key: "email",
                    },
                ],
            )
            .field(
                "password",
                vec![
                    password_presence,
                    TypeOf(ValueType::String),
                    MinLength(MIN_PASSWORD_LENGTH),
                ],
            )
            .field(
                "phone",
                vec![Nullable, TypeOf(ValueType::String), MaxLength(20)],
            )
            .field(
                "address",
                vec![Nullable, TypeOf(ValueType::String), MaxLength(500)],
            )
            .field(
                "currency",
                vec![Nullable, TypeOf(ValueType::String), ExactLength(3)],
            )
            .field("website", vec![Nullable, TypeOf(ValueType::Url)])
    }

    fn messages() -> MessageTable {
        MessageTable::new()
            .message("name", "required", "The organization name is required.")
            .message("code", "required", "The organization code is required.")
            .message(
                "code",
                "unique",
                "An organization with this code already exists.",
            )
            .message(
                "registration_number",
                "unique",
                "An organization with this registration number already exists.",
            )
            .message("email", "required", "The contact email is required.")
            .message("email", "email", "The contact email is not valid.")
            .message(
                "email",
                "unique",
                "An account with this email address already exists.",
            )
            .message("password", "required", "A password is required.")
            .message(
                "password",
                "min",
                "The password must be at least 8 characters.",
            )
            .message(
                "currency",
                "size",
                "The currency must be a 3-letter ISO code.",
            )
            .message("website", "url", "The website must be a valid URL.")
    }
}
