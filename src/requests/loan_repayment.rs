//! Validation rules for loan repayment requests

use crate::core::validation::FormRequest;
use crate::core::validation::constraint::{FieldConstraint, ValueType};
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::ruleset::{MessageTable, RuleSet};

/// Allowed repayment channels
pub const PAYMENT_METHODS: &[&str] = &["cash", "bank_transfer", "payroll_deduction"];

pub struct LoanRepaymentRequest;

impl FormRequest for LoanRepaymentRequest {
    fn rules(_mode: OperationMode, _ctx: &ValidationContext) -> RuleSet {
        use FieldConstraint::*;

        RuleSet::new()
            .field(
                "loan_id",
                vec![
                    Required,
                    Exists {
                        collection: "loans",
                        key: "id",
                    },
                ],
            )
            .field(
                "amount",
                vec![Required, TypeOf(ValueType::Numeric), Min(0.01)],
            )
            .field("payment_date", vec![Required, TypeOf(ValueType::Date)])
            .field("payment_method", vec![Required, OneOf(PAYMENT_METHODS)])
            .field(
                "reference",
                vec![Nullable, TypeOf(ValueType::String), MaxLength(100)],
            )
            .field(
                "notes",
                vec![Nullable, TypeOf(ValueType::String), MaxLength(500)],
            )
    }

    fn messages() -> MessageTable {
        MessageTable::new()
            .message("loan_id", "required", "The loan being repaid is required.")
            .message("loan_id", "exists", "The selected loan does not exist.")
            .message("amount", "required", "The repayment amount is required.")
            .message(
                "amount",
                "min",
                "The repayment amount must be greater than zero.",
            )
            .message("payment_date", "required", "The payment date is required.")
            .message(
                "payment_date",
                "date",
                "The payment date is not a valid date.",
            )
            .message(
                "payment_method",
                "in",
                "The selected payment method is not supported.",
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_reference_must_exist() {
        let rules = LoanRepaymentRequest::rules(OperationMode::Create, &ValidationContext::new());
        assert!(rules.get("loan_id").unwrap().contains(&FieldConstraint::Exists {
            collection: "loans",
            key: "id",
        }));
    }

    #[test]
    fn test_payment_methods() {
        assert!(PAYMENT_METHODS.contains(&"payroll_deduction"));
        assert!(!PAYMENT_METHODS.contains(&"cheque"));
    }
}
