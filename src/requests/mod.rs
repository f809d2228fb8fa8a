//! Declarative request definitions for the five resource kinds
//!
//! Each submodule declares one form request: the rule table builder, the
//! message table and the (always permissive) authorize gate. [`ResourceKind`]
//! dispatches from a runtime tag to the matching definition.

pub mod document;
pub mod employee;
pub mod loan;
pub mod loan_repayment;
pub mod organization;

pub use document::DocumentRequest;
pub use employee::EmployeeRequest;
pub use loan::LoanRequest;
pub use loan_repayment::LoanRepaymentRequest;
pub use organization::OrganizationRequest;

use crate::core::error::GateError;
use crate::core::validation::FormRequest;
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::engine::RequestValidator;
use crate::core::validation::ruleset::{MessageTable, RuleSet};
use serde_json::Value;

/// The resource kinds the gate validates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Document,
    Employee,
    LoanRepayment,
    Loan,
    Organization,
}

impl ResourceKind {
    /// Singular name of the resource kind
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Document => "document",
            ResourceKind::Employee => "employee",
            ResourceKind::LoanRepayment => "loan_repayment",
            ResourceKind::Loan => "loan",
            ResourceKind::Organization => "organization",
        }
    }

    /// Build the rule table for this kind
    pub fn rules(self, mode: OperationMode, ctx: &ValidationContext) -> RuleSet {
        match self {
            ResourceKind::Document => DocumentRequest::rules(mode, ctx),
            ResourceKind::Employee => EmployeeRequest::rules(mode, ctx),
            ResourceKind::LoanRepayment => LoanRepaymentRequest::rules(mode, ctx),
            ResourceKind::Loan => LoanRequest::rules(mode, ctx),
            ResourceKind::Organization => OrganizationRequest::rules(mode, ctx),
        }
    }

    /// Message table for this kind
    pub fn messages(self) -> MessageTable {
        match self {
            ResourceKind::Document => DocumentRequest::messages(),
            ResourceKind::Employee => EmployeeRequest::messages(),
            ResourceKind::LoanRepayment => LoanRepaymentRequest::messages(),
            ResourceKind::Loan => LoanRequest::messages(),
            ResourceKind::Organization => OrganizationRequest::messages(),
        }
    }

    /// Authorize gate for this kind (permissive for every shipped request)
    pub fn authorize(self, ctx: &ValidationContext) -> bool {
        match self {
            ResourceKind::Document => DocumentRequest::authorize(ctx),
            ResourceKind::Employee => EmployeeRequest::authorize(ctx),
            ResourceKind::LoanRepayment => LoanRepaymentRequest::authorize(ctx),
            ResourceKind::Loan => LoanRequest::authorize(ctx),
            ResourceKind::Organization => OrganizationRequest::authorize(ctx),
        }
    }
}

impl RequestValidator {
    /// Validate a payload against the rule table for a resource kind
    ///
    /// The main entry point for callers that dispatch on a runtime tag
    /// rather than a concrete request type.
    pub async fn validate(
        &self,
        kind: ResourceKind,
        mode: OperationMode,
        ctx: &ValidationContext,
        payload: Value,
    ) -> Result<Value, GateError> {
        let rules = kind.rules(mode, ctx);
        let messages = kind.messages();
        self.run(&rules, &messages, ctx, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_builds_rules() {
        let ctx = ValidationContext::new();
        for kind in [
            ResourceKind::Document,
            ResourceKind::Employee,
            ResourceKind::LoanRepayment,
            ResourceKind::Loan,
            ResourceKind::Organization,
        ] {
            assert!(!kind.rules(OperationMode::Create, &ctx).is_empty());
            assert!(!kind.messages().is_empty());
        }
    }

    #[test]
    fn test_authorize_is_permissive() {
        let ctx = ValidationContext::new();
        assert!(ResourceKind::Loan.authorize(&ctx));
        assert!(ResourceKind::Organization.authorize(&ctx));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ResourceKind::LoanRepayment.name(), "loan_repayment");
    }
}
