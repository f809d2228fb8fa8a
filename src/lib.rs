//! # Formgate
//!
//! A declarative request validation gate for multi-tenant HR and finance APIs.
//!
//! ## Features
//!
//! - **Rule Tables**: Each resource kind declares an ordered constraint list per field
//! - **Create/Update Variants**: Rules adapt to the operation and the bound current resource
//! - **Uniqueness Exclusion**: Records being updated may collide with themselves on unique fields
//! - **Accumulated Errors**: All field violations for a request are reported together
//! - **Payload Normalization**: Validated output contains only the declared fields
//! - **Storage Collaborator**: Existence and uniqueness lookups delegate to a read-only service
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formgate::prelude::*;
//!
//! let lookup = Arc::new(InMemoryLookupService::new());
//! let validator = RequestValidator::new(lookup);
//!
//! let ctx = ValidationContext::default();
//! let result = validator
//!     .validate(
//!         ResourceKind::Employee,
//!         OperationMode::Create,
//!         &ctx,
//!         json!({
//!             "first_name": "Ada",
//!             "last_name": "Lovelace",
//!             "email": "ada@example.com",
//!             "employee_id": "EMP-001",
//!             "organization_id": org_id,
//!             "status": "active",
//!         }),
//!     )
//!     .await;
//!
//! match result {
//!     Ok(attributes) => { /* proceed to business logic */ }
//!     Err(GateError::Validation(errors)) => { /* 422 with field -> messages */ }
//!     Err(other) => { /* storage collaborator failure, 500 */ }
//! }
//! ```

pub mod config;
pub mod core;
pub mod requests;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{GateError, GateResult, RequestError, StorageError},
        validation::{
            FormRequest,
            constraint::{DateAnchor, DateComparator, FieldConstraint, ValueType},
            context::{CurrentResource, OperationMode, ValidationContext},
            engine::RequestValidator,
            extractor::{LookupProvider, Validated},
            ruleset::{MessageTable, RuleSet, ValidationErrors},
        },
    };

    // === Requests ===
    pub use crate::requests::{
        ResourceKind, document::DocumentRequest, employee::EmployeeRequest, loan::LoanRequest,
        loan_repayment::LoanRepaymentRequest, organization::OrganizationRequest,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryLookupService, LookupService};

    // === Config ===
    pub use crate::config::MessageOverrides;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use uuid::Uuid;
}
