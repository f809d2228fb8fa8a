//! Validation rules for document upload requests
//!
//! Creation must carry the file and the owning organization; updates may
//! rework metadata without re-uploading.

use crate::core::validation::FormRequest;
use crate::core::validation::constraint::{FieldConstraint, ValueType};
use crate::core::validation::context::{OperationMode, ValidationContext};
use crate::core::validation::ruleset::{MessageTable, RuleSet};

/// Maximum accepted upload size (10 MiB)
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub struct DocumentRequest;

impl FormRequest for DocumentRequest {
    fn rules(mode: OperationMode, _ctx: &ValidationContext) -> RuleSet {
        use FieldConstraint::*;

        let file_presence = if mode.is_create() { Required } else { Nullable };
        let organization_presence = if mode.is_create() { Required } else { Nullable };

        RuleSet::new()
            .field(
                "name",
                vec![Required, TypeOf(ValueType::String), MaxLength(255)],
            )
            .field(
                "description",
                vec![Nullable, TypeOf(ValueType::String), MaxLength(1000)],
            )
            .field(
                "file",
                vec![
                    file_presence,
                    TypeOf(ValueType::File),
                    MaxBytes(MAX_FILE_BYTES),
                ],
            )
            .field(
                "organization_id",
                vec![
                    organization_presence,
                    Exists {
                        collection: "organizations",
                        key: "id",
                    },
                ],
            )
            .field(
                "employee_id",
                vec![
                    Nullable,
                    Exists {
                        collection: "employees",
                        key: "id",
                    },
                ],
            )
    }

    fn messages() -> MessageTable {
        MessageTable::new()
            .message("name", "required", "The document name is required.")
            .message("file", "required", "A file must be attached to the document.")
            .message("file", "file", "The uploaded file is not valid.")
            .message("file", "max", "The file may not be larger than 10 MB.")
            .message(
                "organization_id",
                "required",
                "The document must belong to an organization.",
            )
            .message(
                "organization_id",
                "exists",
                "The selected organization does not exist.",
            )
            .message(
                "employee_id",
                "exists",
                "The selected employee does not exist.",
            )
    }
}
