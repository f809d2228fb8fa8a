//! Per-request validation context
//!
//! The context carries the operation mode derived from the HTTP verb and the
//! optional "current resource" bound by the route (the record being updated).
//! The current resource id parameterizes uniqueness exclusions and selects
//! conditional rule variants; the context is supplied by the caller per
//! request and never mutated by the validator.

use uuid::Uuid;

/// Whether the request creates a new record or updates an existing one
///
/// Derived from the HTTP verb by the caller: POST maps to `Create`,
/// everything else to `Update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Create,
    Update,
}

impl OperationMode {
    /// True when the request is a creation
    pub fn is_create(self) -> bool {
        matches!(self, OperationMode::Create)
    }
}

/// The resource an update request is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentResource {
    /// Primary key of the bound record, excluded from uniqueness checks
    pub id: Uuid,
}

impl CurrentResource {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Ambient bindings for a single validation call
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// The record being updated, if the route bound one
    pub current: Option<CurrentResource>,
}

impl ValidationContext {
    /// Context with no bound resource (creation requests)
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bound to an existing record (update requests)
    pub fn for_resource(id: Uuid) -> Self {
        Self {
            current: Some(CurrentResource::new(id)),
        }
    }

    /// Id of the bound record, if any
    pub fn current_id(&self) -> Option<Uuid> {
        self.current.as_ref().map(|r| r.id)
    }
}
