//! Storage collaborator implementations
//!
//! The trait lives in `core::service`; backends implement it here.

pub mod in_memory;

pub use crate::core::service::LookupService;
pub use in_memory::InMemoryLookupService;
