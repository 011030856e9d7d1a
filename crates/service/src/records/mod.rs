//! Traits the HTTP layer depends on.
//!
//! The JSON file stores in [`crate::file`] implement them; another backend
//! only has to provide the same operations.

pub mod case_repository;
pub mod document_repository;

pub use case_repository::CaseRepository;
pub use document_repository::DocumentRepository;
