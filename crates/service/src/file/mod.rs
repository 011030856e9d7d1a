//! JSON file implementations of the record traits.

pub mod case_store;
pub mod document_store;

pub use case_store::CaseStore;
pub use document_store::DocumentStore;
