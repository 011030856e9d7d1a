//! Service layer: file-backed record stores for cases and documents.
//! - `storage` holds the generic JSON array file store.
//! - `file` holds the case and document stores built on it.
//! - `records` defines the traits the HTTP layer talks to.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod records;
pub mod file;
