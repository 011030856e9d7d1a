//! Storage abstractions for service layer
//!
//! Each collection lives in one JSON file holding a single array. The store
//! owns reading, parsing, and atomic replacement so callers only deal in
//! records.

pub mod json_array_store;

pub use json_array_store::{JsonArrayStore, LoadMode};
