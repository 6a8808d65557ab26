//! Asset catalog for the character selector.
//!
//! The catalog is plain data: a JSON file listing identifiers and the path
//! convention that maps each identifier to a model file.

/// Catalog asset type, built-in defaults and the JSON loading systems.
pub mod catalog;
