//! Error types and result types for record store operations.
//!
//! Very little in a record store can fail: admission rejections are not errors and lookups
//! on unknown values simply return nothing. What remains is reading indexed attributes off
//! a record and converting them into [`IndexValue`](crate::value::IndexValue)s.

use thiserror::Error;

/// Represents all possible errors that can occur when reading index data off a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordStoreError {
    /// The record type has no indexed attribute with the requested name.
    #[error("Unknown indexed attribute {attribute} on record {record}")]
    UnknownAttribute {
        /// The attribute that was requested.
        attribute: String,
        /// The record name of the schema type.
        record: String,
    },
    /// The attribute exists but its value could not be read or converted.
    #[error("Could not read attribute {attribute} on record {record}: {reason}")]
    AttributeAccess {
        /// The attribute that was being read.
        attribute: String,
        /// The record name of the schema type.
        record: String,
        /// Why the read failed.
        reason: String,
    },
    /// An integer does not fit into an index value.
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}

/// A specialized `Result` type for record store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;
