//! Convenient re-exports of commonly used types from recordlayer.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use recordlayer::prelude::*;
//! ```
//!
//! This provides access to:
//! - The `Record` trait and its derive macro
//! - Index values
//! - The record store, its builder and bound queries
//! - Admission outcomes and error types

pub use recordlayer_core::{
    record::Record,
    value::IndexValue,
    predicate::{Admission, AdmissionPredicate},
    error::{RecordStoreError, RecordStoreResult},
};
pub use recordlayer_memory::{
    store::{RecordStore, RecordStoreBuilder},
    query::{BoundQuery, Matcher, matcher},
};
pub use recordlayer_macros::Record;
