//! The schema trait every stored record type implements.
//!
//! A record type declares, once and statically, which of its attributes are indexed, and
//! knows how to read each of those attributes as an [`IndexValue`]. Stores query the
//! descriptor a single time when they are constructed.

use crate::{error::RecordStoreResult, value::IndexValue};

/// Core trait that all records stored in a record store must implement.
///
/// # Deriving
///
/// The `recordlayer` crate provides `#[derive(Record)]`, which marks attributes with
/// `#[record(index)]` and generates readers inside the type's own module, so private fields
/// are readable by the store.
///
/// # Example
///
/// ```
/// use recordlayer_core::{
///     error::{RecordStoreError, RecordStoreResult},
///     record::Record,
///     value::IndexValue,
/// };
///
/// pub struct User {
///     username: String,
///     num: u32,
/// }
///
/// impl Record for User {
///     fn record_name() -> &'static str {
///         "users"
///     }
///
///     fn indexed_attributes() -> &'static [&'static str] {
///         &["username", "num"]
///     }
///
///     fn index_value(&self, attribute: &str) -> RecordStoreResult<IndexValue> {
///         match attribute {
///             "username" => Ok(IndexValue::from(&self.username)),
///             "num" => Ok(IndexValue::from(self.num)),
///             _ => Err(RecordStoreError::UnknownAttribute {
///                 attribute: attribute.to_string(),
///                 record: Self::record_name().to_string(),
///             }),
///         }
///     }
/// }
/// ```
pub trait Record: Send + Sync + 'static {
    /// Returns the name of this record type, used in logs and errors.
    fn record_name() -> &'static str;

    /// Returns the names of the indexed attributes, in declaration order.
    ///
    /// The returned set must not change over the lifetime of the program.
    fn indexed_attributes() -> &'static [&'static str];

    /// Reads an indexed attribute off this record.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`RecordStoreError::UnknownAttribute`](crate::error::RecordStoreError::UnknownAttribute)
    /// if `attribute` is not indexed, or
    /// [`RecordStoreError::AttributeAccess`](crate::error::RecordStoreError::AttributeAccess)
    /// if the value cannot be read.
    fn index_value(&self, attribute: &str) -> RecordStoreResult<IndexValue>;
}
