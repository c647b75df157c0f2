//! The value type used as index keys and query parameters.
//!
//! Every indexed attribute of a record is converted into an [`IndexValue`] when the record is
//! admitted, and every lookup is keyed by one. Values of different variants never compare equal,
//! so `Int(1)` and `Text("1")` are distinct keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RecordStoreError;

/// A hashable value stored as an index key.
///
/// # Example
///
/// ```
/// use recordlayer_core::value::IndexValue;
///
/// assert_eq!(IndexValue::from("chris"), IndexValue::Text("chris".to_string()));
/// assert_eq!(IndexValue::from(7u32), IndexValue::Int(7));
/// assert_eq!(IndexValue::from(None::<i32>), IndexValue::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexValue {
    /// Absent value (an unset optional attribute).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value; all lossless integer types are widened to `i64`.
    Int(i64),
    /// String value.
    Text(String),
}

impl IndexValue {
    /// Returns the text if this is a [`IndexValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IndexValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer if this is an [`IndexValue::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            IndexValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean if this is an [`IndexValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            IndexValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, IndexValue::Null)
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexValue::Null => write!(f, "null"),
            IndexValue::Bool(value) => write!(f, "{value}"),
            IndexValue::Int(value) => write!(f, "{value}"),
            IndexValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for IndexValue {
    fn from(value: String) -> Self {
        IndexValue::Text(value)
    }
}

impl From<&str> for IndexValue {
    fn from(value: &str) -> Self {
        IndexValue::Text(value.to_string())
    }
}

impl From<&String> for IndexValue {
    fn from(value: &String) -> Self {
        IndexValue::Text(value.clone())
    }
}

impl From<char> for IndexValue {
    fn from(value: char) -> Self {
        IndexValue::Text(value.to_string())
    }
}

impl From<bool> for IndexValue {
    fn from(value: bool) -> Self {
        IndexValue::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for IndexValue {
                fn from(value: $ty) -> Self {
                    IndexValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for IndexValue {
    type Error = RecordStoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(IndexValue::Int)
            .map_err(|_| RecordStoreError::ValueOutOfRange(value.to_string()))
    }
}

impl TryFrom<usize> for IndexValue {
    type Error = RecordStoreError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(IndexValue::Int)
            .map_err(|_| RecordStoreError::ValueOutOfRange(value.to_string()))
    }
}

impl<V: Into<IndexValue>> From<Option<V>> for IndexValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(IndexValue::Null, Into::into)
    }
}
