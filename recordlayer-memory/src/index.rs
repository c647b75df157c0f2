//! Index metadata and the value → row index map.

use std::{collections::HashMap, marker::PhantomData, sync::Arc};
use tracing::{debug, warn};

use recordlayer_core::{record::Record, value::IndexValue};

/// The indexed attributes of a record type, discovered once and cached.
#[derive(Debug)]
pub struct IndexDescriptor<T> {
    attributes: Arc<[&'static str]>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for IndexDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            attributes: Arc::clone(&self.attributes),
            _record: PhantomData,
        }
    }
}

impl<T: Record> IndexDescriptor<T> {
    /// Queries the record type for its indexed attributes.
    pub fn discover() -> Self {
        let attributes: Arc<[&'static str]> = T::indexed_attributes().into();

        debug!(
            record = T::record_name(),
            attributes = ?attributes,
            "discovered indexed attributes"
        );

        Self {
            attributes,
            _record: PhantomData,
        }
    }

    pub fn attributes(&self) -> &[&'static str] {
        &self.attributes
    }
}

/// Maps every indexed attribute value to the most recently admitted row carrying it.
///
/// All indexed attributes share one map, and a later row overwrites an earlier one with the
/// same value; the map never holds more than one row per value.
pub(crate) struct IndexMap<T> {
    entries: HashMap<IndexValue, Arc<T>>,
}

impl<T> Default for IndexMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Record> IndexMap<T> {
    /// Records every indexed attribute of `row`.
    ///
    /// An attribute that cannot be read is skipped and logged; the remaining attributes are
    /// still indexed.
    pub fn record(&mut self, descriptor: &IndexDescriptor<T>, row: &Arc<T>) {
        for attribute in descriptor.attributes() {
            match row.index_value(attribute) {
                Ok(value) => {
                    self.entries.insert(value, Arc::clone(row));
                }
                Err(err) => {
                    warn!(
                        record = T::record_name(),
                        attribute,
                        error = %err,
                        "skipping index update for unreadable attribute"
                    );
                }
            }
        }
    }

    pub fn get(&self, value: &IndexValue) -> Option<&Arc<T>> {
        self.entries.get(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
