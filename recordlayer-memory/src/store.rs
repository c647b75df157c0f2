//! In-memory record store.
//!
//! This module provides the record store: an append-only row collection gated by ordered
//! admission predicates, plus a single index map over every indexed attribute of the record
//! type. One async-aware read-write lock guards all three, so an admission (predicate check,
//! append, index update) is never observed half done.

use mea::rwlock::RwLock;
use std::{fmt, sync::Arc};
use tracing::debug;

use recordlayer_core::{
    predicate::{Admission, AdmissionPredicate, AdmissionSet, PRESENT_DESCRIPTION},
    record::Record,
    value::IndexValue,
};

use crate::{
    index::{IndexDescriptor, IndexMap},
    query::{BoundQuery, Matcher},
};

struct StoreState<T> {
    rows: Vec<Arc<T>>,
    index: IndexMap<T>,
    predicates: AdmissionSet<T>,
}

/// Thread-safe in-memory record store.
///
/// `RecordStore` is cloneable and uses an `Arc`-wrapped internal state, so clones (including
/// the ones held by [`BoundQuery`]s) share the same rows, index and predicates.
///
/// Predicates and query matchers run while the store's lock is held and must not call back
/// into the same store.
///
/// # Example
///
/// ```ignore
/// use recordlayer::prelude::*;
///
/// let store = RecordStore::<User>::new();
/// store.register_predicate(|user| user.username != "admin", "Protect admin username").await;
/// store.add_row(user).await;
///
/// let found = store.find_rows(1, |user| user.num == 1).await;
/// ```
pub struct RecordStore<T> {
    state: Arc<RwLock<StoreState<T>>>,
    descriptor: IndexDescriptor<T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            descriptor: self.descriptor.clone(),
        }
    }
}

impl<T: Record> fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("record", &T::record_name())
            .field("indexed_attributes", &self.descriptor.attributes())
            .finish_non_exhaustive()
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> {
    /// Creates an empty store holding only the built-in absent-row predicate.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for constructing a store with initial predicates and capacity.
    pub fn builder() -> RecordStoreBuilder<T> {
        RecordStoreBuilder::default()
    }

    fn from_parts(predicates: AdmissionSet<T>, capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                rows: Vec::with_capacity(capacity),
                index: IndexMap::default(),
                predicates,
            })),
            descriptor: IndexDescriptor::discover(),
        }
    }

    /// Returns the indexed attributes of `T`, as discovered when the store was created.
    pub fn indexed_attributes(&self) -> &[&'static str] {
        self.descriptor.attributes()
    }

    /// Appends an admission predicate.
    ///
    /// It applies to rows added from now on; rows already admitted are not re-checked.
    pub async fn register_predicate<P>(&self, predicate: P, description: impl Into<String>)
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.register(AdmissionPredicate::new(predicate, description)).await;
    }

    /// Appends a predicate allowing at most one admitted row to satisfy `predicate`.
    pub async fn register_unique_predicate<P>(&self, predicate: P, description: impl Into<String>)
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.register(AdmissionPredicate::unique(predicate, description)).await;
    }

    async fn register(&self, predicate: AdmissionPredicate<T>) {
        debug!(record = T::record_name(), ?predicate, "registering admission predicate");

        self.state
            .write()
            .await
            .predicates
            .push(predicate);
    }

    /// Offers a row to the store, silently discarding it if any predicate fails.
    ///
    /// Pass `None` to offer an absent row; it is always rejected.
    pub async fn add_row(&self, candidate: impl Into<Option<T>>) {
        self.try_add_row(candidate).await;
    }

    /// Offers a row to the store and reports whether it was admitted.
    ///
    /// Predicates are evaluated in registration order and evaluation stops at the first
    /// failure. An admitted row is appended to the row collection and then written into the
    /// index map under the value of each indexed attribute.
    pub async fn try_add_row(&self, candidate: impl Into<Option<T>>) -> Admission {
        let candidate = candidate.into();
        let mut state = self.state.write().await;

        let admission = state.predicates.evaluate(candidate.as_ref(), &state.rows);

        match (admission, candidate) {
            (Admission::Accepted, Some(row)) => {
                let row = Arc::new(row);
                let StoreState { rows, index, .. } = &mut *state;

                rows.push(Arc::clone(&row));
                index.record(&self.descriptor, &row);

                debug!(record = T::record_name(), rows = rows.len(), "row admitted");
                Admission::Accepted
            }
            (Admission::Rejected { position, description }, _) => {
                debug!(
                    record = T::record_name(),
                    position,
                    description = %description,
                    "row rejected"
                );
                Admission::Rejected { position, description }
            }
            // The built-in predicate rejects absent rows before this point.
            (Admission::Accepted, None) => Admission::Rejected {
                position: 0,
                description: PRESENT_DESCRIPTION.to_string(),
            },
        }
    }

    /// Looks up rows by value.
    ///
    /// If `value` is a key in the index map, the single row indexed under it is returned and
    /// `predicate` is not consulted at all, even if it would match other rows. Otherwise every
    /// row satisfying `predicate` is returned in insertion order.
    pub async fn find_rows<P>(&self, value: impl Into<IndexValue>, predicate: P) -> Vec<Arc<T>>
    where
        P: Fn(&T) -> bool,
    {
        let value = value.into();
        let state = self.state.read().await;

        if let Some(row) = state.index.get(&value) {
            debug!(record = T::record_name(), %value, "index hit");
            return vec![Arc::clone(row)];
        }

        let found = state
            .rows
            .iter()
            .filter(|row| predicate(row.as_ref()))
            .cloned()
            .collect::<Vec<_>>();

        debug!(record = T::record_name(), %value, found = found.len(), "scanned rows");
        found
    }

    /// Returns the number of admitted rows.
    pub async fn row_count(&self) -> usize {
        self.state.read().await.rows.len()
    }

    /// Returns the number of distinct values in the index map.
    pub async fn index_len(&self) -> usize {
        self.state.read().await.index.len()
    }

    /// Returns every admitted row in insertion order.
    pub async fn rows(&self) -> Vec<Arc<T>> {
        self.state.read().await.rows.clone()
    }

    /// Builds a reusable query whose value is supplied later.
    ///
    /// `builder` turns a row into a matcher over the query value; see [`BoundQuery::find`].
    pub fn build_query<F>(&self, builder: F) -> BoundQuery<T>
    where
        F: Fn(&T) -> Matcher<'_> + Send + Sync + 'static,
    {
        debug!(record = T::record_name(), "building query");

        BoundQuery::new(self.clone(), Arc::new(builder))
    }
}

/// Builder for constructing [`RecordStore`] instances.
///
/// # Example
///
/// ```ignore
/// let store = RecordStore::<User>::builder()
///     .capacity(1_000)
///     .require(|user| user.username != "admin", "Protect admin username")
///     .require_unique(|user| user.username.contains("chris"), "")
///     .build();
/// ```
pub struct RecordStoreBuilder<T> {
    predicates: AdmissionSet<T>,
    capacity: usize,
}

impl<T> Default for RecordStoreBuilder<T> {
    fn default() -> Self {
        Self {
            predicates: AdmissionSet::new(),
            capacity: 0,
        }
    }
}

impl<T: Record> RecordStoreBuilder<T> {
    /// Preallocates room for `capacity` rows.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Appends an admission predicate.
    pub fn require<P>(mut self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(AdmissionPredicate::new(predicate, description));
        self
    }

    /// Appends a uniqueness predicate.
    pub fn require_unique<P>(mut self, predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(AdmissionPredicate::unique(predicate, description));
        self
    }

    /// Builds the store. Always succeeds.
    pub fn build(self) -> RecordStore<T> {
        RecordStore::from_parts(self.predicates, self.capacity)
    }
}
