//! Reusable, parameter-deferred queries.
//!
//! A [`BoundQuery`] captures a function turning a row into a [`Matcher`] over the query
//! value, together with a handle to the store it searches. The value is supplied later, to
//! [`BoundQuery::find`], and is used both as the index probe and as the matcher's argument.

use std::{fmt, sync::Arc};

use recordlayer_core::{record::Record, value::IndexValue};

use crate::store::RecordStore;

/// A predicate over the query value, built for one row.
pub type Matcher<'a> = Box<dyn Fn(&IndexValue) -> bool + 'a>;

/// Builds a [`Matcher`] for a row.
pub type MatcherBuilder<T> = dyn Fn(&T) -> Matcher<'_> + Send + Sync;

/// Boxes a closure over the query value as a [`Matcher`].
///
/// # Example
///
/// ```ignore
/// let by_email = store.build_query(|user: &User| {
///     matcher(move |value| user.email.contains(&value.to_string()))
/// });
/// ```
pub fn matcher<'a, F>(f: F) -> Matcher<'a>
where
    F: Fn(&IndexValue) -> bool + 'a,
{
    Box::new(f)
}

/// A query built against a specific store, executed later with a single value.
pub struct BoundQuery<T> {
    store: RecordStore<T>,
    builder: Arc<MatcherBuilder<T>>,
}

impl<T> Clone for BoundQuery<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            builder: Arc::clone(&self.builder),
        }
    }
}

impl<T: Record> fmt::Debug for BoundQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundQuery")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<T: Record> BoundQuery<T> {
    pub(crate) fn new(store: RecordStore<T>, builder: Arc<MatcherBuilder<T>>) -> Self {
        Self { store, builder }
    }

    /// Runs the query for `value`.
    ///
    /// Equivalent to `store.find_rows(value, |row| builder(row)(&value))`: if `value` is an
    /// index key the indexed row is returned alone, otherwise every row whose matcher accepts
    /// `value` is returned in insertion order.
    pub async fn find(&self, value: impl Into<IndexValue>) -> Vec<Arc<T>> {
        let value = value.into();

        self.store
            .find_rows(value.clone(), |row| (self.builder)(row)(&value))
            .await
    }

    /// Returns the store this query searches.
    pub fn store(&self) -> &RecordStore<T> {
        &self.store
    }
}
