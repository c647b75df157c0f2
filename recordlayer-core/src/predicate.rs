//! Admission predicates that gate which rows a store accepts.
//!
//! Predicates are kept in an ordered [`AdmissionSet`]. A candidate row is admitted only if
//! every predicate holds for it; evaluation follows registration order and stops at the first
//! predicate that fails, so later predicates may never run for a rejected row.
//!
//! Every set starts with a built-in predicate rejecting absent rows.

use std::{fmt, sync::Arc};

/// A boxed row predicate.
pub type RowPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Description of the built-in predicate every [`AdmissionSet`] starts with.
pub const PRESENT_DESCRIPTION: &str = "Null object check";

enum Rule<T> {
    /// The row must not be absent.
    Present,
    /// The row must satisfy the predicate.
    Filter(RowPredicate<T>),
    /// At most one admitted row may satisfy the predicate.
    Unique(RowPredicate<T>),
}

/// A single admission predicate paired with a human readable description.
pub struct AdmissionPredicate<T> {
    rule: Rule<T>,
    description: String,
}

impl<T> AdmissionPredicate<T> {
    /// The built-in predicate rejecting absent rows.
    pub fn present() -> Self {
        Self {
            rule: Rule::Present,
            description: PRESENT_DESCRIPTION.to_string(),
        }
    }

    /// A predicate the candidate row must satisfy.
    pub fn new<P>(predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            rule: Rule::Filter(Box::new(predicate)),
            description: description.into(),
        }
    }

    /// A predicate that holds for at most one row over the lifetime of the store.
    ///
    /// A candidate that does not satisfy `predicate` is not a uniqueness candidate and always
    /// passes. A candidate that does passes only if no already admitted row satisfies
    /// `predicate`, so the first matching row is admitted and every later one is rejected.
    pub fn unique<P>(predicate: P, description: impl Into<String>) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            rule: Rule::Unique(Box::new(predicate)),
            description: description.into(),
        }
    }

    /// Returns the description given at registration (may be empty).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tests a candidate row against this predicate.
    ///
    /// `admitted` is the row collection as it stands before the candidate is added.
    pub fn admits(&self, candidate: Option<&T>, admitted: &[Arc<T>]) -> bool {
        match (&self.rule, candidate) {
            (Rule::Present, candidate) => candidate.is_some(),
            (Rule::Filter(predicate), Some(row)) => predicate(row),
            (Rule::Unique(predicate), Some(row)) => {
                !predicate(row) || admitted.iter().all(|existing| !predicate(existing.as_ref()))
            }
            (_, None) => false,
        }
    }
}

impl<T> fmt::Debug for AdmissionPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.rule {
            Rule::Present => "present",
            Rule::Filter(_) => "filter",
            Rule::Unique(_) => "unique",
        };

        f.debug_struct("AdmissionPredicate")
            .field("kind", &kind)
            .field("description", &self.description)
            .finish()
    }
}

/// Outcome of offering a row to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The row passed every predicate and was stored.
    Accepted,
    /// The row was discarded.
    Rejected {
        /// Registration position of the first failing predicate (the built-in one is 0).
        position: usize,
        /// Description of the first failing predicate.
        description: String,
    },
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// Ordered list of admission predicates.
///
/// Predicates are a list rather than a map, so registering the same predicate twice, or two
/// predicates with the same description, keeps both.
#[derive(Debug)]
pub struct AdmissionSet<T> {
    predicates: Vec<AdmissionPredicate<T>>,
}

impl<T> Default for AdmissionSet<T> {
    fn default() -> Self {
        Self {
            predicates: vec![AdmissionPredicate::present()],
        }
    }
}

impl<T> AdmissionSet<T> {
    /// Creates a set holding only the built-in absent-row predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a predicate; it is evaluated after every predicate already in the set.
    pub fn push(&mut self, predicate: AdmissionPredicate<T>) {
        self.predicates.push(predicate);
    }

    /// Number of predicates, counting the built-in one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Evaluates the candidate against every predicate in order, stopping at the first failure.
    pub fn evaluate(&self, candidate: Option<&T>, admitted: &[Arc<T>]) -> Admission {
        for (position, predicate) in self.predicates.iter().enumerate() {
            if !predicate.admits(candidate, admitted) {
                return Admission::Rejected {
                    position,
                    description: predicate.description().to_string(),
                };
            }
        }

        Admission::Accepted
    }
}
