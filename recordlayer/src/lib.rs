//! Main recordlayer crate providing an embeddable in-memory record store.
//!
//! This crate is the primary entry point for users of the recordlayer framework.
//! It re-exports the core types and the store from the sub-crates, together with the
//! `#[derive(Record)]` macro.
//!
//! # Features
//!
//! - **Declarative admission** - Ordered predicates decide which rows are stored
//! - **Uniqueness rules** - Allow at most one row matching a predicate over the store's lifetime
//! - **Attribute indexes** - Mark fields `#[record(index)]` for exact-match lookups
//! - **Bound queries** - Define a search once, run it later with a single value
//!
//! # Quick Start
//!
//! ```ignore
//! use recordlayer::prelude::*;
//!
//! #[derive(Debug, Clone, Record)]
//! #[record(name = "users")]
//! pub struct User {
//!     #[record(index)]
//!     username: String,
//!     #[record(index)]
//!     num: u32,
//!     #[record(index)]
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = RecordStore::<User>::new();
//!
//!     // Reject the reserved admin account
//!     store
//!         .register_predicate(|user| user.username != "admin", "Protect admin username")
//!         .await;
//!
//!     // Only one .au address, ever
//!     store
//!         .register_unique_predicate(|user| user.email.ends_with(".au"), "Single AU email")
//!         .await;
//!
//!     store
//!         .add_row(User { username: "chris1".into(), num: 1, email: "c@x.au".into() })
//!         .await;
//!
//!     // Indexed value: returns the indexed row without consulting the predicate
//!     let by_num = store.find_rows(1u32, |_| false).await;
//!     assert_eq!(by_num.len(), 1);
//!
//!     // Reusable query, value supplied later
//!     let by_email = store.build_query(|user: &User| {
//!         matcher(move |value| user.email.contains(&value.to_string()))
//!     });
//!
//!     println!("Found: {:?}", by_email.find(".au").await);
//! }
//! ```
//!
//! # Lookups
//!
//! [`RecordStore::find_rows`](store::RecordStore::find_rows) first probes the index with the
//! value. On a hit it returns the single row indexed under that value and never runs the
//! predicate; on a miss it scans every row with the predicate. Index entries are
//! last-write-wins: when two rows share an indexed value, only the later one is reachable
//! through the index.

#[allow(unused_extern_crates)]
extern crate self as recordlayer;

pub mod prelude;

pub use recordlayer_core::{error, predicate, record, value};
pub use recordlayer_memory::{index, query, store};

pub use recordlayer_macros::Record;
