//! In-memory record store for recordlayer.
//!
//! This crate provides the record store itself and the reusable queries built against it.
//!
//! # Features
//!
//! - **Admission predicates** - Ordered, short-circuiting row gates, including uniqueness rules
//! - **Attribute index** - One value → row map over every indexed attribute of the record type
//! - **Dual-path lookup** - Index hits return the indexed row, misses fall back to a full scan
//! - **Bound queries** - Parameterized searches executed later with a single value
//! - **Thread-safe access** - One async-aware RwLock guards rows, index and predicates together
//!
//! # Quick Start
//!
//! ```ignore
//! use recordlayer::prelude::*;
//!
//! #[derive(Debug, Record)]
//! pub struct User {
//!     #[record(index)]
//!     username: String,
//!     #[record(index)]
//!     num: u32,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = RecordStore::<User>::builder()
//!         .require(|user| user.username != "admin", "Protect admin username")
//!         .build();
//!
//!     store.add_row(User { username: "chris1".into(), num: 1 }).await;
//!
//!     let by_name = store.build_query(|user: &User| {
//!         matcher(move |value| value.as_str().is_some_and(|v| user.username.contains(v)))
//!     });
//!
//!     println!("{:?}", by_name.find("chris").await);
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as recordlayer_memory;

pub mod index;
pub mod query;
pub mod store;

pub use query::{BoundQuery, Matcher, MatcherBuilder, matcher};
pub use store::{RecordStore, RecordStoreBuilder};
