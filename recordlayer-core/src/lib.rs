//! Core types for an in-memory record store with admission rules and attribute indexes.
//!
//! This crate is the core of the recordlayer project and provides:
//!
//! - **Record trait** ([`record`]) - How a schema type declares and reads its indexed attributes
//! - **Index values** ([`value`]) - The hashable key type used for index lookups and query
//!   parameters
//! - **Admission predicates** ([`predicate`]) - Ordered row-admission rules, including uniqueness
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! The store itself lives in `recordlayer-memory`; most users should depend on the
//! `recordlayer` crate, which re-exports everything and provides `#[derive(Record)]`.

#[allow(unused_extern_crates)]
extern crate self as recordlayer_core;

pub mod error;
pub mod predicate;
pub mod record;
pub mod value;
