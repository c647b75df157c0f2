//! Console front-end for recordlayer
//!
//! Loads users from a delimited file into a record store, then answers queries typed on
//! standard input with timing and results.

pub mod cli;
pub mod ingest;
pub mod session;
pub mod user;
