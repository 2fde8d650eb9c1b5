//! TTL cache for spotmark.
//!
//! Generic in-memory key-value store whose entries expire a fixed duration
//! after they were written.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::TtlCache;
