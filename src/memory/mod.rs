//! Long-term coaching memory.
//!
//! Entries are written by the coaching feature and wiped in bulk on request.

pub mod clear;
pub mod store;
pub mod types;
