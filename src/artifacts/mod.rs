//! Comparison data structures and algorithms
//!
//! This module contains the core comparison types and algorithms:
//!
//! - `classify`: Tree traversal and four-way file classification
//! - `content`: Byte decoding and streaming content equality
//! - `core`: Shared utilities (errors, cancellation)
//! - `diff`: Line diffing, edit-script parsing and fragment grouping

pub mod classify;
pub mod content;
pub mod core;
pub mod diff;
