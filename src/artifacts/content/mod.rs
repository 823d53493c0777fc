//! File content handling
//!
//! - `decoder`: Total bytes-to-text decoding with encoding fallback
//! - `equality`: Streaming content equality between two files

pub mod decoder;
pub mod equality;
