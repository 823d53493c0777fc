//! Filesystem-facing areas
//!
//! - `workspace`: one comparison root and the reads performed against it

pub mod workspace;
