//! Tree comparison and four-way file classification
//!
//! - `change`: Classification variants and the run report
//! - `classifier`: Two-pass traversal producing the classification
//! - `exclusion`: Relative-path prefix exclusion rules

pub mod change;
pub mod classifier;
pub mod exclusion;
