//! direye: compare two directory trees and present every modification as
//! reviewable diff fragments.
//!
//! The engine classifies each comparable file as unchanged, modified, added
//! or deleted, decodes arbitrary byte content into comparable text, and
//! regroups line-level edit scripts into context-bounded fragments with
//! dual line numbering.

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use artifacts::classify::classifier::{Classifier, ProgressEvent};
pub use artifacts::classify::exclusion::ExclusionSet;
pub use artifacts::content::decoder::decode_bytes;
pub use artifacts::content::equality::contents_equal;
pub use artifacts::core::cancel::CancelToken;
pub use artifacts::diff::build_fragments;
