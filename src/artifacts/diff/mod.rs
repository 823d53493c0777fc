//! Line diffing and fragment construction
//!
//! - `myers`: Myers' shortest-edit-script diff over line sequences
//! - `script`: Unified tagged-line edit scripts with hunk markers
//! - `parser`: Dual-numbered structural parse of an edit script
//! - `fragment`: Context-bounded fragment grouping for review
//!
//! The full pipeline runs text → edit script → parsed lines → fragments;
//! [`build_fragments`] is the front door.

pub mod fragment;
pub mod myers;
pub mod parser;
pub mod script;

use fragment::Fragment;

/// Diff two decoded texts and group the result into reviewable fragments.
///
/// `context_window` bounds the unchanged lines kept around each change, on
/// both the hunk and the fragment level (3 matches conventional diffs).
pub fn build_fragments(left: &str, right: &str, context_window: usize) -> Vec<Fragment> {
    let script = script::unified_script(left, right, context_window);
    let parsed = parser::parse_script(&script);
    fragment::group_fragments(&parsed, context_window)
}
