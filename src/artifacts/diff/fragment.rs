use crate::artifacts::diff::parser::{LineKind, ParsedLine, ParsedScript};

/// Unchanged lines kept on each side of a core block, in script lines.
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Contains at least one core-diff line.
    Changed,
    /// Emitted once, spanning the whole script, when nothing differs.
    Context,
}

/// A self-contained, context-padded excerpt of a diff: the unit handed to
/// a renderer.
///
/// `removed_content` and `added_content` hold the decoded content of the
/// core block only; surrounding context lines never appear in them. The
/// ranges are the minimum and maximum line numbers observed in the padded
/// span, per side; a side with no numbered lines in the span has no range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub lines: Vec<ParsedLine>,
    pub left_range: Option<(usize, usize)>,
    pub right_range: Option<(usize, usize)>,
    pub removed_content: Vec<String>,
    pub added_content: Vec<String>,
}

/// Group a parsed script into fragments: merge strictly consecutive
/// core-diff indices into blocks, pad each block by the context window and
/// emit one fragment per block.
///
/// Blocks whose padded spans overlap still yield separate fragments; only
/// raw core adjacency merges, so a reviewer may see a context line twice
/// but never two changes collapsed into an unreadable blob. A script with
/// no core-diff lines yields exactly one `Context` fragment covering all
/// input, so callers always receive at least one fragment per file.
pub fn group_fragments(script: &ParsedScript, window: usize) -> Vec<Fragment> {
    let blocks = merge_contiguous(&script.core_indices);

    if blocks.is_empty() {
        return vec![context_fragment(script)];
    }

    blocks
        .into_iter()
        .map(|block| changed_fragment(script, block, window))
        .collect()
}

/// Merge an ascending index list into maximal runs of strictly
/// consecutive integers, as inclusive (first, last) pairs.
fn merge_contiguous(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();

    for &idx in indices {
        match runs.last_mut() {
            Some(run) if idx == run.1 + 1 => run.1 = idx,
            _ => runs.push((idx, idx)),
        }
    }

    runs
}

fn changed_fragment(script: &ParsedScript, (first, last): (usize, usize), window: usize) -> Fragment {
    let start = first.saturating_sub(window);
    let end = last.saturating_add(window).min(script.lines.len() - 1);
    let lines = script.lines[start..=end].to_vec();
    let (left_range, right_range) = number_ranges(&lines);

    let mut removed_content = Vec::new();
    let mut added_content = Vec::new();
    for line in &script.lines[first..=last] {
        match line.kind {
            LineKind::Removed => removed_content.push(line.content.clone()),
            LineKind::Added => added_content.push(line.content.clone()),
            _ => {}
        }
    }

    Fragment {
        kind: FragmentKind::Changed,
        lines,
        left_range,
        right_range,
        removed_content,
        added_content,
    }
}

fn context_fragment(script: &ParsedScript) -> Fragment {
    let (left_range, right_range) = number_ranges(&script.lines);

    Fragment {
        kind: FragmentKind::Context,
        lines: script.lines.clone(),
        left_range,
        right_range,
        removed_content: Vec::new(),
        added_content: Vec::new(),
    }
}

type NumberRanges = (Option<(usize, usize)>, Option<(usize, usize)>);

fn number_ranges(lines: &[ParsedLine]) -> NumberRanges {
    let mut left: Option<(usize, usize)> = None;
    let mut right: Option<(usize, usize)> = None;

    for line in lines {
        if let Some(number) = line.left_number {
            left = Some(extend(left, number));
        }
        if let Some(number) = line.right_number {
            right = Some(extend(right, number));
        }
    }

    (left, right)
}

fn extend(range: Option<(usize, usize)>, number: usize) -> (usize, usize) {
    match range {
        Some((min, max)) => (min.min(number), max.max(number)),
        None => (number, number),
    }
}

#[cfg(test)]
mod tests {
    use super::{FragmentKind, group_fragments, merge_contiguous};
    use crate::artifacts::diff::parser::parse_script;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn consecutive_indices_merge_into_runs() {
        assert_eq!(
            merge_contiguous(&[4, 5, 6, 9, 10]),
            vec![(4, 6), (9, 10)]
        );
        assert_eq!(merge_contiguous(&[]), Vec::<(usize, usize)>::new());
        assert_eq!(merge_contiguous(&[7]), vec![(7, 7)]);
    }

    #[rstest]
    fn separate_core_blocks_yield_separate_fragments_even_when_padding_overlaps() {
        let script = parse_script(&[
            "@@ -1,6 +1,6 @@",
            " c1",
            "-a",
            "+b",
            " c2",
            " c3",
            " c4",
            "-x",
            "+y",
        ]);
        assert_eq!(script.core_indices, vec![2, 3, 7, 8]);

        let fragments = group_fragments(&script, 3);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].removed_content, vec!["a"]);
        assert_eq!(fragments[0].added_content, vec!["b"]);
        assert_eq!(fragments[1].removed_content, vec!["x"]);
        assert_eq!(fragments[1].added_content, vec!["y"]);
        assert!(fragments.iter().all(|f| f.kind == FragmentKind::Changed));
    }

    #[rstest]
    fn context_lines_never_leak_into_core_content() {
        let script = parse_script(&["@@ -1,3 +1,3 @@", " before", "-old", "+new", " after"]);

        let fragments = group_fragments(&script, 3);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].removed_content, vec!["old"]);
        assert_eq!(fragments[0].added_content, vec!["new"]);
        // the padded span still carries the context lines themselves
        assert_eq!(fragments[0].lines.len(), 5);
    }

    #[rstest]
    fn no_differences_yield_exactly_one_context_fragment() {
        let script = parse_script(&[" unchanged", " lines"]);

        let fragments = group_fragments(&script, 3);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].kind, FragmentKind::Context);
        assert_eq!(fragments[0].lines.len(), 2);
        assert!(fragments[0].removed_content.is_empty());
        assert!(fragments[0].added_content.is_empty());
    }

    #[rstest]
    fn spans_are_clamped_to_script_bounds() {
        let script = parse_script(&["@@ -1,1 +1,1 @@", "-only", "+line"]);

        let fragments = group_fragments(&script, usize::MAX);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].lines.len(), 3);
        assert_eq!(fragments[0].left_range, Some((1, 1)));
        assert_eq!(fragments[0].right_range, Some((1, 1)));
    }
}
