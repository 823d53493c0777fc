use crate::artifacts::diff::myers::{Edit, MyersDiff};

/// Labels used for the file-identity header lines of a script. The parser
/// skips them; they exist so scripts read like conventional diffs.
const LEFT_LABEL: &str = "original";
const RIGHT_LABEL: &str = "modified";

/// Produce a unified tagged-line edit script for two texts.
///
/// The output is the flat line form a conventional LCS differ emits: two
/// header lines, then per hunk a `@@ -start,count +start,count @@` marker
/// followed by ` `/`-`/`+` prefixed lines. Identical inputs produce an
/// empty script.
pub fn unified_script(left: &str, right: &str, context: usize) -> Vec<String> {
    let a = left.lines().collect::<Vec<_>>();
    let b = right.lines().collect::<Vec<_>>();
    let edits = MyersDiff::new(&a, &b).edit_script();

    script_from_edits(&edits, context)
}

pub fn script_from_edits(edits: &[Edit], context: usize) -> Vec<String> {
    let changed = edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| edit.is_change())
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    if changed.is_empty() {
        return Vec::new();
    }

    // prefix sums of consumed lines, for hunk starts and counts
    let mut left_consumed = vec![0usize; edits.len() + 1];
    let mut right_consumed = vec![0usize; edits.len() + 1];
    for (idx, edit) in edits.iter().enumerate() {
        left_consumed[idx + 1] = left_consumed[idx] + edit.consumes_left() as usize;
        right_consumed[idx + 1] = right_consumed[idx] + edit.consumes_right() as usize;
    }

    let mut script = vec![
        format!("--- {LEFT_LABEL}"),
        format!("+++ {RIGHT_LABEL}"),
    ];

    for (start, end) in hunk_ranges(&changed, context, edits.len()) {
        let left_count = left_consumed[end + 1] - left_consumed[start];
        let right_count = right_consumed[end + 1] - right_consumed[start];
        // a zero-count side anchors on the line before the hunk
        let left_start = left_consumed[start] + usize::from(left_count > 0);
        let right_start = right_consumed[start] + usize::from(right_count > 0);

        script.push(format!(
            "@@ -{left_start},{left_count} +{right_start},{right_count} @@"
        ));

        for edit in &edits[start..=end] {
            let tag = match edit {
                Edit::Delete { .. } => '-',
                Edit::Insert { .. } => '+',
                Edit::Equal { .. } => ' ',
            };
            script.push(format!("{}{}", tag, edit.line()));
        }
    }

    script
}

/// Expand each changed edit index by the context window and merge ranges
/// that overlap or touch into hunks.
fn hunk_ranges(changed: &[usize], context: usize, len: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    for &idx in changed {
        let start = idx.saturating_sub(context);
        let end = idx.saturating_add(context).min(len - 1);
        match ranges.last_mut() {
            Some(last) if start <= last.1 + 1 => last.1 = end,
            _ => ranges.push((start, end)),
        }
    }

    ranges
}
