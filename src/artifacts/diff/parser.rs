use regex::Regex;
use std::sync::LazyLock;

static HUNK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@")
        .expect("hunk marker pattern is valid")
});

/// Closed classification of one edit-script line, decided once at parse
/// time and matched exhaustively afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Context,
    Removed,
    Added,
    HunkMarker,
    Noise,
}

/// One structurally parsed line of an edit script.
///
/// Line numbers are 1-based and tracked independently per side: a removed
/// line occupies a left number only, an added line a right number only, a
/// context line both. Marker and noise lines carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub kind: LineKind,
    pub content: String,
    pub left_number: Option<usize>,
    pub right_number: Option<usize>,
    pub is_core_diff: bool,
}

/// The flat parse of a whole script plus the indices of its core-diff
/// lines, in script order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedScript {
    pub lines: Vec<ParsedLine>,
    pub core_indices: Vec<usize>,
}

/// Running dual line counters, reset by every hunk marker to its declared
/// starts. `None` until the first marker: data lines seen before one carry
/// no numbers and are never core diff, so a malformed script degrades to a
/// no-op diff instead of a crash.
#[derive(Debug, Clone, Copy)]
struct LineCounters {
    left: usize,
    right: usize,
}

pub fn parse_script<S: AsRef<str>>(script: &[S]) -> ParsedScript {
    let mut body = script.iter().map(AsRef::as_ref);
    let mut first = body
        .by_ref()
        .find(|line| !line.starts_with("---") && !line.starts_with("+++"));

    let mut parsed = ParsedScript::default();
    let mut counters: Option<LineCounters> = None;

    while let Some(raw) = first {
        let line = parse_line(raw, &mut counters);
        if line.is_core_diff {
            parsed.core_indices.push(parsed.lines.len());
        }
        parsed.lines.push(line);

        first = body.next();
    }

    parsed
}

fn parse_line(raw: &str, counters: &mut Option<LineCounters>) -> ParsedLine {
    if let Some(captures) = HUNK_MARKER.captures(raw) {
        // a declared start too large to address falls through as noise
        // instead of anchoring the counters on a made-up line
        if let (Ok(left), Ok(right)) = (captures[1].parse(), captures[3].parse()) {
            *counters = Some(LineCounters { left, right });

            return ParsedLine {
                kind: LineKind::HunkMarker,
                content: raw.to_string(),
                left_number: None,
                right_number: None,
                is_core_diff: false,
            };
        }
    }

    match (raw.chars().next(), counters.as_mut()) {
        (Some('-'), state) => {
            let left_number = state.map(|c| {
                let number = c.left;
                c.left += 1;
                number
            });
            ParsedLine {
                kind: LineKind::Removed,
                content: raw[1..].to_string(),
                left_number,
                right_number: None,
                is_core_diff: left_number.is_some(),
            }
        }
        (Some('+'), state) => {
            let right_number = state.map(|c| {
                let number = c.right;
                c.right += 1;
                number
            });
            ParsedLine {
                kind: LineKind::Added,
                content: raw[1..].to_string(),
                left_number: None,
                right_number,
                is_core_diff: right_number.is_some(),
            }
        }
        (Some(' '), state) => {
            let numbers = state.map(|c| {
                let numbers = (c.left, c.right);
                c.left += 1;
                c.right += 1;
                numbers
            });
            ParsedLine {
                kind: LineKind::Context,
                content: raw[1..].to_string(),
                left_number: numbers.map(|n| n.0),
                right_number: numbers.map(|n| n.1),
                is_core_diff: false,
            }
        }
        // '?' annotations, empty lines and anything unrecognized consume
        // neither counter
        _ => ParsedLine {
            kind: LineKind::Noise,
            content: raw.to_string(),
            left_number: None,
            right_number: None,
            is_core_diff: false,
        },
    }
}
