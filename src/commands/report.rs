use crate::areas::workspace::Workspace;
use crate::artifacts::classify::change::{ChangeKind, ClassificationReport};
use crate::artifacts::content::decoder::decode_bytes;
use crate::artifacts::diff::build_fragments;
use crate::artifacts::diff::fragment::Fragment;
use crate::artifacts::core::error::IoWarning;
use crate::artifacts::diff::parser::LineKind;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// Write the one-line-per-file change summary: a status letter followed
/// by the relative path. Unchanged files are omitted.
pub fn print_summary(
    writer: &mut impl Write,
    report: &ClassificationReport,
) -> anyhow::Result<()> {
    for change in &report.changes {
        if change.kind == ChangeKind::Unchanged {
            continue;
        }
        writeln!(writer, "{} {}", change.kind, change.path)?;
    }

    Ok(())
}

/// Render the context-bounded diff fragments for every modified file.
///
/// Both versions are re-read and decoded here rather than cached during
/// classification, so a run over a large tree holds at most one file pair
/// in memory at a time. A file that fails to read (it may have changed
/// under us since classification) gets a warning line and the remaining
/// files still render.
pub fn print_fragments(
    writer: &mut impl Write,
    report: &ClassificationReport,
    original_root: &Path,
    modified_root: &Path,
    context_window: usize,
) -> anyhow::Result<()> {
    let original = Workspace::open(original_root)?;
    let modified = Workspace::open(modified_root)?;

    for path in report.modified() {
        let (left, right) = match (decoded(&original, path), decoded(&modified, path)) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(warning), _) | (_, Err(warning)) => {
                writeln!(writer, "{} {warning}", "warning:".yellow())?;
                continue;
            }
        };
        let fragments = build_fragments(&left, &right, context_window);

        writeln!(writer, "{}", format!("diff a/{path} b/{path}").bold())?;
        for fragment in &fragments {
            print_fragment(writer, fragment)?;
        }
    }

    Ok(())
}

fn decoded(workspace: &Workspace, path: &str) -> Result<String, IoWarning> {
    Ok(decode_bytes(&workspace.read_bytes(path)?))
}

fn print_fragment(writer: &mut impl Write, fragment: &Fragment) -> anyhow::Result<()> {
    writeln!(writer, "{}", fragment_header(fragment).cyan())?;

    for line in &fragment.lines {
        match line.kind {
            LineKind::Removed => writeln!(writer, "{}", format!("-{}", line.content).red())?,
            LineKind::Added => writeln!(writer, "{}", format!("+{}", line.content).green())?,
            LineKind::Context => writeln!(writer, " {}", line.content)?,
            // markers are re-derived from the fragment ranges and noise
            // carries no reviewable content
            LineKind::HunkMarker | LineKind::Noise => {}
        }
    }

    Ok(())
}

fn fragment_header(fragment: &Fragment) -> String {
    format!(
        "@@ -{} +{} @@",
        side_range(fragment.left_range),
        side_range(fragment.right_range)
    )
}

fn side_range(range: Option<(usize, usize)>) -> String {
    match range {
        Some((start, end)) => format!("{start},{}", end - start + 1),
        None => "0,0".to_string(),
    }
}
