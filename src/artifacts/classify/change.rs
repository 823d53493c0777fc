use crate::artifacts::core::error::IoWarning;
use colored::Colorize;
use derive_new::new;

/// Four-way classification of one comparable file.
///
/// `Unchanged` entries are carried in the report (they are needed to tell a
/// deleted file from a merely unchanged one) but callers normally surface
/// only the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Unchanged,
    Modified,
    Added,
    Deleted,
}

impl From<&ChangeKind> for &str {
    fn from(kind: &ChangeKind) -> Self {
        match kind {
            ChangeKind::Unchanged => " ",
            ChangeKind::Modified => "M",
            ChangeKind::Added => "A",
            ChangeKind::Deleted => "D",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        let colored_label = match self {
            ChangeKind::Unchanged => label.normal(),
            ChangeKind::Modified => label.yellow(),
            ChangeKind::Added => label.green(),
            ChangeKind::Deleted => label.red(),
        };
        write!(f, "{}", colored_label)
    }
}

/// One classified file: its slash-normalized relative path and what
/// happened to it between the two roots.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// Outcome of a full comparison run.
///
/// Invariant: every eligible relative path appears in exactly one change
/// entry. `complete` is false when the run was cancelled before both
/// traversals and the deletion pass finished; the accumulated changes are
/// still returned.
#[derive(Debug, Default)]
pub struct ClassificationReport {
    pub changes: Vec<FileChange>,
    pub warnings: Vec<IoWarning>,
    pub complete: bool,
}

impl ClassificationReport {
    pub fn of_kind(&self, kind: ChangeKind) -> impl Iterator<Item = &str> {
        self.changes
            .iter()
            .filter(move |change| change.kind == kind)
            .map(|change| change.path.as_str())
    }

    pub fn modified(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ChangeKind::Modified)
    }

    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ChangeKind::Added)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &str> {
        self.of_kind(ChangeKind::Deleted)
    }

    /// True when nothing differs between the two roots.
    pub fn is_clean(&self) -> bool {
        self.changes
            .iter()
            .all(|change| change.kind == ChangeKind::Unchanged)
    }
}
