use crate::areas::workspace::{FileRecord, Workspace};
use crate::artifacts::classify::change::{ChangeKind, ClassificationReport, FileChange};
use crate::artifacts::classify::exclusion::ExclusionSet;
use crate::artifacts::content::decoder::{TEXT_PROBE_LIMIT, is_text_eligible};
use crate::artifacts::content::equality::contents_equal;
use crate::artifacts::core::cancel::CancelToken;
use crate::artifacts::core::error::{CompareError, IoWarning};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Progress reporting that crosses the comparison task boundary.
///
/// Events are handed to an injected observer, never to shared globals; the
/// CLI forwards them through a channel to its logging loop.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    FileClassified { path: String, kind: ChangeKind },
    Warning(IoWarning),
    Finished { complete: bool },
}

/// Walks both roots and produces the four-way classification.
///
/// Pass one records every non-excluded, text-eligible file under the
/// original root. Pass two walks the modified root and decides
/// unchanged/modified/added per file via the equality oracle. A final pass
/// reports files recorded in pass one that pass two never visited and that
/// are absent on disk in the modified root as deleted.
#[derive(Debug, new)]
pub struct Classifier<'c> {
    exclusions: &'c ExclusionSet,
    strict: bool,
}

impl Classifier<'_> {
    pub fn classify(
        &self,
        root_a: &Path,
        root_b: &Path,
        cancel: &CancelToken,
        mut observe: impl FnMut(ProgressEvent),
    ) -> Result<ClassificationReport, CompareError> {
        let workspace_a = Workspace::open(root_a)?;
        let workspace_b = Workspace::open(root_b)?;

        let mut warnings = Vec::new();
        let mut buckets = BTreeMap::<String, ChangeKind>::new();
        let mut visited = BTreeSet::<String>::new();
        let mut complete = true;

        let mut recorded = BTreeMap::<String, FileRecord>::new();
        for record in workspace_a.list_files(self.exclusions, &mut warnings) {
            if cancel.is_cancelled() {
                complete = false;
                break;
            }

            match self.probe_text_eligibility(&workspace_a, &record) {
                Ok(true) => {
                    recorded.insert(record.relative.clone(), record);
                }
                Ok(false) => {} // binary content, skipped entirely
                Err(warning) => warnings.push(warning),
            }
        }

        if complete {
            for record in workspace_b.list_files(self.exclusions, &mut warnings) {
                if cancel.is_cancelled() {
                    complete = false;
                    break;
                }

                match self.probe_text_eligibility(&workspace_b, &record) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(warning) => {
                        warnings.push(warning);
                        continue;
                    }
                }

                let kind = match recorded.get(&record.relative) {
                    Some(original) => {
                        visited.insert(record.relative.clone());
                        match contents_equal(&original.absolute, &record.absolute, self.strict) {
                            Ok(true) => ChangeKind::Unchanged,
                            Ok(false) => ChangeKind::Modified,
                            // fail toward reporting a difference rather than
                            // silently skipping one
                            Err(warning) => {
                                warnings.push(warning);
                                ChangeKind::Modified
                            }
                        }
                    }
                    None => ChangeKind::Added,
                };

                observe(ProgressEvent::FileClassified {
                    path: record.relative.clone(),
                    kind,
                });
                buckets.insert(record.relative, kind);
            }
        }

        if complete {
            for relative in recorded.keys() {
                if visited.contains(relative) {
                    continue;
                }
                if workspace_b.resolve(relative).exists() {
                    // present in B but not comparable there (e.g. became
                    // binary); neither deleted nor modified
                    continue;
                }

                observe(ProgressEvent::FileClassified {
                    path: relative.clone(),
                    kind: ChangeKind::Deleted,
                });
                buckets.insert(relative.clone(), ChangeKind::Deleted);
            }
        }

        for warning in &warnings {
            observe(ProgressEvent::Warning(warning.clone()));
        }
        observe(ProgressEvent::Finished { complete });

        let changes = buckets
            .into_iter()
            .map(|(path, kind)| FileChange::new(path, kind))
            .collect();

        Ok(ClassificationReport {
            changes,
            warnings,
            complete,
        })
    }

    fn probe_text_eligibility(
        &self,
        workspace: &Workspace,
        record: &FileRecord,
    ) -> Result<bool, IoWarning> {
        let prefix = workspace.read_prefix(&record.relative, TEXT_PROBE_LIMIT)?;
        Ok(is_text_eligible(&prefix))
    }
}
