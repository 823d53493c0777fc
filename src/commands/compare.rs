use crate::artifacts::classify::change::ClassificationReport;
use crate::artifacts::classify::classifier::{Classifier, ProgressEvent};
use crate::artifacts::classify::exclusion::ExclusionSet;
use crate::artifacts::core::cancel::CancelToken;
use crate::artifacts::core::error::CompareError;
use derive_new::new;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Everything a single comparison run needs to know.
#[derive(Debug, Clone, new)]
pub struct CompareOptions {
    pub original: PathBuf,
    pub modified: PathBuf,
    pub exclusions: ExclusionSet,
    pub strict: bool,
}

/// Launches comparisons on a background task and keeps them serialized:
/// a second `start` while one run is in flight is refused rather than
/// queued, so two traversals never interleave their output.
#[derive(Debug, Default, Clone)]
pub struct CompareService {
    running: Arc<AtomicBool>,
}

/// Handle to an in-flight comparison.
///
/// Progress events stream out of `events` while the run proceeds;
/// [`CompareRun::finish`] resolves with the final report.
pub struct CompareRun {
    pub events: mpsc::UnboundedReceiver<ProgressEvent>,
    task: JoinHandle<Result<ClassificationReport, CompareError>>,
}

impl CompareRun {
    pub async fn finish(self) -> Result<ClassificationReport, CompareError> {
        self.task
            .await
            .map_err(|e| CompareError::Background(e.to_string()))?
    }
}

impl CompareService {
    pub fn start(
        &self,
        options: CompareOptions,
        cancel: CancelToken,
    ) -> Result<CompareRun, CompareError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(CompareError::AlreadyRunning);
        }

        let (sender, events) = mpsc::unbounded_channel();
        let running = Arc::clone(&self.running);

        // the traversal is blocking filesystem work; keep it off the
        // async runtime threads
        let task = tokio::spawn(async move {
            let joined = tokio::task::spawn_blocking(move || {
                let classifier = Classifier::new(&options.exclusions, options.strict);
                classifier.classify(&options.original, &options.modified, &cancel, |event| {
                    // the receiver may be gone when the caller only wants
                    // the final report
                    let _ = sender.send(event);
                })
            })
            .await;

            running.store(false, Ordering::SeqCst);
            joined.map_err(|e| CompareError::Background(e.to_string()))?
        });

        Ok(CompareRun { events, task })
    }
}

#[cfg(test)]
mod tests {
    use super::{CompareOptions, CompareService};
    use crate::artifacts::classify::change::ChangeKind;
    use crate::artifacts::classify::classifier::ProgressEvent;
    use crate::artifacts::classify::exclusion::ExclusionSet;
    use crate::artifacts::core::cancel::CancelToken;
    use crate::artifacts::core::error::CompareError;
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::Ordering;

    fn options(dir_a: &TempDir, dir_b: &TempDir) -> CompareOptions {
        CompareOptions::new(
            dir_a.path().to_path_buf(),
            dir_b.path().to_path_buf(),
            ExclusionSet::default(),
            false,
        )
    }

    #[tokio::test]
    async fn run_streams_events_and_resolves_with_the_report() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        dir_a.child("a.txt").write_str("hello\n").unwrap();
        dir_b.child("a.txt").write_str("hello world\n").unwrap();

        let service = CompareService::default();
        let mut run = service
            .start(options(&dir_a, &dir_b), CancelToken::new())
            .unwrap();

        let mut seen = Vec::new();
        while let Some(event) = run.events.recv().await {
            if let ProgressEvent::FileClassified { path, kind } = event {
                seen.push((path, kind));
            }
        }

        let report = run.finish().await.unwrap();
        assert_eq!(seen, vec![("a.txt".to_string(), ChangeKind::Modified)]);
        assert!(report.complete);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn second_start_while_running_is_refused() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();

        let service = CompareService::default();
        service.running.store(true, Ordering::SeqCst);

        let result = service.start(options(&dir_a, &dir_b), CancelToken::new());
        assert!(matches!(result, Err(CompareError::AlreadyRunning)));
    }

    #[tokio::test]
    async fn service_accepts_a_new_run_after_the_previous_one_finished() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        dir_a.child("a.txt").write_str("same\n").unwrap();
        dir_b.child("a.txt").write_str("same\n").unwrap();

        let service = CompareService::default();
        let first = service
            .start(options(&dir_a, &dir_b), CancelToken::new())
            .unwrap();
        assert!(first.finish().await.unwrap().is_clean());

        let second = service
            .start(options(&dir_a, &dir_b), CancelToken::new())
            .unwrap();
        assert!(second.finish().await.unwrap().is_clean());
    }
}
