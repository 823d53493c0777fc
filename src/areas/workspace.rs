use crate::artifacts::classify::exclusion::ExclusionSet;
use crate::artifacts::core::error::{CompareError, IoWarning};
use derive_new::new;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file found under a comparison root.
///
/// The relative path is slash-normalized so records from both roots can be
/// matched against each other regardless of platform separators; it is
/// unique within its tree.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileRecord {
    pub relative: String,
    pub absolute: PathBuf,
}

/// One comparison root and the file operations performed against it.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    /// Open a comparison root, verifying up front that it exists, is a
    /// directory and is readable. A root failing any of these checks is
    /// fatal to the whole run.
    pub fn open(path: &Path) -> Result<Self, CompareError> {
        if !path.is_dir() {
            return Err(CompareError::invalid_root(path, "not a directory"));
        }

        // surfaces permission problems before any traversal starts
        std::fs::read_dir(path).map_err(|e| CompareError::invalid_root(path, e))?;

        Ok(Workspace {
            path: path.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walk the root and collect every non-excluded regular file, sorted by
    /// relative path so classification output is deterministic across runs.
    ///
    /// Entries the walker cannot stat are recorded as warnings and skipped.
    pub fn list_files(
        &self,
        exclusions: &ExclusionSet,
        warnings: &mut Vec<IoWarning>,
    ) -> Vec<FileRecord> {
        let mut records = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    let path = e.path().unwrap_or(&self.path).to_path_buf();
                    warnings.push(IoWarning::new(path, e.to_string()));
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.to_record(entry.path()))
            .filter(|record| !exclusions.is_excluded(&record.relative))
            .collect::<Vec<_>>();

        records.sort_by(|a, b| a.relative.cmp(&b.relative));
        records
    }

    fn to_record(&self, path: &Path) -> Option<FileRecord> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Some(FileRecord::new(relative, path.to_path_buf()))
    }

    /// Absolute path of a slash-normalized relative path inside this root.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.path.to_path_buf(), |p, segment| p.join(segment))
    }

    pub fn read_bytes(&self, relative: &str) -> Result<Vec<u8>, IoWarning> {
        let path = self.resolve(relative);
        std::fs::read(&path).map_err(|e| IoWarning::new(path, e.to_string()))
    }

    /// Read at most `limit` bytes from the start of a file, enough for
    /// text-eligibility probing without pulling large files into memory.
    pub fn read_prefix(&self, relative: &str, limit: usize) -> Result<Vec<u8>, IoWarning> {
        let path = self.resolve(relative);
        let file = std::fs::File::open(&path)
            .map_err(|e| IoWarning::new(path.clone(), e.to_string()))?;

        let mut prefix = Vec::with_capacity(limit.min(4096));
        file.take(limit as u64)
            .read_to_end(&mut prefix)
            .map_err(|e| IoWarning::new(path, e.to_string()))?;

        Ok(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use crate::artifacts::classify::exclusion::ExclusionSet;
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn lists_files_in_relative_path_order() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        dir.child("b.txt").write_str("two")?;
        dir.child("a/nested.txt").write_str("one")?;
        dir.child("a.txt").write_str("zero")?;

        let workspace = Workspace::open(dir.path())?;
        let mut warnings = Vec::new();
        let records = workspace.list_files(&ExclusionSet::default(), &mut warnings);

        let relative = records.iter().map(|r| r.relative.as_str()).collect::<Vec<_>>();
        assert_eq!(relative, vec!["a.txt", "a/nested.txt", "b.txt"]);
        assert!(warnings.is_empty());

        Ok(())
    }

    #[rstest]
    fn excluded_paths_are_not_listed() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        dir.child("build/out.txt").write_str("artifact")?;
        dir.child("build2/keep.txt").write_str("kept")?;
        dir.child("src/main.c").write_str("code")?;

        let workspace = Workspace::open(dir.path())?;
        let exclusions = ExclusionSet::from_iter(["build"]);
        let mut warnings = Vec::new();
        let records = workspace.list_files(&exclusions, &mut warnings);

        let relative = records.iter().map(|r| r.relative.as_str()).collect::<Vec<_>>();
        assert_eq!(relative, vec!["build2/keep.txt", "src/main.c"]);

        Ok(())
    }

    #[rstest]
    fn opening_a_missing_root_fails() {
        let result = Workspace::open(std::path::Path::new("/definitely/not/here"));
        assert!(result.is_err());
    }
}
