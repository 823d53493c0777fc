use crate::artifacts::core::error::IoWarning;
use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::Path;

/// Digest input block size. Hashing streams fixed-size blocks so large
/// files are never loaded into memory at once.
const HASH_BLOCK_SIZE: usize = 64 * 1024;

/// Decide whether two files are content-identical for comparison purposes.
///
/// Unless strict mode is requested, a size mismatch settles the question
/// without any further I/O. Otherwise both contents are hashed by streaming
/// blocks through SHA-1 and the digests compared. Strict mode exists
/// because files re-encoded on disk can differ in size while still hashing
/// (and therefore comparing) the way the caller expects.
///
/// I/O failures surface as an [`IoWarning`]; callers treat that as "not
/// equal" so a broken file shows up as a difference instead of vanishing.
pub fn contents_equal(path_a: &Path, path_b: &Path, strict: bool) -> Result<bool, IoWarning> {
    if !strict && file_size(path_a)? != file_size(path_b)? {
        return Ok(false);
    }

    Ok(stream_digest(path_a)? == stream_digest(path_b)?)
}

fn file_size(path: &Path) -> Result<u64, IoWarning> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| IoWarning::new(path.to_path_buf(), e.to_string()))?;

    Ok(metadata.len())
}

fn stream_digest(path: &Path) -> Result<[u8; 20], IoWarning> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| IoWarning::new(path.to_path_buf(), e.to_string()))?;

    let mut hasher = Sha1::new();
    let mut block = vec![0u8; HASH_BLOCK_SIZE];
    loop {
        let read = file
            .read(&mut block)
            .map_err(|e| IoWarning::new(path.to_path_buf(), e.to_string()))?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::contents_equal;
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use rstest::rstest;

    #[rstest]
    fn a_file_equals_itself_under_strict_hashing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let file = dir.child("self.txt");
        file.write_str("reflexive content\n")?;

        assert!(contents_equal(file.path(), file.path(), true)?);

        Ok(())
    }

    #[rstest]
    fn equal_content_in_distinct_files_compares_equal()
    -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let left = dir.child("left.txt");
        let right = dir.child("right.txt");
        left.write_str("same bytes")?;
        right.write_str("same bytes")?;

        assert!(contents_equal(left.path(), right.path(), false)?);
        assert!(contents_equal(left.path(), right.path(), true)?);

        Ok(())
    }

    #[rstest]
    fn same_size_different_content_compares_unequal()
    -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let left = dir.child("left.txt");
        let right = dir.child("right.txt");
        left.write_str("aaaa")?;
        right.write_str("aaab")?;

        assert!(!contents_equal(left.path(), right.path(), false)?);

        Ok(())
    }

    #[rstest]
    fn missing_file_surfaces_a_warning() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let present = dir.child("present.txt");
        present.write_str("here")?;
        let absent = dir.path().join("absent.txt");

        let result = contents_equal(present.path(), &absent, true);
        assert!(result.is_err());

        Ok(())
    }

    // With different sizes and strict mode off the answer comes from the
    // size pre-check alone: a directory can be stat'ed but not hashed, so
    // an Ok(false) proves no hash was computed.
    #[cfg(unix)]
    #[rstest]
    fn size_mismatch_short_circuits_before_hashing()
    -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let readable = dir.child("readable.txt");
        readable.write_str("short")?;
        let unhashable = dir.path();

        assert_eq!(contents_equal(readable.path(), unhashable, false), Ok(false));
        assert!(contents_equal(readable.path(), unhashable, true).is_err());

        Ok(())
    }
}
