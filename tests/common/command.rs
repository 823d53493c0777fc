use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// A fresh (original, modified) root pair for one comparison scenario.
#[fixture]
pub fn tree_pair() -> (TempDir, TempDir) {
    let original = TempDir::new().expect("Failed to create original temp dir");
    let modified = TempDir::new().expect("Failed to create modified temp dir");
    (original, modified)
}

pub fn run_direye_command(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("direye").expect("Failed to find direye binary");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn compare_command(original: &Path, modified: &Path, extra_args: &[&str]) -> Command {
    let mut cmd = run_direye_command(&["compare"]);
    cmd.arg(original).arg(modified);
    for arg in extra_args {
        cmd.arg(arg);
    }
    cmd
}
