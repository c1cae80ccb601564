// tests/integration_test.rs
use std::fs;
use std::process::Command;

use tempfile::TempDir;

const BUMP_VERSION: &str = env!("CARGO_BIN_EXE_bump-version");
const RELEASE_NOTES: &str = env!("CARGO_BIN_EXE_release-notes");

#[test]
fn test_bump_version_help() {
    let output = Command::new(BUMP_VERSION)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("bump-version"));
    assert!(stdout.contains("--export-only"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_bump_version_version_flag() {
    let output = Command::new(BUMP_VERSION)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("bump-version "));
}

#[test]
fn test_patch_bump_writes_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("CMakeLists.txt"),
        "project(Chorus VERSION 0.0.1)\n",
    )
    .unwrap();

    let output = Command::new(BUMP_VERSION)
        .args(["patch", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Version bump: 0.0.1 → 0.0.2"));
    assert!(stdout.contains("AU version int: 2 (0x000002)"));
    assert!(stdout.contains("Updated CMakeLists.txt"));

    let env = fs::read_to_string(dir.path().join(".env")).unwrap();
    assert!(env.contains("VERSION_PATCH=2"));
    assert!(env.contains("VERSION_BUILD=1"));
    let cmake = fs::read_to_string(dir.path().join("CMakeLists.txt")).unwrap();
    assert_eq!(cmake, "project(Chorus VERSION 0.0.2)\n");
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(BUMP_VERSION)
        .args(["minor", "--dry-run", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Version bump: 0.0.1 → 0.1.0"));
    assert!(stdout.contains("[DRY RUN] No files were modified"));
    assert!(!dir.path().join(".env").exists());
}

#[test]
fn test_export_only_prints_shell_exports() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "VERSION_MAJOR=1\nVERSION_MINOR=2\nVERSION_PATCH=3\nVERSION_BUILD=40\n",
    )
    .unwrap();

    let output = Command::new(BUMP_VERSION)
        .args(["--export-only", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("export PROJECT_VERSION=1.2.3\n"));
    assert!(stdout.contains("export PROJECT_VERSION_FULL=1.2.3.40\n"));
    assert!(stdout.contains("export AU_VERSION_INT=66051\n"));
}

#[test]
fn test_range_exceeded_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join(".env");
    let original = "VERSION_MAJOR=1\nVERSION_MINOR=255\nVERSION_PATCH=0\nVERSION_BUILD=9\n";
    fs::write(&env_path, original).unwrap();

    let output = Command::new(BUMP_VERSION)
        .args(["minor", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Minor version 256 exceeds AU limit of 255"));
    assert_eq!(fs::read_to_string(&env_path).unwrap(), original);
}

#[test]
fn test_release_notes_outside_repository() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(RELEASE_NOTES)
        .args(["--version", "2.0.0", "--root"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.trim_end(),
        "## Version 2.0.0\n\n### 📝 Changes\n- Initial release"
    );
}
