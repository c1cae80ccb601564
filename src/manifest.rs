use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;

use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use crate::version_store::write_atomic;

/// `project(<name> ... VERSION x.y.z` in a CMake manifest
const PROJECT_VERSION_PATTERN: &str = r"(project\([^)]*VERSION\s+)\d+\.\d+\.\d+";

/// What happened to the build manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestUpdate {
    /// No manifest at the given path
    Missing,
    /// Manifest exists but carries no version declaration
    NoDeclaration,
    Updated,
}

/// Rewrite the version triple of the first `project(... VERSION x.y.z` declaration
pub fn rewrite_manifest_version(content: &str, version: &Version) -> Option<String> {
    let re = Regex::new(PROJECT_VERSION_PATTERN).ok()?;
    if !re.is_match(content) {
        return None;
    }
    let replacement = format!("${{1}}{}", version);
    Some(re.replace(content, replacement.as_str()).into_owned())
}

/// Current manifest content, `None` when there is no manifest at `path`
pub fn read_manifest(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ReleaseError::Io(e)),
    }
}

/// Write `version` into manifest `content` previously read from `path`
pub fn apply_manifest_version(
    path: &Path,
    content: Option<&str>,
    version: &Version,
) -> Result<ManifestUpdate> {
    let Some(content) = content else {
        return Ok(ManifestUpdate::Missing);
    };

    match rewrite_manifest_version(content, version) {
        Some(updated) => {
            if updated != content {
                write_atomic(path, &updated)?;
            }
            tracing::debug!(path = %path.display(), %version, "manifest version updated");
            Ok(ManifestUpdate::Updated)
        }
        None => Ok(ManifestUpdate::NoDeclaration),
    }
}

/// Propagate `major.minor.patch` into the manifest at `path`, if there is one
pub fn propagate_to_manifest(path: &Path, version: &Version) -> Result<ManifestUpdate> {
    let content = read_manifest(path)?;
    apply_manifest_version(path, content.as_deref(), version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CMAKE: &str = "cmake_minimum_required(VERSION 3.22)\n\nproject(ReverbPlugin VERSION 0.0.1)\n\njuce_add_plugin(ReverbPlugin VERSION 0.0.1)\n";

    #[test]
    fn test_rewrites_first_project_declaration_only() {
        let out = rewrite_manifest_version(CMAKE, &Version::new(1, 4, 2, 9)).unwrap();
        assert!(out.contains("project(ReverbPlugin VERSION 1.4.2)"));
        assert!(out.contains("cmake_minimum_required(VERSION 3.22)"));
        assert!(out.contains("juce_add_plugin(ReverbPlugin VERSION 0.0.1)"));
    }

    #[test]
    fn test_multiline_project_declaration() {
        let content = "project(Delay\n    LANGUAGES CXX\n    VERSION 2.3.4)\n";
        let out = rewrite_manifest_version(content, &Version::new(2, 4, 0, 1)).unwrap();
        assert_eq!(out, "project(Delay\n    LANGUAGES CXX\n    VERSION 2.4.0)\n");
    }

    #[test]
    fn test_no_declaration() {
        assert_eq!(
            rewrite_manifest_version("add_subdirectory(JUCE)\n", &Version::default()),
            None
        );
    }

    #[test]
    fn test_missing_manifest_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CMakeLists.txt");
        let outcome = propagate_to_manifest(&path, &Version::default()).unwrap();
        assert_eq!(outcome, ManifestUpdate::Missing);
        assert!(!path.exists());
    }

    #[test]
    fn test_unreadable_manifest_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CMakeLists.txt");
        fs::create_dir(&path).unwrap();
        assert!(read_manifest(&path).is_err());
    }

    #[test]
    fn test_propagate_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CMakeLists.txt");
        fs::write(&path, CMAKE).unwrap();

        let outcome = propagate_to_manifest(&path, &Version::new(0, 0, 2, 1)).unwrap();

        assert_eq!(outcome, ManifestUpdate::Updated);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("project(ReverbPlugin VERSION 0.0.2)"));
    }
}
