use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::Version;
use crate::env_file::EnvFile;
use crate::error::Result;

/// Handle on the on-disk version file.
///
/// A missing file is treated as an empty one: loading yields the default
/// version and saving creates it.
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VersionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file
    pub fn read(&self) -> Result<EnvFile> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(EnvFile::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EnvFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load(&self) -> Result<Version> {
        self.read()?.version()
    }

    /// Persist `version`, keeping every non-version line of the current file
    pub fn save(&self, version: &Version) -> Result<()> {
        let rendered = self.read()?.render_with_version(version);
        write_atomic(&self.path, &rendered)?;
        tracing::debug!(path = %self.path.display(), version = %version.full(), "saved version file");
        Ok(())
    }
}

/// Replace `path` with `content` via a sibling temp file and rename
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file().set_permissions(metadata.permissions())?;
    }
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BumpKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = VersionStore::new(dir.path().join(".env"));
        assert_eq!(store.load().unwrap(), Version::new(0, 0, 1, 0));
    }

    #[test]
    fn test_save_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let store = VersionStore::new(&path);

        store.save(&Version::new(1, 0, 0, 3)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "VERSION_MAJOR=1\nVERSION_MINOR=0\nVERSION_PATCH=0\nVERSION_BUILD=3\n"
        );
    }

    #[test]
    fn test_save_preserves_other_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# Build settings\nOPENAI_API_KEY=\"sk-test\"\nVERSION_PATCH=7\n",
        )
        .unwrap();
        let store = VersionStore::new(&path);

        let bumped = store.load().unwrap().bump(BumpKind::Patch).unwrap();
        store.save(&bumped).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# Build settings\nOPENAI_API_KEY=\"sk-test\"\nVERSION_PATCH=8\nVERSION_MAJOR=0\nVERSION_MINOR=0\nVERSION_BUILD=1\n"
        );
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "VERSION_MAJOR='2'  \n\n# keep me\nFOO=bar\n").unwrap();
        let store = VersionStore::new(&path);

        store.save(&store.load().unwrap()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let second = fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }
}
