use std::fmt;

use crate::domain::Version;

/// Shell variables describing a version, in export order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellExports {
    vars: Vec<(&'static str, String)>,
}

impl ShellExports {
    pub fn from_version(version: &Version) -> Self {
        ShellExports {
            vars: vec![
                ("PROJECT_VERSION", version.to_string()),
                ("PROJECT_VERSION_FULL", version.full()),
                ("VERSION_MAJOR", version.major.to_string()),
                ("VERSION_MINOR", version.minor.to_string()),
                ("VERSION_PATCH", version.patch.to_string()),
                ("VERSION_BUILD", version.build.to_string()),
                ("AU_VERSION_INT", version.packed().to_string()),
            ],
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.vars.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// One `export KEY=VALUE` line per variable
impl fmt::Display for ShellExports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "export {}={}", name, value)?;
        }
        Ok(())
    }
}
