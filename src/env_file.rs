//! Line-preserving `KEY=VALUE` file handling.
//!
//! Only the four version keys are ever rewritten; comments, blank lines,
//! unrelated keys and malformed lines pass through in their original order.

use std::collections::HashMap;

use crate::domain::Version;
use crate::error::{ReleaseError, Result};

pub const VERSION_MAJOR: &str = "VERSION_MAJOR";
pub const VERSION_MINOR: &str = "VERSION_MINOR";
pub const VERSION_PATCH: &str = "VERSION_PATCH";
pub const VERSION_BUILD: &str = "VERSION_BUILD";

/// Version keys in the order they are appended when missing
pub const VERSION_KEYS: [&str; 4] = [VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH, VERSION_BUILD];

/// Parsed contents of a key-value file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    lines: Vec<String>,
    values: HashMap<String, String>,
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        let mut values = HashMap::new();

        for line in &lines {
            if let Some((key, value)) = split_assignment(line) {
                values.insert(key.to_string(), unquote(value).to_string());
            }
        }

        EnvFile { lines, values }
    }

    /// Value for `key`, with surrounding quotes removed
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Version held by the file; absent keys take their defaults
    pub fn version(&self) -> Result<Version> {
        let defaults = Version::default();
        Ok(Version {
            major: self.number(VERSION_MAJOR)?.unwrap_or(defaults.major),
            minor: self.number(VERSION_MINOR)?.unwrap_or(defaults.minor),
            patch: self.number(VERSION_PATCH)?.unwrap_or(defaults.patch),
            build: self.number(VERSION_BUILD)?.unwrap_or(defaults.build),
        })
    }

    fn number<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|_| ReleaseError::invalid_value(key, raw)),
        }
    }

    /// Render the file with the version keys set to `version`.
    ///
    /// Every existing occurrence of a version key is replaced in place and
    /// missing keys are appended. Trailing whitespace is trimmed from all
    /// lines and the output ends with a single newline.
    pub fn render_with_version(&self, version: &Version) -> String {
        let replacement = |key: &str| -> String {
            match key {
                VERSION_MAJOR => version.major.to_string(),
                VERSION_MINOR => version.minor.to_string(),
                VERSION_PATCH => version.patch.to_string(),
                _ => version.build.to_string(),
            }
        };

        let mut seen = [false; 4];
        let mut out: Vec<String> = Vec::with_capacity(self.lines.len() + 4);

        for line in &self.lines {
            let version_key = split_assignment(line)
                .and_then(|(key, _)| VERSION_KEYS.iter().position(|k| *k == key));

            match version_key {
                Some(idx) => {
                    seen[idx] = true;
                    let key = VERSION_KEYS[idx];
                    out.push(format!("{}={}", key, replacement(key)));
                }
                None => out.push(line.trim_end().to_string()),
            }
        }

        for (idx, key) in VERSION_KEYS.iter().enumerate() {
            if !seen[idx] {
                out.push(format!("{}={}", key, replacement(key)));
            }
        }

        let mut rendered = out.join("\n");
        rendered.push('\n');
        rendered
    }
}

/// Split a non-comment line at its first `=`
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim(), value.trim()))
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'')
}
