use std::collections::HashMap;

use crate::error::{ReleaseError, Result};
use crate::git::ChangeSource;

/// Mock history for testing without a repository
#[derive(Debug, Clone, Default)]
pub struct MockChangeSource {
    lines: Vec<String>,
    ranges: HashMap<String, Vec<String>>,
    failure: Option<String>,
}

impl MockChangeSource {
    /// History returned when no `since` range matches
    pub fn new<S: Into<String>>(lines: Vec<S>) -> Self {
        MockChangeSource {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// A source whose every lookup fails
    pub fn failing(reason: impl Into<String>) -> Self {
        MockChangeSource {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// History returned for `since..HEAD`
    pub fn with_range<S: Into<String>>(mut self, since: impl Into<String>, lines: Vec<S>) -> Self {
        self.ranges
            .insert(since.into(), lines.into_iter().map(Into::into).collect());
        self
    }
}

impl ChangeSource for MockChangeSource {
    fn oneline_log(&self, since: Option<&str>) -> Result<Vec<String>> {
        if let Some(reason) = &self.failure {
            return Err(ReleaseError::Git(git2::Error::from_str(reason)));
        }

        let lines = since
            .and_then(|tag| self.ranges.get(tag))
            .unwrap_or(&self.lines);
        Ok(lines.clone())
    }
}
