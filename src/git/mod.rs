//! Source-control history for release notes
//!
//! The [ChangeSource] trait hides where history comes from:
//!
//! - [repository::Git2ChangeSource]: reads a real repository through `git2`
//! - [mock::MockChangeSource]: canned history for tests
//!
//! Callers go through [collect_changelog], which turns any failure into an
//! "Initial release" change log plus a warning.

pub mod mock;
pub mod repository;

pub use mock::MockChangeSource;
pub use repository::Git2ChangeSource;

use crate::domain::ChangeLog;
use crate::error::{ReleaseError, Result};
use crate::warnings::ReleaseWarning;

/// Number of recent commits summarized when no tag bounds the range
pub const DEFAULT_COMMIT_LIMIT: usize = 10;

/// Supplier of one-line history entries
pub trait ChangeSource {
    /// Entries formatted `<short-rev> <summary>`, newest first, merges excluded.
    ///
    /// With `since`, the range is `since..HEAD`. Without it the most recent
    /// reachable tag bounds the range, or failing that the last
    /// [DEFAULT_COMMIT_LIMIT] commits.
    fn oneline_log(&self, since: Option<&str>) -> Result<Vec<String>>;
}

/// Stand-in used when no repository could be opened
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        UnavailableSource {
            reason: reason.into(),
        }
    }
}

impl ChangeSource for UnavailableSource {
    fn oneline_log(&self, _since: Option<&str>) -> Result<Vec<String>> {
        Err(ReleaseError::Git(git2::Error::from_str(&self.reason)))
    }
}

/// Change log for a range; history failures collapse to "Initial release"
pub fn collect_changelog<S: ChangeSource + ?Sized>(
    source: &S,
    since: Option<&str>,
    warnings: &mut Vec<ReleaseWarning>,
) -> ChangeLog {
    match source.oneline_log(since) {
        Ok(lines) => ChangeLog::from_lines(lines),
        Err(e) => {
            tracing::debug!(error = %e, "history lookup failed");
            warnings.push(ReleaseWarning::HistoryUnavailable {
                reason: e.to_string(),
            });
            ChangeLog::initial_release()
        }
    }
}
