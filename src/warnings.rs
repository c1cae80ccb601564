use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while bumping or composing release notes.
/// These are reported to the user but never change the exit status.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// No rewrite credentials were found in the version file or environment
    RewriteUnavailable,
    /// A rewrite provider failed; the next one (or plain rendering) is used
    RewriteFailed { provider: String, reason: String },
    /// Source control could not supply history for the requested range
    HistoryUnavailable { reason: String },
    /// The build manifest exists but has no `project(... VERSION x.y.z)` declaration
    ManifestWithoutDeclaration { path: PathBuf },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::RewriteUnavailable => write!(
                f,
                "No OPENROUTER_KEY_PRIVATE or OPENAI_API_KEY set; using standard release notes"
            ),
            ReleaseWarning::RewriteFailed { provider, reason } => {
                write!(f, "{} API failed: {}", provider, reason)
            }
            ReleaseWarning::HistoryUnavailable { reason } => {
                write!(f, "Could not read git history ({}); treating as initial release", reason)
            }
            ReleaseWarning::ManifestWithoutDeclaration { path } => write!(
                f,
                "No project() VERSION declaration found in {}",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_failed_display() {
        let warning = ReleaseWarning::RewriteFailed {
            provider: "OpenRouter".to_string(),
            reason: "HTTP 401 Unauthorized".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "OpenRouter API failed: HTTP 401 Unauthorized"
        );
    }

    #[test]
    fn test_manifest_warning_names_path() {
        let warning = ReleaseWarning::ManifestWithoutDeclaration {
            path: PathBuf::from("build/CMakeLists.txt"),
        };
        assert!(warning.to_string().contains("build/CMakeLists.txt"));
    }
}
