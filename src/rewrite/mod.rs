//! Optional language-model rewrite of release notes.
//!
//! Providers are tried in order until one returns text. Every failure is
//! reported as a [`ReleaseWarning`] and the caller falls back to the
//! deterministic renderer when the whole chain comes up empty.

pub mod chat;

pub use chat::ChatCompletionProvider;

use crate::config::RewriteConfig;
use crate::domain::ChangeLog;
use crate::env_file::EnvFile;
use crate::error::Result;
use crate::warnings::ReleaseWarning;

pub const OPENROUTER_KEY: &str = "OPENROUTER_KEY_PRIVATE";
pub const OPENAI_KEY: &str = "OPENAI_API_KEY";
pub const MODEL_KEY: &str = "RELEASE_NOTES_MODEL";

/// A collaborator able to turn a prompt into prose
pub trait TextRewriteProvider: Send + Sync {
    /// Short label used in diagnostics
    fn name(&self) -> &str;

    /// Returns the rewritten text, or `CollaboratorUnavailable`
    fn rewrite(&self, prompt: &str) -> Result<String>;
}

/// Bearer credentials and model override for the rewrite providers
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openrouter_key: Option<String>,
    pub openai_key: Option<String>,
    pub model: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openrouter_key", &self.openrouter_key.as_ref().map(|_| "***"))
            .field("openai_key", &self.openai_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .finish()
    }
}

impl Credentials {
    /// Keys from the version file win over `lookup` (normally the process
    /// environment). Empty values count as absent.
    pub fn resolve<F>(file: &EnvFile, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |name: &str| {
            file.get(name)
                .map(str::to_string)
                .or_else(|| lookup(name))
                .filter(|value| !value.is_empty())
        };

        Credentials {
            openrouter_key: key(OPENROUTER_KEY),
            openai_key: key(OPENAI_KEY),
            model: file
                .get(MODEL_KEY)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }

    pub fn from_environment(file: &EnvFile) -> Self {
        Credentials::resolve(file, |name| std::env::var(name).ok())
    }

    pub fn is_empty(&self) -> bool {
        self.openrouter_key.is_none() && self.openai_key.is_none()
    }
}

/// Prompt handed to the rewrite providers
pub fn build_prompt(changelog: &ChangeLog, version: &str) -> String {
    format!(
        "Based on these git commits for version {version}, write concise, user-friendly release notes in markdown format. \n\
         Focus on features and improvements users would care about. Group changes by category (Features, Fixes, Improvements).\n\
         Keep it brief but informative. Do not include commit hashes or technical implementation details.\n\
         \n\
         Commits:\n\
         {commits}\n\
         \n\
         Respond with clean markdown only, no code blocks or extra text.",
        version = version,
        commits = changelog.raw_text(),
    )
}

/// Ordered providers, first success wins
#[derive(Default)]
pub struct RewriteChain {
    providers: Vec<Box<dyn TextRewriteProvider>>,
}

impl RewriteChain {
    pub fn new(providers: Vec<Box<dyn TextRewriteProvider>>) -> Self {
        RewriteChain { providers }
    }

    /// OpenRouter first, then OpenAI, each only when its key is present
    pub fn from_credentials(credentials: &Credentials, config: &RewriteConfig) -> Self {
        let mut providers: Vec<Box<dyn TextRewriteProvider>> = Vec::new();

        if let Some(key) = &credentials.openrouter_key {
            let model = credentials
                .model
                .clone()
                .unwrap_or_else(|| config.openrouter_model.clone());
            providers.push(Box::new(ChatCompletionProvider::openrouter(key, model, config)));
        }
        if let Some(key) = &credentials.openai_key {
            providers.push(Box::new(ChatCompletionProvider::openai(key, config)));
        }

        RewriteChain { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Ask each provider in turn; `None` when no provider produced text
    pub fn enhance(
        &self,
        changelog: &ChangeLog,
        version: &str,
        warnings: &mut Vec<ReleaseWarning>,
    ) -> Option<String> {
        if self.providers.is_empty() {
            warnings.push(ReleaseWarning::RewriteUnavailable);
            return None;
        }

        let prompt = build_prompt(changelog, version);

        for provider in &self.providers {
            match provider.rewrite(&prompt) {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!(provider = provider.name(), "release notes rewritten");
                    return Some(text);
                }
                Ok(_) => {
                    tracing::debug!(provider = provider.name(), "empty rewrite response");
                    warnings.push(ReleaseWarning::RewriteFailed {
                        provider: provider.name().to_string(),
                        reason: "empty response".to_string(),
                    });
                }
                Err(e) => {
                    tracing::debug!(provider = provider.name(), error = %e, "rewrite failed");
                    warnings.push(ReleaseWarning::RewriteFailed {
                        provider: provider.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        None
    }
}
