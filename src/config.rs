use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "release-tools.toml";

/// Represents the complete configuration for the release tools.
///
/// Contains file locations, category keywords for release notes and the
/// rewrite provider settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub categories: CategoriesConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,
}

fn default_version_file() -> String {
    ".env".to_string()
}

fn default_manifest() -> String {
    "CMakeLists.txt".to_string()
}

/// File locations, relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default = "default_manifest")]
    pub manifest: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            version_file: default_version_file(),
            manifest: default_manifest(),
        }
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_feature_keywords() -> Vec<String> {
    keywords(&["add", "feat", "feature", "new"])
}

fn default_fix_keywords() -> Vec<String> {
    keywords(&["fix", "bug", "repair", "resolve"])
}

fn default_improvement_keywords() -> Vec<String> {
    keywords(&["update", "improve", "enhance", "optimize", "refactor"])
}

/// Keywords that sort change items into release-note sections.
///
/// Matching is a case-insensitive substring test, checked in the order
/// features, fixes, improvements.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CategoriesConfig {
    #[serde(default = "default_feature_keywords")]
    pub features: Vec<String>,

    #[serde(default = "default_fix_keywords")]
    pub fixes: Vec<String>,

    #[serde(default = "default_improvement_keywords")]
    pub improvements: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        CategoriesConfig {
            features: default_feature_keywords(),
            fixes: default_fix_keywords(),
            improvements: default_improvement_keywords(),
        }
    }
}

fn default_openrouter_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_openrouter_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

/// Settings for the language-model rewrite of release notes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RewriteConfig {
    #[serde(default = "default_openrouter_url")]
    pub openrouter_url: String,

    /// Overridden by `RELEASE_NOTES_MODEL` in the version file
    #[serde(default = "default_openrouter_model")]
    pub openrouter_model: String,

    #[serde(default = "default_openai_url")]
    pub openai_url: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfig {
            openrouter_url: default_openrouter_url(),
            openrouter_model: default_openrouter_model(),
            openai_url: default_openai_url(),
            openai_model: default_openai_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-tools.toml` in current directory
/// 3. `.release-tools.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))
}
