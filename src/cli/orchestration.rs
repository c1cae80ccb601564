//! Workflow orchestration behind the two binaries
//!
//! Keeps argument parsing (clap, in `src/bin`) apart from the logic so the
//! workflows can be driven programmatically and tested without a terminal.

use std::path::PathBuf;

use crate::config::Config;
use crate::conventional::classify;
use crate::domain::{BumpKind, Version};
use crate::error::Result;
use crate::export::ShellExports;
use crate::git::{collect_changelog, ChangeSource};
use crate::manifest::{apply_manifest_version, read_manifest, ManifestUpdate};
use crate::render::{markdown_to_sparkle, render, NotesFormat};
use crate::rewrite::RewriteChain;
use crate::version_store::VersionStore;
use crate::warnings::ReleaseWarning;

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    pub kind: BumpKind,

    /// Print the current version as shell exports and stop
    pub export_only: bool,

    /// Compute the bump without touching any file
    pub dry_run: bool,

    /// Directory the configured paths are relative to
    pub project_root: PathBuf,
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub enum BumpOutcome {
    Exported(ShellExports),
    Bumped {
        previous: Version,
        current: Version,
        /// `None` on a dry run
        manifest: Option<ManifestUpdate>,
        warnings: Vec<ReleaseWarning>,
    },
}

impl BumpWorkflowArgs {
    pub fn store(&self, config: &Config) -> VersionStore {
        VersionStore::new(self.project_root.join(&config.paths.version_file))
    }

    pub fn manifest_path(&self, config: &Config) -> PathBuf {
        self.project_root.join(&config.paths.manifest)
    }
}

/// Load, bump and persist the version.
///
/// A `RangeExceeded` error, or an unreadable manifest, is returned before
/// any file is written.
pub fn run_bump_workflow(args: &BumpWorkflowArgs, config: &Config) -> Result<BumpOutcome> {
    let store = args.store(config);
    let previous = store.load()?;

    if args.export_only {
        return Ok(BumpOutcome::Exported(ShellExports::from_version(&previous)));
    }

    let current = previous.bump(args.kind)?;
    tracing::debug!(kind = %args.kind, from = %previous.full(), to = %current.full(), "version bumped");

    if args.dry_run {
        return Ok(BumpOutcome::Bumped {
            previous,
            current,
            manifest: None,
            warnings: Vec::new(),
        });
    }

    // read the manifest first so a failure leaves both files untouched
    let manifest_path = args.manifest_path(config);
    let manifest_content = read_manifest(&manifest_path)?;

    store.save(&current)?;
    let manifest = apply_manifest_version(&manifest_path, manifest_content.as_deref(), &current)?;

    let mut warnings = Vec::new();
    if manifest == ManifestUpdate::NoDeclaration {
        warnings.push(ReleaseWarning::ManifestWithoutDeclaration {
            path: manifest_path,
        });
    }

    Ok(BumpOutcome::Bumped {
        previous,
        current,
        manifest: Some(manifest),
        warnings,
    })
}

/// Arguments for the release-notes workflow
#[derive(Debug, Clone, PartialEq)]
pub struct NotesWorkflowArgs {
    /// Version shown in the heading
    pub version: String,

    /// Tag the history range starts after
    pub since: Option<String>,

    pub format: NotesFormat,

    /// Try the language-model rewrite first
    pub rewrite: bool,
}

/// Rendered notes plus the warnings met on the way
#[derive(Debug, Clone, PartialEq)]
pub struct NotesOutcome {
    pub text: String,
    /// True when a rewrite provider produced the text
    pub rewritten: bool,
    pub warnings: Vec<ReleaseWarning>,
}

/// Collect history and compose release notes.
///
/// The rewrite chain is only consulted when `args.rewrite` is set; when it
/// yields nothing the deterministic renderer is used.
pub fn run_release_notes_workflow<S: ChangeSource + ?Sized>(
    args: &NotesWorkflowArgs,
    config: &Config,
    source: &S,
    chain: &RewriteChain,
) -> NotesOutcome {
    let mut warnings = Vec::new();
    let changelog = collect_changelog(source, args.since.as_deref(), &mut warnings);

    if args.rewrite {
        if let Some(text) = chain.enhance(&changelog, &args.version, &mut warnings) {
            let text = match args.format {
                NotesFormat::Sparkle => markdown_to_sparkle(&text),
                NotesFormat::Markdown => text,
            };
            return NotesOutcome {
                text,
                rewritten: true,
                warnings,
            };
        }
    }

    let categorized = classify(changelog.items(), &config.categories);
    NotesOutcome {
        text: render(&categorized, &args.version, args.format),
        rewritten: false,
        warnings,
    }
}
