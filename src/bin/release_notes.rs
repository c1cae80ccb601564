use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use plugin_release::cli::{run_release_notes_workflow, NotesWorkflowArgs};
use plugin_release::config;
use plugin_release::git::{ChangeSource, Git2ChangeSource, UnavailableSource};
use plugin_release::render::NotesFormat;
use plugin_release::rewrite::{Credentials, RewriteChain};
use plugin_release::ui;
use plugin_release::version_store::VersionStore;

#[derive(clap::Parser)]
#[command(
    name = "release-notes",
    about = "Generate release notes from git history, optionally rewritten by a language model"
)]
struct Args {
    #[arg(long, default_value = "1.0.0", help = "Version number for the release")]
    version: String,

    #[arg(long, help = "Generate notes since this tag")]
    since: Option<String>,

    #[arg(
        long,
        value_enum,
        default_value_t = NotesFormat::Markdown,
        help = "Output format (markdown or sparkle HTML)"
    )]
    format: NotesFormat,

    #[arg(long, help = "Use AI to enhance release notes")]
    ai: bool,

    #[arg(
        long,
        default_value = ".",
        help = "Project root containing the git repository and .env"
    )]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    plugin_release::init_logging();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let chain = if args.ai {
        let store = VersionStore::new(args.root.join(&config.paths.version_file));
        let env_file = store.read().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot read version file, using process environment only");
            Default::default()
        });
        RewriteChain::from_credentials(&Credentials::from_environment(&env_file), &config.rewrite)
    } else {
        RewriteChain::default()
    };

    let source: Box<dyn ChangeSource> = match Git2ChangeSource::open(&args.root) {
        Ok(repo) => Box::new(repo),
        Err(e) => Box::new(UnavailableSource::new(e.to_string())),
    };

    let workflow_args = NotesWorkflowArgs {
        version: args.version,
        since: args.since,
        format: args.format,
        rewrite: args.ai,
    };

    let outcome = run_release_notes_workflow(&workflow_args, &config, source.as_ref(), &chain);

    for warning in &outcome.warnings {
        ui::display_warning(warning);
    }
    println!("{}", outcome.text);

    Ok(())
}
