use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use plugin_release::cli::{run_bump_workflow, BumpOutcome, BumpWorkflowArgs};
use plugin_release::config;
use plugin_release::domain::BumpKind;
use plugin_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    about = "Bump the plugin version stored in .env and mirror it into CMakeLists.txt",
    after_help = "Examples:\n  bump-version                 # Bump patch version\n  bump-version minor           # Bump minor version\n  bump-version --export-only   # Export current version for shell"
)]
struct Args {
    #[arg(value_enum, default_value_t = BumpKind::Patch, help = "Version component to increment")]
    kind: BumpKind,

    #[arg(long, help = "Only export current version, don't bump")]
    export_only: bool,

    #[arg(long, help = "Show what would be changed without modifying files")]
    dry_run: bool,

    #[arg(long, default_value = ".", help = "Project root containing .env and CMakeLists.txt")]
    root: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    plugin_release::init_logging();

    if args.version {
        println!("bump-version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = BumpWorkflowArgs {
        kind: args.kind,
        export_only: args.export_only,
        dry_run: args.dry_run,
        project_root: args.root,
    };

    let outcome = match run_bump_workflow(&workflow_args, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match outcome {
        BumpOutcome::Exported(exports) => {
            print!("{}", exports);
        }
        BumpOutcome::Bumped {
            previous,
            current,
            manifest,
            warnings,
        } => {
            ui::display_version_change(&previous, &current);

            let Some(manifest) = manifest else {
                println!("\n[DRY RUN] No files were modified");
                return Ok(());
            };

            println!();
            ui::display_status("Updating version files...");
            ui::display_success(&format!("Updated {}", config.paths.version_file));
            ui::display_manifest_update(manifest, &config.paths.manifest);
            for warning in &warnings {
                ui::display_warning(warning);
            }
            ui::display_bumped(&current);
        }
    }

    Ok(())
}
