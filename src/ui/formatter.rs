//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, errors and warnings to stderr so piped output
//! (`export` lines, release notes) stays clean.

use console::style;

use crate::domain::Version;
use crate::manifest::ManifestUpdate;
use crate::warnings::ReleaseWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning to the user.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Lines describing a bump, in display order.
pub fn version_change_lines(previous: &Version, current: &Version) -> Vec<String> {
    let packed = current.packed();
    vec![
        format!("Version bump: {} → {}", previous, current),
        format!("Build number: {} → {}", previous.build, current.build),
        format!("AU version int: {} (0x{:06X})", packed, packed),
    ]
}

/// Display the proposed version change.
pub fn display_version_change(previous: &Version, current: &Version) {
    for line in version_change_lines(previous, current) {
        println!("{}", line);
    }
}

/// Display the outcome of manifest propagation.
///
/// Only an actual update is reported; a manifest without declaration
/// surfaces as a [`ReleaseWarning`].
pub fn display_manifest_update(update: ManifestUpdate, file_name: &str) {
    if update == ManifestUpdate::Updated {
        display_success(&format!("Updated {}", file_name));
    }
}

/// Final summary line after files were written.
pub fn display_bumped(version: &Version) {
    println!(
        "\n{} Version bumped to {} (build {})",
        style("✅").green(),
        style(version).bold(),
        version.build
    );
}
