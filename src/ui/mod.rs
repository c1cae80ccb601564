//! User interface module - human-readable status output.

pub mod formatter;

pub use formatter::{
    display_bumped, display_error, display_manifest_update, display_status, display_success,
    display_version_change, display_warning,
};
