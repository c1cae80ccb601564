//! Domain logic - pure rules independent of files, git and HTTP

pub mod change;
pub mod version;

pub use change::{ChangeItem, ChangeLog, INITIAL_RELEASE};
pub use version::{BumpKind, Version, VersionComponent, AU_COMPONENT_LIMIT};
