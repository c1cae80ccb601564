use crate::error::{ReleaseError, Result};
use std::fmt;

/// Largest value each of major/minor/patch may hold. Audio Unit hosts pack the
/// three components into one byte each.
pub const AU_COMPONENT_LIMIT: u32 = 255;

/// Plugin version: the semantic triple plus a monotonically increasing build number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32, build: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Bump version according to bump kind.
    ///
    /// The build number always advances by one, after the component reset.
    /// Fails with `RangeExceeded` when major, minor or patch ends up above
    /// [`AU_COMPONENT_LIMIT`], or with `BuildOverflow` when the build number
    /// is already at its maximum; the original value is left untouched.
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let mut next = *self;

        match kind {
            BumpKind::Major => {
                next.major = increment(VersionComponent::Major, next.major)?;
                next.minor = 0;
                next.patch = 0;
            }
            BumpKind::Minor => {
                next.minor = increment(VersionComponent::Minor, next.minor)?;
                next.patch = 0;
            }
            BumpKind::Patch => {
                next.patch = increment(VersionComponent::Patch, next.patch)?;
            }
            BumpKind::Build => {}
        }

        next.build = next
            .build
            .checked_add(1)
            .ok_or(ReleaseError::BuildOverflow { value: next.build })?;
        next.validate()?;
        Ok(next)
    }

    /// Check every AU-packed component against the byte limit
    pub fn validate(&self) -> Result<()> {
        for (component, value) in [
            (VersionComponent::Major, self.major),
            (VersionComponent::Minor, self.minor),
            (VersionComponent::Patch, self.patch),
        ] {
            if value > AU_COMPONENT_LIMIT {
                return Err(ReleaseError::RangeExceeded {
                    component,
                    value: u64::from(value),
                });
            }
        }
        Ok(())
    }

    /// `(major << 16) | (minor << 8) | patch`, the AU component version integer.
    ///
    /// Computed in 64 bits so unvalidated components keep their high bits.
    pub fn packed(&self) -> u64 {
        (u64::from(self.major) << 16) | (u64::from(self.minor) << 8) | u64::from(self.patch)
    }

    /// `major.minor.patch.build`
    pub fn full(&self) -> String {
        format!("{}.{}", self, self.build)
    }
}

fn increment(component: VersionComponent, value: u32) -> Result<u32> {
    value.checked_add(1).ok_or(ReleaseError::RangeExceeded {
        component,
        value: u64::from(value) + 1,
    })
}

impl Default for Version {
    fn default() -> Self {
        Version::new(0, 0, 1, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which version component a bump targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BumpKind {
    Major,
    Minor,
    #[default]
    Patch,
    Build,
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Build => "build",
        };
        f.write_str(name)
    }
}

/// Range-checked version components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionComponent {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VersionComponent::Major => "Major",
            VersionComponent::Minor => "Minor",
            VersionComponent::Patch => "Patch",
        };
        f.write_str(name)
    }
}
