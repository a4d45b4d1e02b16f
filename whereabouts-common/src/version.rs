//! Build information shown in the footer

use std::fmt::{Display, Formatter};

/// The date that this build was created
pub const BUILD_DATE: Option<&str> = option_env!("BUILD_DATE");

/// The git commit hash that this build was created from
pub const VCS_REF: Option<&str> = option_env!("VCS_REF");

/// Build information, either part may be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// The date that this build was created
    pub build_date: Option<&'static str>,

    /// The git commit hash that this build was created from
    pub vcs_ref: Option<&'static str>,
}

impl Version {
    /// Get the version information for this build
    #[must_use]
    pub const fn get() -> Version {
        Version {
            build_date: BUILD_DATE,
            vcs_ref: VCS_REF,
        }
    }

    /// The footer lines, skipping anything unknown
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(build_date) = self.build_date {
            lines.push(format!("Built on {build_date}"));
        }
        if let Some(vcs_ref) = self.vcs_ref {
            lines.push(format!("VCS ref: {vcs_ref}"));
        }
        lines
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
