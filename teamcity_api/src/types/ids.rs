//! Opaque, kind-distinct identifiers.
//!
//! Every identifier wraps a non-empty string and compares by that string. The
//! kinds are separate types so a build id can never be passed where a project
//! id is expected.

use std::fmt;
use std::str::FromStr;

use crate::Error;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Wraps `value`, rejecting an empty string.
            pub fn new(value: impl Into<String>) -> Result<Self, Error> {
                let value = value.into();
                if value.is_empty() {
                    return Err(Error::InvalidArgument(format!(
                        "{} id must not be empty",
                        $kind
                    )));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a project (e.g. `_Root`, `Kotlin_Dev`).
    ProjectId,
    "project"
);
define_id!(
    /// Identifier of a single build.
    BuildId,
    "build"
);
define_id!(
    /// Identifier of a build configuration (a "build type" on the wire).
    BuildConfigurationId,
    "build configuration"
);
define_id!(
    /// Identifier of a VCS root.
    VcsRootId,
    "VCS root"
);
define_id!(
    /// Identifier of a VCS change.
    ChangeId,
    "change"
);
