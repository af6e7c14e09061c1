mod artifact;
pub use self::artifact::BuildArtifact;

mod build;
pub use self::build::{Branch, Build, DEFAULT_PIN_COMMENT};
pub(crate) use self::build::{BuildDetail, BuildParts};

mod build_configuration;
pub use self::build_configuration::BuildConfiguration;

mod change;
pub use self::change::{Change, User};

mod parameter;
pub use self::parameter::Parameter;

mod project;
pub use self::project::Project;
pub(crate) use self::project::ProjectContents;

mod vcs_root;
pub use self::vcs_root::VcsRoot;
