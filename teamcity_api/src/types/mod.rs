mod ids;
pub use self::ids::{BuildConfigurationId, BuildId, ChangeId, ProjectId, VcsRootId};

mod build;
pub use self::build::{BuildBean, BuildListBean, BuildStatus, ParametersBean, PropertyBean};

mod project;
pub use self::project::{
    BuildTypeBean, BuildTypesBean, ProjectBean, ProjectsBean, TagBean, TagsBean,
};

mod artifact;
pub use self::artifact::{ArtifactFileBean, ArtifactFileListBean};

mod change;
pub use self::change::{ChangeBean, ChangeListBean, UserBean};

mod vcs_root;
pub use self::vcs_root::{VcsRootBean, VcsRootListBean};

mod wire;
