//! Project and build configuration wire shapes.

use serde::{Deserialize, Serialize};

use super::build::ParametersBean;

/// A project as sent by `/app/rest/projects/id:{id}`.
///
/// The nested collections are only populated on the top-level project of a
/// response; child entries carry the summary fields alone.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBean {
    pub id: Option<String>,

    pub name: Option<String>,

    /// Absent on the root project.
    pub parent_project_id: Option<String>,

    pub archived: Option<bool>,

    pub projects: Option<ProjectsBean>,

    pub parameters: Option<ParametersBean>,

    pub build_types: Option<BuildTypesBean>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ProjectsBean {
    pub project: Option<Vec<ProjectBean>>,
}

/// A build configuration, called a "build type" on the wire.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildTypeBean {
    pub id: Option<String>,

    pub name: Option<String>,

    pub project_id: Option<String>,

    pub paused: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildTypesBean {
    pub build_type: Option<Vec<BuildTypeBean>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TagBean {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct TagsBean {
    pub tag: Option<Vec<TagBean>>,
}
