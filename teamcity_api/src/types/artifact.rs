use serde::{Deserialize, Serialize};

/// Response of `/artifacts/children/{path}`: the immediate children of a path.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ArtifactFileListBean {
    pub file: Option<Vec<ArtifactFileBean>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactFileBean {
    pub name: Option<String>,

    /// Path relative to the artifacts root.
    pub full_name: Option<String>,

    /// Absent for directories.
    pub size: Option<u64>,

    pub modification_time: Option<String>,
}
