use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct VcsRootListBean {
    #[serde(rename = "vcs-root")]
    pub vcs_root: Option<Vec<VcsRootBean>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct VcsRootBean {
    pub id: Option<String>,

    pub name: Option<String>,
}
