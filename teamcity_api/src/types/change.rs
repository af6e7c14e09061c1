//! VCS change wire shapes returned by `/app/rest/changes`.

use serde::{Deserialize, Serialize};

use super::wire::string_or_number;

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ChangeListBean {
    pub change: Option<Vec<ChangeBean>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ChangeBean {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    /// VCS revision of the commit.
    pub version: Option<String>,

    pub date: Option<String>,

    pub comment: Option<String>,

    pub user: Option<UserBean>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct UserBean {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    pub username: Option<String>,

    pub name: Option<String>,
}
