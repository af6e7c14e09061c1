//! Build-related wire shapes returned by `/app/rest/builds`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::wire::string_or_number;

/// Outcome of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    Success,
    Failure,
    Error,
}
impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BuildStatus::Success => "SUCCESS",
                BuildStatus::Failure => "FAILURE",
                BuildStatus::Error => "ERROR",
            }
        )
    }
}
impl FromStr for BuildStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(BuildStatus::Success),
            "FAILURE" => Ok(BuildStatus::Failure),
            "ERROR" => Ok(BuildStatus::Error),
            _ => Err(()),
        }
    }
}

/// Response of the build list endpoint.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct BuildListBean {
    pub count: Option<i64>,

    pub build: Option<Vec<BuildBean>>,
}

/// A build as sent by the server.
///
/// Entries of a locator listing carry only the summary fields; the dates and
/// properties are present once the build is fetched individually.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildBean {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    pub number: Option<String>,

    /// Raw status string; validated by the mapper, not by serde.
    pub status: Option<String>,

    /// Absent for builds on an anonymous branch.
    pub branch_name: Option<String>,

    pub default_branch: Option<bool>,

    pub queued_date: Option<String>,

    pub start_date: Option<String>,

    pub finish_date: Option<String>,

    pub properties: Option<ParametersBean>,
}

/// A `{"property": [...]}` wrapper, used for both build properties and
/// project parameters.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ParametersBean {
    pub property: Option<Vec<PropertyBean>>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PropertyBean {
    pub name: Option<String>,

    /// Declared but unset parameters have no value.
    pub value: Option<String>,

    pub own: Option<bool>,
}
