use chrono::{DateTime, FixedOffset};
use teamcity_api::types::ChangeId;

/// A VCS commit that went into a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub id: ChangeId,
    /// VCS revision, e.g. a git commit hash.
    pub version: String,
    pub user: User,
    pub date: DateTime<FixedOffset>,
    pub comment: String,
}

/// A server user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Display name; users are not required to set one.
    pub name: Option<String>,
}
