use crate::types::{BuildConfigurationId, BuildStatus};
use crate::Error;

use super::common::{locator_value, sub_locator, LocatorWriter, Query};

/// Branch predicate of a build query. At most one is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchFilter {
    /// Builds of the named branch only.
    Named(String),
    /// Builds of every branch, default or not.
    All,
}
impl std::fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchFilter::Named(name) => write!(f, "{}", locator_value(name)),
            BranchFilter::All => write!(f, "default:any"),
        }
    }
}

/// Filter for the build list endpoint.
///
/// Every predicate is single-valued and the last call wins. The locator is
/// always written in the order `buildType`, `status`, `tag`, `branch`, `count`,
/// so equal queries serialize to identical strings regardless of how they
/// were built. A fresh query matches successful builds only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildQuery {
    pub build_type: Option<BuildConfigurationId>,
    /// `None` matches builds of any status.
    pub status: Option<BuildStatus>,
    pub tag: Option<String>,
    pub branch: Option<BranchFilter>,
    pub count: Option<u32>,
}

impl Default for BuildQuery {
    fn default() -> BuildQuery {
        BuildQuery {
            build_type: None,
            status: Some(BuildStatus::Success),
            tag: None,
            branch: None,
            count: None,
        }
    }
}

impl Query for BuildQuery {
    fn locator(&self) -> String {
        LocatorWriter::default()
            .dimension_opt(
                "buildType",
                self.build_type.as_ref().map(|id| sub_locator("id", id)),
            )
            .dimension_opt("status", self.status)
            .dimension_opt("tag", self.tag.as_deref().map(locator_value))
            .dimension_opt("branch", self.branch.as_ref())
            .dimension_opt("count", self.count)
            .finish()
    }
}

impl BuildQuery {
    pub fn from_configuration(mut self, build_configuration_id: BuildConfigurationId) -> Self {
        self.build_type = Some(build_configuration_id);
        self
    }

    pub fn with_status(mut self, status: BuildStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Drops the status predicate, including the default `SUCCESS` one.
    pub fn with_any_status(mut self) -> Self {
        self.status = None;
        self
    }

    /// A tag containing `,`, `:` or parentheses is sent parenthesized.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Quoted the same way as [`BuildQuery::with_tag`].
    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = Some(BranchFilter::Named(branch.to_string()));
        self
    }

    pub fn with_all_branches(mut self) -> Self {
        self.branch = Some(BranchFilter::All);
        self
    }

    /// Caps the number of returned builds. Fails unless `count` is positive.
    pub fn limit_results(mut self, count: i32) -> Result<Self, Error> {
        let count = u32::try_from(count)
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("result limit must be positive, got {}", count))
            })?;
        self.count = Some(count);
        Ok(self)
    }
}
