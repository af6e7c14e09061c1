//! Fluent build and VCS root listings bound to a server.

use std::sync::Arc;

use teamcity_api::types::{BuildConfigurationId, BuildStatus};
use teamcity_api::{BuildQuery, Client, Query};

use crate::domain::{Build, VcsRoot};
use crate::error::Error;
use crate::mapper;

/// Build filter bound to a server. Obtained from
/// [`TeamCityInstance::builds`](crate::TeamCityInstance::builds).
///
/// Each `with_*` call consumes the locator and returns the updated one, so a
/// locator is never shared between callers while it is being built. Predicates
/// are single-valued (the last call wins) and serialize in a fixed order. A
/// fresh locator matches successful builds only.
#[derive(Clone, Debug)]
pub struct BuildLocator {
    client: Arc<Client>,
    query: BuildQuery,
}

impl BuildLocator {
    pub(crate) fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            query: BuildQuery::default(),
        }
    }

    pub fn from_configuration(mut self, build_configuration_id: BuildConfigurationId) -> Self {
        self.query = self.query.from_configuration(build_configuration_id);
        self
    }

    /// Matches builds of every status, not just `SUCCESS`.
    pub fn with_any_status(mut self) -> Self {
        self.query = self.query.with_any_status();
        self
    }

    pub fn with_status(mut self, status: BuildStatus) -> Self {
        self.query = self.query.with_status(status);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.query = self.query.with_tag(tag);
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.query = self.query.with_branch(branch);
        self
    }

    pub fn with_all_branches(mut self) -> Self {
        self.query = self.query.with_all_branches();
        self
    }

    /// Caps the number of listed builds. Fails with
    /// [`Error::InvalidArgument`] unless `count` is positive.
    pub fn limit_results(mut self, count: i32) -> Result<Self, Error> {
        self.query = self.query.limit_results(count)?;
        Ok(self)
    }

    /// The locator string sent to the server.
    pub fn locator(&self) -> String {
        self.query.locator()
    }

    /// Fetches the matching builds in the order the server returns them.
    pub async fn list(&self) -> Result<Vec<Build>, Error> {
        tracing::debug!("Listing builds with locator `{}`", self.locator());
        let resp = self.client.get_builds(&self.query).await?;
        resp.build
            .unwrap_or_default()
            .into_iter()
            .map(|bean| mapper::to_build_info(bean, &self.client))
            .collect()
    }

    /// The first matching build, or `None` when nothing matches.
    pub async fn latest(&self) -> Result<Option<Build>, Error> {
        let builds = self.clone().limit_results(1)?.list().await?;
        Ok(builds.into_iter().next())
    }
}

/// Listing of VCS roots. Obtained from
/// [`TeamCityInstance::vcs_roots`](crate::TeamCityInstance::vcs_roots).
#[derive(Clone, Debug)]
pub struct VcsRootLocator {
    client: Arc<Client>,
}

impl VcsRootLocator {
    pub(crate) fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<VcsRoot>, Error> {
        let resp = self.client.get_vcs_roots().await?;
        resp.vcs_root
            .unwrap_or_default()
            .into_iter()
            .map(mapper::to_vcs_root)
            .collect()
    }
}
