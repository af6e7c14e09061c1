//! Entry point binding a server URL and an authentication mode.

use std::sync::Arc;

use teamcity_api::types::{BuildConfigurationId, BuildId, ProjectId, VcsRootId};
use teamcity_api::{Auth, Client};

use crate::domain::{Build, BuildConfiguration, Project, VcsRoot};
use crate::error::Error;
use crate::locator::{BuildLocator, VcsRootLocator};
use crate::mapper;

/// Id of the single top-level project of every server.
pub const ROOT_PROJECT_ID: &str = "_Root";

/// A TeamCity server, accessed either as a guest or with basic credentials.
///
/// Construction performs no network I/O; invalid credentials surface as an
/// authorization failure from the first request. Each accessor performs one
/// request and maps the response. Cloning is cheap and clones share the
/// underlying HTTP client.
#[derive(Clone, Debug)]
pub struct TeamCityInstance {
    client: Arc<Client>,
}

impl TeamCityInstance {
    /// Connects anonymously through the server's guest entry point.
    pub fn guest_auth(server_url: &str) -> Result<Self, Error> {
        Self::new(server_url, Auth::Guest)
    }

    /// Connects with HTTP basic credentials.
    pub fn basic_auth(server_url: &str, username: &str, password: &str) -> Result<Self, Error> {
        Self::new(
            server_url,
            Auth::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
    }

    fn new(server_url: &str, auth: Auth) -> Result<Self, Error> {
        tracing::debug!("Configuring TeamCity client for {} ({:?})", server_url, auth);
        Ok(Self {
            client: Arc::new(Client::new(server_url, auth)?),
        })
    }

    /// Returns an instance that logs every response at `info` level.
    pub fn with_log_responses(self) -> Self {
        let client = (*self.client).clone().with_log_responses();
        Self {
            client: Arc::new(client),
        }
    }

    pub fn server_url(&self) -> &str {
        self.client.server_url()
    }

    /// Starts a build listing; see [`BuildLocator`].
    pub fn builds(&self) -> BuildLocator {
        BuildLocator::new(self.client.clone())
    }

    pub async fn build(&self, id: &BuildId) -> Result<Build, Error> {
        let bean = self.client.get_build(id).await?;
        mapper::to_build(bean, &self.client)
    }

    pub async fn build_configuration(
        &self,
        id: &BuildConfigurationId,
    ) -> Result<BuildConfiguration, Error> {
        let bean = self.client.get_build_type(id).await?;
        mapper::to_build_configuration(bean, &self.client)
    }

    pub fn vcs_roots(&self) -> VcsRootLocator {
        VcsRootLocator::new(self.client.clone())
    }

    pub async fn vcs_root(&self, id: &VcsRootId) -> Result<VcsRoot, Error> {
        let bean = self.client.get_vcs_root(id).await?;
        mapper::to_vcs_root(bean)
    }

    /// Fetches a project together with its child projects, build
    /// configurations and parameters.
    pub async fn project(&self, id: &ProjectId) -> Result<Project, Error> {
        let bean = self.client.get_project(id).await?;
        mapper::to_project(bean, &self.client)
    }

    pub async fn root_project(&self) -> Result<Project, Error> {
        self.project(&ProjectId::new(ROOT_PROJECT_ID)?).await
    }
}
