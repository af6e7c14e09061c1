use std::sync::Arc;

use teamcity_api::types::{BuildConfigurationId, ProjectId};
use teamcity_api::Client;
use tokio::sync::OnceCell;

use crate::error::Error;
use crate::mapper;

/// A build configuration (a "build type" on the wire).
pub struct BuildConfiguration {
    id: BuildConfigurationId,
    name: String,
    project_id: ProjectId,
    paused: bool,
    client: Arc<Client>,
    tags: OnceCell<Vec<String>>,
}

impl std::fmt::Debug for BuildConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildConfiguration")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("project_id", &self.project_id)
            .field("paused", &self.paused)
            .finish()
    }
}

impl BuildConfiguration {
    pub(crate) fn new(
        id: BuildConfigurationId,
        name: String,
        project_id: ProjectId,
        paused: bool,
        client: Arc<Client>,
    ) -> Self {
        Self {
            id,
            name,
            project_id,
            paused,
            client,
            tags: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &BuildConfigurationId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Every tag used on builds of this configuration, fetched once.
    pub async fn fetch_build_tags(&self) -> Result<&[String], Error> {
        let tags = self
            .tags
            .get_or_try_init(|| async {
                tracing::debug!("Fetching build tags of {}", self.id);
                let bean = self.client.get_build_type_tags(&self.id).await?;
                mapper::to_tags(bean)
            })
            .await?;
        Ok(tags)
    }

    /// Writes a parameter to the server. This instance is not updated.
    pub async fn set_parameter(&self, name: &str, value: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "parameter name must not be empty".to_string(),
            ));
        }
        self.client
            .set_build_type_parameter(&self.id, name, value)
            .await?;
        Ok(())
    }
}
