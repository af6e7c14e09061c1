use std::sync::Arc;

use teamcity_api::types::ProjectId;
use teamcity_api::Client;
use tokio::sync::OnceCell;

use super::{BuildConfiguration, Parameter};
use crate::error::Error;
use crate::mapper;

/// Nested collections of a project, as embedded in a full project response.
pub(crate) struct ProjectContents {
    pub(crate) child_projects: Vec<Project>,
    pub(crate) build_configurations: Vec<BuildConfiguration>,
    pub(crate) parameters: Vec<Parameter>,
}

/// A project in the server's project tree.
///
/// A project fetched by id already holds its child projects, build
/// configurations and parameters. A child project listed inside its parent
/// only holds its summary; the collections are fetched together on first
/// access and kept for the lifetime of the instance.
pub struct Project {
    id: ProjectId,
    name: String,
    archived: bool,
    parent_project_id: Option<ProjectId>,
    client: Arc<Client>,
    contents: OnceCell<ProjectContents>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("archived", &self.archived)
            .field("parent_project_id", &self.parent_project_id)
            .field("contents_fetched", &self.contents.initialized())
            .finish()
    }
}

impl Project {
    pub(crate) fn new(
        id: ProjectId,
        name: String,
        archived: bool,
        parent_project_id: Option<ProjectId>,
        client: Arc<Client>,
        contents: Option<ProjectContents>,
    ) -> Self {
        Self {
            id,
            name,
            archived,
            parent_project_id,
            client,
            contents: OnceCell::new_with(contents),
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archived(&self) -> bool {
        self.archived
    }

    /// `None` for the root project.
    pub fn parent_project_id(&self) -> Option<&ProjectId> {
        self.parent_project_id.as_ref()
    }

    /// Whether the nested collections are already held by this instance.
    pub fn contents_fetched(&self) -> bool {
        self.contents.initialized()
    }

    async fn contents(&self) -> Result<&ProjectContents, Error> {
        self.contents
            .get_or_try_init(|| async {
                tracing::debug!("Fetching contents of project {}", self.id);
                let bean = self.client.get_project(&self.id).await?;
                mapper::to_project_contents(
                    bean.projects,
                    bean.build_types,
                    bean.parameters,
                    &self.client,
                )
            })
            .await
    }

    pub async fn fetch_child_projects(&self) -> Result<&[Project], Error> {
        Ok(&self.contents().await?.child_projects)
    }

    pub async fn fetch_build_configurations(&self) -> Result<&[BuildConfiguration], Error> {
        Ok(&self.contents().await?.build_configurations)
    }

    pub async fn fetch_parameters(&self) -> Result<&[Parameter], Error> {
        Ok(&self.contents().await?.parameters)
    }

    /// Writes a parameter to the server. This instance is not updated; fetch
    /// the project again to observe the change.
    pub async fn set_parameter(&self, name: &str, value: &str) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "parameter name must not be empty".to_string(),
            ));
        }
        self.client
            .set_project_parameter(&self.id, name, value)
            .await?;
        Ok(())
    }
}
