//! Builds and their lazily fetched details.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use dashmap::DashMap;
use teamcity_api::types::{BuildId, BuildStatus};
use teamcity_api::{ChangeQuery, Client};
use tokio::sync::OnceCell;

use super::artifact::{download_to_file, plain_file_name, BuildArtifact, GlobPattern};
use super::{Change, Parameter};
use crate::error::Error;
use crate::mapper;

/// Comment used by [`Build::pin`] when none is given.
pub const DEFAULT_PIN_COMMENT: &str = "pinned via REST API";

/// The branch a build ran on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// `None` for builds on an anonymous branch.
    pub name: Option<String>,
    pub is_default: bool,
}

/// Fields every build bean carries, listed or fetched.
pub(crate) struct BuildParts {
    pub(crate) id: BuildId,
    pub(crate) number: String,
    pub(crate) status: BuildStatus,
    pub(crate) branch: Branch,
}

/// Fields only present once a build is fetched individually.
pub(crate) struct BuildDetail {
    pub(crate) queued_date: DateTime<FixedOffset>,
    pub(crate) start_date: DateTime<FixedOffset>,
    pub(crate) finish_date: DateTime<FixedOffset>,
    pub(crate) parameters: Vec<Parameter>,
}

/// A single build.
///
/// Builds obtained from a locator listing carry only their summary; the dates
/// and parameters are fetched on first access. Every lazily fetched value is
/// fetched at most once per instance (concurrent first accesses share one
/// request) and is never refreshed afterwards. Write operations such as
/// [`Build::add_tag`] go straight to the server and leave this snapshot as it
/// was.
pub struct Build {
    id: BuildId,
    number: String,
    status: BuildStatus,
    branch: Branch,
    client: Arc<Client>,
    detail: OnceCell<BuildDetail>,
    changes: OnceCell<Vec<Change>>,
    artifacts: DashMap<String, Arc<OnceCell<Vec<BuildArtifact>>>>,
}

impl std::fmt::Debug for Build {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Build")
            .field("id", &self.id)
            .field("number", &self.number)
            .field("status", &self.status)
            .field("branch", &self.branch)
            .field("detail_fetched", &self.detail.initialized())
            .finish()
    }
}

impl Build {
    pub(crate) fn new(parts: BuildParts, client: Arc<Client>, detail: Option<BuildDetail>) -> Self {
        Self {
            id: parts.id,
            number: parts.number,
            status: parts.status,
            branch: parts.branch,
            client,
            detail: OnceCell::new_with(detail),
            changes: OnceCell::new(),
            artifacts: DashMap::new(),
        }
    }

    pub fn id(&self) -> &BuildId {
        &self.id
    }

    /// Free-form build number; not necessarily numeric or unique.
    pub fn build_number(&self) -> &str {
        &self.number
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    async fn detail(&self) -> Result<&BuildDetail, Error> {
        self.detail
            .get_or_try_init(|| async {
                tracing::debug!("Fetching details of build {}", self.id);
                let bean = self.client.get_build(&self.id).await?;
                mapper::to_build_detail(bean)
            })
            .await
    }

    pub async fn fetch_queued_date(&self) -> Result<DateTime<FixedOffset>, Error> {
        Ok(self.detail().await?.queued_date)
    }

    pub async fn fetch_start_date(&self) -> Result<DateTime<FixedOffset>, Error> {
        Ok(self.detail().await?.start_date)
    }

    pub async fn fetch_finish_date(&self) -> Result<DateTime<FixedOffset>, Error> {
        Ok(self.detail().await?.finish_date)
    }

    pub async fn fetch_parameters(&self) -> Result<&[Parameter], Error> {
        Ok(&self.detail().await?.parameters)
    }

    /// VCS changes included in this build.
    pub async fn fetch_changes(&self) -> Result<&[Change], Error> {
        let changes = self
            .changes
            .get_or_try_init(|| async {
                tracing::debug!("Fetching changes of build {}", self.id);
                let query = ChangeQuery::for_build(self.id.clone());
                let list = self.client.get_changes(&query).await?;
                list.change
                    .unwrap_or_default()
                    .into_iter()
                    .map(mapper::to_change)
                    .collect::<Result<Vec<_>, Error>>()
            })
            .await?;
        Ok(changes)
    }

    pub async fn add_tag(&self, tag: &str) -> Result<(), Error> {
        if tag.is_empty() {
            return Err(Error::InvalidArgument("tag must not be empty".to_string()));
        }
        self.client.add_build_tag(&self.id, tag).await?;
        Ok(())
    }

    /// Pins the build, using [`DEFAULT_PIN_COMMENT`] when `comment` is `None`.
    pub async fn pin(&self, comment: Option<&str>) -> Result<(), Error> {
        self.client
            .pin_build(&self.id, comment.unwrap_or(DEFAULT_PIN_COMMENT))
            .await?;
        Ok(())
    }

    /// Lists the immediate children of `parent_path` (`""` for the root).
    /// Each distinct path is fetched once per build instance.
    pub async fn get_artifacts(&self, parent_path: &str) -> Result<Vec<BuildArtifact>, Error> {
        let parent_path = parent_path.trim_matches('/');
        let cell = self
            .artifacts
            .entry(parent_path.to_string())
            .or_default()
            .clone();
        let artifacts = cell
            .get_or_try_init(|| async {
                tracing::debug!("Listing artifacts of build {} under `{}`", self.id, parent_path);
                let list = self
                    .client
                    .get_artifact_children(&self.id, parent_path)
                    .await?;
                list.file
                    .unwrap_or_default()
                    .into_iter()
                    .map(|file| mapper::to_artifact(file, &self.id, parent_path, &self.client))
                    .collect::<Result<Vec<_>, Error>>()
            })
            .await?;
        Ok(artifacts.clone())
    }

    /// Returns the single artifact under `parent_path` whose name matches the
    /// glob `pattern`.
    pub async fn find_artifact(
        &self,
        pattern: &str,
        parent_path: &str,
    ) -> Result<BuildArtifact, Error> {
        let mut found = self.matching_artifacts(pattern, parent_path).await?;
        match found.len() {
            0 => Err(Error::NotFound(format!(
                "no artifact matching `{}` under `{}` in build {}",
                pattern, parent_path, self.id
            ))),
            1 => Ok(found.remove(0)),
            _ => Err(Error::AmbiguousMatch {
                pattern: pattern.to_string(),
                matches: found.iter().map(|a| a.full_name().to_string()).collect(),
            }),
        }
    }

    /// Downloads every root-level artifact matching `pattern` into
    /// `output_dir`, one stream at a time, and returns the written paths.
    ///
    /// Every matching name must be a plain file name; otherwise nothing is
    /// downloaded and the call fails with [`Error::MalformedResponse`].
    pub async fn download_artifacts(
        &self,
        pattern: &str,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, Error> {
        let found = self.matching_artifacts(pattern, "").await?;
        if found.is_empty() {
            return Err(Error::NotFound(format!(
                "no artifact matching `{}` in build {}",
                pattern, self.id
            )));
        }
        let outputs = found
            .iter()
            .map(|artifact| Ok(output_dir.join(plain_file_name(artifact.file_name())?)))
            .collect::<Result<Vec<_>, Error>>()?;
        tokio::fs::create_dir_all(output_dir).await?;
        for (artifact, output) in found.iter().zip(&outputs) {
            artifact.download(output).await?;
        }
        Ok(outputs)
    }

    /// Downloads the artifact at `artifact_path` into the file `output`.
    pub async fn download_artifact(&self, artifact_path: &str, output: &Path) -> Result<u64, Error> {
        download_to_file(
            &self.client,
            &self.id,
            artifact_path.trim_start_matches('/'),
            output,
        )
        .await
    }

    async fn matching_artifacts(
        &self,
        pattern: &str,
        parent_path: &str,
    ) -> Result<Vec<BuildArtifact>, Error> {
        let glob = GlobPattern::new(pattern)?;
        Ok(self
            .get_artifacts(parent_path)
            .await?
            .into_iter()
            .filter(|artifact| glob.matches(artifact.file_name()))
            .collect())
    }
}
