//! Build artifacts and artifact name matching.

use std::path::{Component, Path};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use teamcity_api::types::BuildId;
use teamcity_api::Client;
use tokio::io::AsyncWrite;

use crate::error::{malformed, Error};

/// A file or directory published by a build.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    build_id: BuildId,
    file_name: String,
    full_name: String,
    size: Option<u64>,
    modification_time: DateTime<FixedOffset>,
    client: Arc<Client>,
}

impl BuildArtifact {
    pub(crate) fn new(
        build_id: BuildId,
        file_name: String,
        full_name: String,
        size: Option<u64>,
        modification_time: DateTime<FixedOffset>,
        client: Arc<Client>,
    ) -> Self {
        Self {
            build_id,
            file_name,
            full_name,
            size,
            modification_time,
            client,
        }
    }

    pub fn build_id(&self) -> &BuildId {
        &self.build_id
    }

    /// Name of the file within its directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Path relative to the build's artifacts root.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Size in bytes; `None` for directories.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn modification_time(&self) -> DateTime<FixedOffset> {
        self.modification_time
    }

    /// Streams the content into `sink` and returns the number of bytes written.
    pub async fn download_to<W>(&self, sink: &mut W) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        Ok(self
            .client
            .download_artifact(&self.build_id, &self.full_name, sink)
            .await?)
    }

    /// Streams the content into a file at `output`, replacing it if present.
    pub async fn download(&self, output: &Path) -> Result<u64, Error> {
        download_to_file(&self.client, &self.build_id, &self.full_name, output).await
    }
}

/// Creates `output` and relays the artifact into it. A partially written file
/// is removed when the transfer fails.
pub(crate) async fn download_to_file(
    client: &Client,
    build_id: &BuildId,
    artifact_path: &str,
    output: &Path,
) -> Result<u64, Error> {
    tracing::debug!(
        "Downloading artifact {} of build {} to {}",
        artifact_path,
        build_id,
        output.display()
    );
    let mut file = tokio::fs::File::create(output).await?;
    match client.download_artifact(build_id, artifact_path, &mut file).await {
        Ok(written) => Ok(written),
        Err(e) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(output).await {
                tracing::warn!(
                    "Failed to remove partial download {}: {}",
                    output.display(),
                    remove_err
                );
            }
            Err(e.into())
        }
    }
}

/// Checks that a server-supplied artifact name is a single plain path
/// component, so joining it onto a local directory stays inside it.
pub(crate) fn plain_file_name(name: &str) -> Result<&str, Error> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(malformed(
            "artifact",
            "name",
            format!("`{}` is not a plain file name", name),
        )),
    }
}

/// Glob-style artifact name pattern: `*` matches any run of characters and
/// `?` exactly one; everything else is literal.
pub(crate) struct GlobPattern(Regex);

impl GlobPattern {
    pub(crate) fn new(pattern: &str) -> Result<Self, Error> {
        let translated = regex::escape(pattern)
            .replace(r"\*", ".*")
            .replace(r"\?", ".");
        Regex::new(&format!("^{}$", translated))
            .map(Self)
            .map_err(|e| {
                Error::InvalidArgument(format!("invalid artifact pattern `{}`: {}", pattern, e))
            })
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.0.is_match(name)
    }
}
