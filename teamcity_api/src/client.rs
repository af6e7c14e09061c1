//! HTTP client for the TeamCity REST API.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use url::Url;

use crate::{
    query::{BuildQuery, ChangeQuery, Query},
    types::{
        ArtifactFileListBean, BuildBean, BuildConfigurationId, BuildId, BuildListBean,
        BuildTypeBean, ChangeListBean, ProjectBean, ProjectId, TagsBean, VcsRootBean, VcsRootId,
        VcsRootListBean,
    },
    Error,
};

/// Request timeout used unless `TEAMCITY_REST_TIMEOUT_SECS` overrides it.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TIMEOUT_ENV: &str = "TEAMCITY_REST_TIMEOUT_SECS";

/// How requests authenticate against the server.
#[derive(Clone)]
pub enum Auth {
    /// Anonymous access through the `/guestAuth` entry point.
    Guest,
    /// HTTP basic credentials through the `/httpAuth` entry point.
    Basic { username: String, password: String },
}

impl Auth {
    fn path_prefix(&self) -> &'static str {
        match self {
            Auth::Guest => "guestAuth",
            Auth::Basic { .. } => "httpAuth",
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Guest => write!(f, "Guest"),
            Auth::Basic { username, .. } => write!(f, "Basic({})", username),
        }
    }
}

/// HTTP client for one TeamCity server.
///
/// Construction validates the server URL but performs no network I/O, so bad
/// credentials only surface as an error from the first request. Cloning is
/// cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    server_url: Url,
    auth: Auth,
    log_responses: bool,
}

impl Client {
    /// Creates a client for the server at `server_url`. A trailing `/` is ignored.
    pub fn new(server_url: &str, auth: Auth) -> Result<Self, Error> {
        let trimmed = server_url.trim_end_matches('/');
        let server_url = Url::parse(trimmed).map_err(|e| {
            Error::InvalidArgument(format!("invalid server URL `{}`: {}", trimmed, e))
        })?;
        if server_url.cannot_be_a_base() || !matches!(server_url.scheme(), "http" | "https") {
            return Err(Error::InvalidArgument(format!(
                "server URL `{}` must be an http(s) URL",
                trimmed
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(request_timeout())
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            server_url,
            auth,
            log_responses: false,
        })
    }

    /// Returns a copy of this client that logs every response status and body
    /// at `info` level.
    pub fn with_log_responses(mut self) -> Self {
        self.log_responses = true;
        self
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_str().trim_end_matches('/')
    }

    /// Resolves `path` below the auth entry point, encoding each segment.
    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Server URL cannot carry a path: {}", self.server_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .push(self.auth.path_prefix())
            .extend(path.trim_start_matches('/').split('/'));
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.auth {
            Auth::Guest => builder,
            Auth::Basic { username, password } => builder.basic_auth(username, Some(password)),
        }
    }

    /// Sends the request and turns every non-success status into an error.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_string();
        let body = error_body(resp.text().await, &path);
        let snippet = truncate_body(&body);
        if status == StatusCode::NOT_FOUND {
            tracing::error!("Resource not found: {} | body: {}", path, snippet);
            return Err(Error::NotFound { path });
        }
        tracing::error!("Request failed with status {}: {}", status, snippet);
        Err(Error::HttpStatus {
            status: status.as_u16(),
            body: snippet,
        })
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let resp = self
            .execute(
                self.request(Method::GET, url)
                    .header(ACCEPT, "application/json"),
            )
            .await?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;
        if self.log_responses {
            tracing::info!("{} {}: {}", status, path, body);
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })
    }

    async fn send_text(&self, method: Method, path: &str, body: &str) -> Result<(), Error> {
        let url = self.get_url(path, None::<&BuildQuery>)?;
        let resp = self
            .execute(
                self.request(method, url)
                    .header(CONTENT_TYPE, "text/plain")
                    .body(body.to_string()),
            )
            .await?;
        if self.log_responses {
            tracing::info!("{} {}", resp.status(), path);
        }
        Ok(())
    }

    /// Fetches the builds matching the given query, in server order.
    pub async fn get_builds(&self, query: &BuildQuery) -> Result<BuildListBean, Error> {
        self.get::<BuildListBean, BuildQuery>("/app/rest/builds", Some(query))
            .await
    }

    /// Fetches the full record of a single build.
    pub async fn get_build(&self, id: &BuildId) -> Result<BuildBean, Error> {
        self.get::<BuildBean, BuildQuery>(format!("/app/rest/builds/id:{}", id).as_str(), None)
            .await
    }

    /// Adds a tag to a build.
    pub async fn add_build_tag(&self, id: &BuildId, tag: &str) -> Result<(), Error> {
        self.send_text(
            Method::POST,
            format!("/app/rest/builds/id:{}/tags/", id).as_str(),
            tag,
        )
        .await
    }

    /// Pins a build with the given comment.
    pub async fn pin_build(&self, id: &BuildId, comment: &str) -> Result<(), Error> {
        self.send_text(
            Method::PUT,
            format!("/app/rest/builds/id:{}/pin/", id).as_str(),
            comment,
        )
        .await
    }

    /// Lists the immediate children of an artifact directory. An empty
    /// `parent_path` lists the artifacts root.
    pub async fn get_artifact_children(
        &self,
        id: &BuildId,
        parent_path: &str,
    ) -> Result<ArtifactFileListBean, Error> {
        self.get::<ArtifactFileListBean, BuildQuery>(
            format!("/app/rest/builds/id:{}/artifacts/children/{}", id, parent_path).as_str(),
            None,
        )
        .await
    }

    /// Streams one artifact's content into `sink`, chunk by chunk, and returns
    /// the number of bytes written.
    ///
    /// The response is released when this returns, whether or not the copy
    /// succeeded.
    pub async fn download_artifact<W>(
        &self,
        id: &BuildId,
        artifact_path: &str,
        sink: &mut W,
    ) -> Result<u64, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let path = format!("/app/rest/builds/id:{}/artifacts/content/{}", id, artifact_path);
        let url = self.get_url(&path, None::<&BuildQuery>)?;
        let mut resp = self.execute(self.request(Method::GET, url)).await?;

        let mut written = 0u64;
        while let Some(chunk) = resp.chunk().await.map_err(|e| {
            tracing::error!("Failed to read artifact content: {}", e);
            Error::RequestFailed
        })? {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        if self.log_responses {
            tracing::info!("{}: streamed {} bytes", path, written);
        }
        Ok(written)
    }

    /// Fetches the VCS changes included in a build.
    pub async fn get_changes(&self, query: &ChangeQuery) -> Result<ChangeListBean, Error> {
        self.get::<ChangeListBean, ChangeQuery>("/app/rest/changes", Some(query))
            .await
    }

    /// Fetches a project with its embedded child projects, build
    /// configurations and parameters.
    pub async fn get_project(&self, id: &ProjectId) -> Result<ProjectBean, Error> {
        self.get::<ProjectBean, BuildQuery>(format!("/app/rest/projects/id:{}", id).as_str(), None)
            .await
    }

    /// Sets (or creates) a parameter on a project.
    pub async fn set_project_parameter(
        &self,
        id: &ProjectId,
        name: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.send_text(
            Method::PUT,
            format!("/app/rest/projects/id:{}/parameters/{}", id, name).as_str(),
            value,
        )
        .await
    }

    /// Fetches a single build configuration.
    pub async fn get_build_type(&self, id: &BuildConfigurationId) -> Result<BuildTypeBean, Error> {
        self.get::<BuildTypeBean, BuildQuery>(
            format!("/app/rest/buildTypes/id:{}", id).as_str(),
            None,
        )
        .await
    }

    /// Fetches every tag used on builds of a build configuration.
    pub async fn get_build_type_tags(&self, id: &BuildConfigurationId) -> Result<TagsBean, Error> {
        self.get::<TagsBean, BuildQuery>(
            format!("/app/rest/buildTypes/id:{}/buildTags", id).as_str(),
            None,
        )
        .await
    }

    /// Sets (or creates) a parameter on a build configuration.
    pub async fn set_build_type_parameter(
        &self,
        id: &BuildConfigurationId,
        name: &str,
        value: &str,
    ) -> Result<(), Error> {
        self.send_text(
            Method::PUT,
            format!("/app/rest/buildTypes/id:{}/parameters/{}", id, name).as_str(),
            value,
        )
        .await
    }

    /// Fetches every VCS root visible to the current user.
    pub async fn get_vcs_roots(&self) -> Result<VcsRootListBean, Error> {
        self.get::<VcsRootListBean, BuildQuery>("/app/rest/vcs-roots", None)
            .await
    }

    /// Fetches a single VCS root.
    pub async fn get_vcs_root(&self, id: &VcsRootId) -> Result<VcsRootBean, Error> {
        self.get::<VcsRootBean, BuildQuery>(format!("/app/rest/vcs-roots/id:{}", id).as_str(), None)
            .await
    }
}

fn request_timeout() -> Duration {
    timeout_from(std::env::var(TIMEOUT_ENV).ok())
}

/// Missing, non-numeric and zero values fall back to the default.
fn timeout_from(value: Option<String>) -> Duration {
    let secs = value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// An unreadable error body is logged and replaced by an empty one, so the
/// status still reaches the caller.
fn error_body<E: fmt::Display>(body: Result<String, E>, path: &str) -> String {
    body.unwrap_or_else(|e| {
        tracing::warn!("Failed to read error response body from {}: {}", path, e);
        String::new()
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_prefixed_with_auth_entry_point() {
        let client = Client::new("https://ci.example.com/teamcity/", Auth::Guest).unwrap();
        let url = client
            .get_url("/app/rest/builds/id:7", None::<&BuildQuery>)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ci.example.com/teamcity/guestAuth/app/rest/builds/id:7"
        );

        let client = Client::new(
            "https://ci.example.com",
            Auth::Basic {
                username: "u".to_string(),
                password: "p".to_string(),
            },
        )
        .unwrap();
        let url = client.get_url("/app/rest/projects/id:_Root", None::<&BuildQuery>).unwrap();
        assert_eq!(url.path(), "/httpAuth/app/rest/projects/id:_Root");
    }

    #[test]
    fn artifact_path_segments_are_encoded() {
        let client = Client::new("https://ci.example.com", Auth::Guest).unwrap();
        let url = client
            .get_url(
                "/app/rest/builds/id:1/artifacts/content/dir/a b#1.zip",
                None::<&BuildQuery>,
            )
            .unwrap();
        assert_eq!(
            url.path(),
            "/guestAuth/app/rest/builds/id:1/artifacts/content/dir/a%20b%231.zip"
        );
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        assert!(matches!(
            Client::new("not a url", Auth::Guest),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Client::new("mailto:ci@example.com", Auth::Guest),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn debug_output_hides_password() {
        let auth = Auth::Basic {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        assert_eq!(format!("{:?}", auth), "Basic(admin)");
    }

    #[test]
    fn timeout_override_falls_back_to_default() {
        let default = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        assert_eq!(timeout_from(None), default);
        assert_eq!(timeout_from(Some("soon".to_string())), default);
        assert_eq!(timeout_from(Some("0".to_string())), default);
        assert_eq!(timeout_from(Some("-5".to_string())), default);
        assert_eq!(timeout_from(Some("".to_string())), default);
        assert_eq!(timeout_from(Some("90".to_string())), Duration::from_secs(90));
        assert_eq!(timeout_from(Some(" 5 ".to_string())), Duration::from_secs(5));
    }

    #[test]
    fn unreadable_error_body_falls_back_to_empty() {
        assert_eq!(error_body::<&str>(Ok("denied".to_string()), "/x"), "denied");
        assert_eq!(error_body(Err("connection reset"), "/x"), "");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() < body.len());
    }
}
