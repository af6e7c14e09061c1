//! Error types for the domain layer.

/// Errors produced while fetching and mapping domain objects.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required field was missing or unparsable. The server's schema does
    /// not match what this library expects; retrying will not help.
    #[error("Malformed {entity} response: field `{field}` {reason}")]
    MalformedResponse {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },
    /// The requested entity or artifact does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// An artifact pattern matched more than one artifact.
    #[error("Pattern `{pattern}` matched {} artifacts: {}", .matches.len(), .matches.join(", "))]
    AmbiguousMatch {
        pattern: String,
        matches: Vec<String>,
    },
    /// The caller passed an argument that cannot be used, e.g. a non-positive limit.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Network, authentication or server failure, passed through unchanged.
    #[error("Transport failure: {0}")]
    Transport(#[source] teamcity_api::Error),
    /// A local destination could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<teamcity_api::Error> for Error {
    fn from(e: teamcity_api::Error) -> Self {
        match e {
            teamcity_api::Error::NotFound { path } => Self::NotFound(path),
            teamcity_api::Error::InvalidArgument(msg) => Self::InvalidArgument(msg),
            teamcity_api::Error::ParseFailed(reason) => Self::MalformedResponse {
                entity: "response",
                field: "body",
                reason,
            },
            other => Self::Transport(other),
        }
    }
}

pub(crate) fn malformed(
    entity: &'static str,
    field: &'static str,
    reason: impl Into<String>,
) -> Error {
    let reason = reason.into();
    tracing::warn!("Malformed {} response: field `{}` {}", entity, field, reason);
    Error::MalformedResponse {
        entity,
        field,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_routed_by_kind() {
        let not_found: Error = teamcity_api::Error::NotFound {
            path: "/guestAuth/app/rest/builds/id:1".to_string(),
        }
        .into();
        assert!(matches!(not_found, Error::NotFound(p) if p.ends_with("id:1")));

        let parse: Error = teamcity_api::Error::ParseFailed("eof".to_string()).into();
        assert!(matches!(parse, Error::MalformedResponse { field: "body", .. }));

        let status: Error = teamcity_api::Error::HttpStatus {
            status: 401,
            body: String::new(),
        }
        .into();
        assert!(matches!(
            status,
            Error::Transport(teamcity_api::Error::HttpStatus { status: 401, .. })
        ));
    }

    #[test]
    fn ambiguous_match_lists_candidates() {
        let err = Error::AmbiguousMatch {
            pattern: "*.zip".to_string(),
            matches: vec!["a.zip".to_string(), "b.zip".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Pattern `*.zip` matched 2 artifacts: a.zip, b.zip"
        );
    }
}
