//! Typed client for the TeamCity REST API.
//!
//! Wraps the wire-level `teamcity_api` crate with validated domain objects
//! (projects, builds, build configurations, VCS roots, artifacts) and a fluent
//! build locator. Start from [`TeamCityInstance::guest_auth`] or
//! [`TeamCityInstance::basic_auth`].
//!
//! Nested data such as build dates, tags, changes and artifact listings is
//! fetched on first access and cached on the owning object for its lifetime.

pub mod date;
pub mod domain;
pub mod error;
pub mod instance;
pub mod locator;
pub mod mapper;

pub use teamcity_api;
pub use teamcity_api::types::{
    BuildConfigurationId, BuildId, BuildStatus, ChangeId, ProjectId, VcsRootId,
};

pub use domain::{
    Branch, Build, BuildArtifact, BuildConfiguration, Change, Parameter, Project, User, VcsRoot,
    DEFAULT_PIN_COMMENT,
};
pub use error::Error;
pub use instance::{TeamCityInstance, ROOT_PROJECT_ID};
pub use locator::{BuildLocator, VcsRootLocator};
