//! Conversion of wire beans into validated domain objects.
//!
//! Every bean field is optional on the wire. Fields the domain model requires
//! are checked here and a missing or unparsable one fails the whole mapping
//! with [`Error::MalformedResponse`]; no partially populated domain object is
//! ever returned. Optional fields pass through as `None`, and a nested
//! collection that is absent or `null` maps to an empty one.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use teamcity_api::types::{
    ArtifactFileBean, BuildBean, BuildConfigurationId, BuildId, BuildStatus, BuildTypeBean,
    BuildTypesBean, ChangeBean, ChangeId, ParametersBean, ProjectBean, ProjectId, ProjectsBean,
    PropertyBean, TagsBean, UserBean, VcsRootBean, VcsRootId,
};
use teamcity_api::Client;

use crate::date::parse_date;
use crate::domain::{
    Branch, Build, BuildArtifact, BuildConfiguration, BuildDetail, BuildParts, Change, Parameter,
    Project, ProjectContents, User, VcsRoot,
};
use crate::error::{malformed, Error};

fn required<T>(value: Option<T>, entity: &'static str, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| malformed(entity, field, "is missing"))
}

/// Identifiers additionally reject the empty string.
fn required_id<T: FromStr>(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<T, Error> {
    required(value, entity, field)?
        .parse::<T>()
        .map_err(|_| malformed(entity, field, "is empty"))
}

fn required_date(
    value: Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<DateTime<FixedOffset>, Error> {
    let value = required(value, entity, field)?;
    parse_date(&value)
        .map_err(|e| malformed(entity, field, format!("has unparsable date `{}`: {}", value, e)))
}

fn build_parts(bean: &mut BuildBean) -> Result<BuildParts, Error> {
    let id = required_id::<BuildId>(bean.id.take(), "build", "id")?;
    let number = required(bean.number.take(), "build", "number")?;
    let status = required(bean.status.take(), "build", "status")?;
    let status = status
        .parse::<BuildStatus>()
        .map_err(|_| malformed("build", "status", format!("has unknown value `{}`", status)))?;
    Ok(BuildParts {
        id,
        number,
        status,
        branch: Branch {
            name: bean.branch_name.take(),
            is_default: bean.default_branch.unwrap_or(false),
        },
    })
}

/// Maps a build from a locator listing. Dates and parameters are fetched on
/// first access.
pub fn to_build_info(mut bean: BuildBean, client: &Arc<Client>) -> Result<Build, Error> {
    let parts = build_parts(&mut bean)?;
    Ok(Build::new(parts, client.clone(), None))
}

/// Maps an individually fetched build, whose dates are required.
pub fn to_build(mut bean: BuildBean, client: &Arc<Client>) -> Result<Build, Error> {
    let parts = build_parts(&mut bean)?;
    let detail = to_build_detail(bean)?;
    Ok(Build::new(parts, client.clone(), Some(detail)))
}

pub(crate) fn to_build_detail(bean: BuildBean) -> Result<BuildDetail, Error> {
    Ok(BuildDetail {
        queued_date: required_date(bean.queued_date, "build", "queuedDate")?,
        start_date: required_date(bean.start_date, "build", "startDate")?,
        finish_date: required_date(bean.finish_date, "build", "finishDate")?,
        parameters: to_parameters(bean.properties)?,
    })
}

pub fn to_parameter(bean: PropertyBean) -> Result<Parameter, Error> {
    Ok(Parameter {
        name: required(bean.name, "parameter", "name")?,
        value: bean.value,
        own: bean.own.unwrap_or(false),
    })
}

pub fn to_parameters(bean: Option<ParametersBean>) -> Result<Vec<Parameter>, Error> {
    bean.and_then(|p| p.property)
        .unwrap_or_default()
        .into_iter()
        .map(to_parameter)
        .collect()
}

/// Maps a project summary, such as a child entry of another project. Its
/// nested collections are fetched on first access.
pub fn to_project_info(bean: ProjectBean, client: &Arc<Client>) -> Result<Project, Error> {
    Ok(Project::new(
        required_id(bean.id, "project", "id")?,
        required(bean.name, "project", "name")?,
        bean.archived.unwrap_or(false),
        parent_project_id(bean.parent_project_id)?,
        client.clone(),
        None,
    ))
}

/// Maps a fully fetched project. Its nested collections are taken from the
/// bean as embedded, so the result never needs a follow-up request for them.
pub fn to_project(bean: ProjectBean, client: &Arc<Client>) -> Result<Project, Error> {
    let id = required_id(bean.id, "project", "id")?;
    let name = required(bean.name, "project", "name")?;
    let parent = parent_project_id(bean.parent_project_id)?;
    let contents =
        to_project_contents(bean.projects, bean.build_types, bean.parameters, client)?;
    Ok(Project::new(
        id,
        name,
        bean.archived.unwrap_or(false),
        parent,
        client.clone(),
        Some(contents),
    ))
}

fn parent_project_id(value: Option<String>) -> Result<Option<ProjectId>, Error> {
    value
        .map(|id| {
            id.parse::<ProjectId>()
                .map_err(|_| malformed("project", "parentProjectId", "is empty"))
        })
        .transpose()
}

pub(crate) fn to_project_contents(
    projects: Option<ProjectsBean>,
    build_types: Option<BuildTypesBean>,
    parameters: Option<ParametersBean>,
    client: &Arc<Client>,
) -> Result<ProjectContents, Error> {
    let child_projects = projects
        .and_then(|p| p.project)
        .unwrap_or_default()
        .into_iter()
        .map(|child| to_project_info(child, client))
        .collect::<Result<Vec<_>, _>>()?;
    let build_configurations = build_types
        .and_then(|b| b.build_type)
        .unwrap_or_default()
        .into_iter()
        .map(|build_type| to_build_configuration(build_type, client))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProjectContents {
        child_projects,
        build_configurations,
        parameters: to_parameters(parameters)?,
    })
}

pub fn to_build_configuration(
    bean: BuildTypeBean,
    client: &Arc<Client>,
) -> Result<BuildConfiguration, Error> {
    Ok(BuildConfiguration::new(
        required_id::<BuildConfigurationId>(bean.id, "build configuration", "id")?,
        required(bean.name, "build configuration", "name")?,
        required_id(bean.project_id, "build configuration", "projectId")?,
        bean.paused.unwrap_or(false),
        client.clone(),
    ))
}

pub fn to_tags(bean: TagsBean) -> Result<Vec<String>, Error> {
    bean.tag
        .unwrap_or_default()
        .into_iter()
        .map(|tag| required(tag.name, "tag", "name"))
        .collect()
}

pub fn to_user(bean: UserBean) -> Result<User, Error> {
    Ok(User {
        id: required(bean.id, "user", "id")?,
        username: required(bean.username, "user", "username")?,
        name: bean.name,
    })
}

pub fn to_change(bean: ChangeBean) -> Result<Change, Error> {
    Ok(Change {
        id: required_id::<ChangeId>(bean.id, "change", "id")?,
        version: required(bean.version, "change", "version")?,
        user: to_user(required(bean.user, "change", "user")?)?,
        date: required_date(bean.date, "change", "date")?,
        comment: required(bean.comment, "change", "comment")?,
    })
}

/// Maps one entry of an artifact listing under `parent_path`.
pub fn to_artifact(
    bean: ArtifactFileBean,
    build_id: &BuildId,
    parent_path: &str,
    client: &Arc<Client>,
) -> Result<BuildArtifact, Error> {
    let file_name = required(bean.name, "artifact", "name")?;
    let full_name = bean.full_name.unwrap_or_else(|| {
        if parent_path.is_empty() {
            file_name.clone()
        } else {
            format!("{}/{}", parent_path, file_name)
        }
    });
    Ok(BuildArtifact::new(
        build_id.clone(),
        file_name,
        full_name,
        bean.size,
        required_date(bean.modification_time, "artifact", "modificationTime")?,
        client.clone(),
    ))
}

pub fn to_vcs_root(bean: VcsRootBean) -> Result<VcsRoot, Error> {
    Ok(VcsRoot {
        id: required_id::<VcsRootId>(bean.id, "VCS root", "id")?,
        name: required(bean.name, "VCS root", "name")?,
    })
}
