use teamcity_api::types::VcsRootId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsRoot {
    pub id: VcsRootId,
    pub name: String,
}
