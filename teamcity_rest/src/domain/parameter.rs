/// A name/value parameter of a project or build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// `None` when the parameter is declared but has no value.
    pub value: Option<String>,
    /// `true` when defined on this entity rather than inherited.
    pub own: bool,
}
