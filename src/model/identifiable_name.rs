/// An `{id, name}` reference to another resource, e.g. the owning project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentifiableName {
    pub id: i64,
    pub name: Option<String>,
}

#[cfg(test)]
impl IdentifiableName {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}
