#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFieldValue {
    pub info: String,
}

impl CustomFieldValue {
    pub fn new(info: impl Into<String>) -> Self {
        Self { info: info.into() }
    }
}

/// A server-configured extra attribute attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueCustomField {
    pub id: i64,
    pub name: Option<String>,
    /// Set when the field accepts a list of values rather than one.
    pub multiple: bool,
    pub values: Vec<CustomFieldValue>,
}

impl IssueCustomField {
    /// First value, which is the only one for single-valued fields.
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(|v| v.info.as_str())
    }
}
