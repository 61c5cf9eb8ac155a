use std::fmt;

use super::custom_field::IssueCustomField;
use super::identifiable_name::IdentifiableName;
use super::version::Version;

/// Type tag the converter registry is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Version,
    IssueCustomField,
    IdentifiableName,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Version => "version",
            EntityKind::IssueCustomField => "issue custom field",
            EntityKind::IdentifiableName => "identifiable name",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any value a converter knows how to map.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Version(Version),
    IssueCustomField(IssueCustomField),
    IdentifiableName(IdentifiableName),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Version(_) => EntityKind::Version,
            Entity::IssueCustomField(_) => EntityKind::IssueCustomField,
            Entity::IdentifiableName(_) => EntityKind::IdentifiableName,
        }
    }
}

impl From<Version> for Entity {
    fn from(version: Version) -> Self {
        Entity::Version(version)
    }
}

impl From<IssueCustomField> for Entity {
    fn from(field: IssueCustomField) -> Self {
        Entity::IssueCustomField(field)
    }
}

impl From<IdentifiableName> for Entity {
    fn from(name: IdentifiableName) -> Self {
        Entity::IdentifiableName(name)
    }
}
