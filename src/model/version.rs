use chrono::{DateTime, Utc};
use std::fmt;

use super::custom_field::IssueCustomField;
use super::identifiable_name::IdentifiableName;
use crate::wire::WireEnum;

/// Who else can see and use a version besides its own project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionSharing {
    #[default]
    None,
    Descendants,
    Hierarchy,
    Tree,
    System,
}

impl WireEnum for VersionSharing {
    const ALL: &'static [VersionSharing] = &[
        VersionSharing::None,
        VersionSharing::Descendants,
        VersionSharing::Hierarchy,
        VersionSharing::Tree,
        VersionSharing::System,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            VersionSharing::None => "none",
            VersionSharing::Descendants => "descendants",
            VersionSharing::Hierarchy => "hierarchy",
            VersionSharing::Tree => "tree",
            VersionSharing::System => "system",
        }
    }
}

impl fmt::Display for VersionSharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VersionStatus {
    #[default]
    Open,
    Locked,
    Closed,
}

impl WireEnum for VersionStatus {
    const ALL: &'static [VersionStatus] = &[
        VersionStatus::Open,
        VersionStatus::Locked,
        VersionStatus::Closed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Open => "open",
            VersionStatus::Locked => "locked",
            VersionStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A project milestone. `id`, the timestamps and `project` are assigned by
/// the server and are never sent back to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Version {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
    /// A calendar day, held as midnight UTC. Only the UTC date is sent to
    /// the server.
    pub due_date: Option<DateTime<Utc>>,
    pub project: Option<IdentifiableName>,
    pub sharing: VersionSharing,
    pub status: VersionStatus,
    pub custom_fields: Vec<IssueCustomField>,
}

impl Version {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
