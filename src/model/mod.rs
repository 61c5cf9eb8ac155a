pub mod custom_field;
pub mod entity;
pub mod identifiable_name;
pub mod version;

pub use custom_field::{CustomFieldValue, IssueCustomField};
pub use entity::{Entity, EntityKind};
pub use identifiable_name::IdentifiableName;
pub use version::{Version, VersionSharing, VersionStatus};
