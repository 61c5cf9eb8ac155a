//! JSON keys used by the Redmine REST API.

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const CREATED_ON: &str = "created_on";
pub const UPDATED_ON: &str = "updated_on";
pub const DUE_DATE: &str = "due_date";
pub const PROJECT: &str = "project";
pub const SHARING: &str = "sharing";
pub const STATUS: &str = "status";
pub const CUSTOM_FIELDS: &str = "custom_fields";
pub const VERSION: &str = "version";
pub const VERSIONS: &str = "versions";
pub const VALUE: &str = "value";
pub const MULTIPLE: &str = "multiple";
pub const TOTAL_COUNT: &str = "total_count";
