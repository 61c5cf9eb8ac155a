use serde_json::Value;

use super::Converter;
use crate::error::MapResult;
use crate::model::{Entity, EntityKind, IssueCustomField, Version};
use crate::wire::{keys, write_date_or_empty, FromWire, WireEnum, WireObject, WireObjectExt};

/// Maps `Version` to and from the API's JSON.
///
/// The two directions are not symmetric: reading restores every
/// field, writing emits only what the server accepts on create and update
/// (`name`, `status`, `sharing`, `description`, `due_date`) wrapped under
/// `"version"`. Identifiers, timestamps, the project and custom fields are
/// never written.
pub struct VersionConverter;

impl VersionConverter {
    pub fn read(object: Option<&WireObject>) -> MapResult<Option<Version>> {
        object.map(Version::from_wire).transpose()
    }

    pub fn write(version: &Version) -> WireObject {
        let mut inner = WireObject::new();
        inner.insert(keys::NAME.into(), optional_text(&version.name));
        inner.insert(keys::STATUS.into(), version.status.as_str().into());
        inner.insert(keys::SHARING.into(), version.sharing.as_str().into());
        inner.insert(keys::DESCRIPTION.into(), optional_text(&version.description));
        write_date_or_empty(&mut inner, keys::DUE_DATE, version.due_date);

        let mut root = WireObject::new();
        root.insert(keys::VERSION.into(), Value::Object(inner));
        root
    }
}

impl FromWire for Version {
    fn from_wire(object: &WireObject) -> MapResult<Self> {
        Ok(Version {
            id: object.get_int(keys::ID),
            name: object.get_string(keys::NAME),
            description: object.get_string(keys::DESCRIPTION),
            created_on: object.get_date_time(keys::CREATED_ON),
            updated_on: object.get_date_time(keys::UPDATED_ON),
            due_date: object.get_date(keys::DUE_DATE),
            project: object.get_identifiable_name(keys::PROJECT),
            sharing: object.get_enum(keys::SHARING)?,
            status: object.get_enum(keys::STATUS)?,
            custom_fields: object.get_collection::<IssueCustomField>(keys::CUSTOM_FIELDS)?,
        })
    }
}

impl Converter for VersionConverter {
    fn supported_kinds(&self) -> &'static [EntityKind] {
        &[EntityKind::Version]
    }

    fn deserialize(&self, object: Option<&WireObject>) -> MapResult<Option<Entity>> {
        Ok(Self::read(object)?.map(Entity::Version))
    }

    fn serialize(&self, entity: Option<&Entity>) -> WireObject {
        match entity {
            Some(Entity::Version(version)) => Self::write(version),
            _ => WireObject::new(),
        }
    }
}

fn optional_text(text: &Option<String>) -> Value {
    text.as_ref().map_or(Value::Null, |t| Value::String(t.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use crate::model::{IdentifiableName, VersionSharing, VersionStatus};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn object(value: Value) -> WireObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn reads_the_documented_example() {
        let obj = object(json!({
            "id": 7,
            "name": "Sprint 1",
            "status": "open",
            "sharing": "none",
            "due_date": "2020-01-15"
        }));
        let version = VersionConverter::read(Some(&obj)).unwrap().unwrap();

        assert_eq!(version.id, 7);
        assert_eq!(version.name.as_deref(), Some("Sprint 1"));
        assert_eq!(version.status, VersionStatus::Open);
        assert_eq!(version.sharing, VersionSharing::None);
        assert_eq!(
            version.due_date,
            Some(Utc.with_ymd_and_hms(2020, 1, 15, 0, 0, 0).unwrap())
        );
        assert!(version.custom_fields.is_empty());
        assert_eq!(version.project, None);
        assert_eq!(version.created_on, None);
    }

    #[test]
    fn reads_every_field_of_a_full_response() {
        let obj = object(json!({
            "id": "12",
            "project": {"id": 1, "name": "Redmine"},
            "name": "1.2.0",
            "description": "Spring release",
            "status": "Closed",
            "due_date": null,
            "sharing": "system",
            "created_on": "2019-03-01T08:00:00Z",
            "updated_on": "2019-04-02T09:15:00Z",
            "custom_fields": [
                {"id": 5, "name": "Codename", "value": "Tulip"},
                {"id": 6, "name": "Teams", "multiple": true, "value": ["core", "web"]}
            ]
        }));
        let version = VersionConverter::read(Some(&obj)).unwrap().unwrap();

        assert_eq!(version.id, 12);
        assert_eq!(version.project, Some(IdentifiableName::new(1, "Redmine")));
        assert_eq!(version.description.as_deref(), Some("Spring release"));
        assert_eq!(version.status, VersionStatus::Closed);
        assert_eq!(version.sharing, VersionSharing::System);
        assert_eq!(version.due_date, None);
        assert_eq!(
            version.created_on,
            Some(Utc.with_ymd_and_hms(2019, 3, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(
            version.updated_on,
            Some(Utc.with_ymd_and_hms(2019, 4, 2, 9, 15, 0).unwrap())
        );
        assert_eq!(version.custom_fields.len(), 2);
        assert_eq!(version.custom_fields[0].value(), Some("Tulip"));
        assert_eq!(version.custom_fields[1].values.len(), 2);
    }

    #[test]
    fn due_date_reads_as_the_utc_day_and_survives_a_round_trip() {
        let obj = object(json!({"due_date": "2021-06-30T18:00:00Z"}));
        let version = VersionConverter::read(Some(&obj)).unwrap().unwrap();
        let midnight = Utc.with_ymd_and_hms(2021, 6, 30, 0, 0, 0).unwrap();
        assert_eq!(version.due_date, Some(midnight));

        let wire = VersionConverter::write(&version);
        assert_eq!(wire["version"]["due_date"], json!("2021-06-30"));
        let back = VersionConverter::read(wire["version"].as_object())
            .unwrap()
            .unwrap();
        assert_eq!(back.due_date, version.due_date);
    }

    #[test]
    fn absent_object_reads_as_none() {
        assert_eq!(VersionConverter::read(None), Ok(None));
        assert_eq!(VersionConverter.deserialize(None), Ok(None));
    }

    #[test]
    fn empty_object_reads_as_defaults() {
        let version = VersionConverter::read(Some(&WireObject::new()))
            .unwrap()
            .unwrap();
        assert_eq!(version, Version::default());
    }

    #[test]
    fn unknown_status_is_a_format_error() {
        let obj = object(json!({"name": "x", "status": "bogus", "sharing": "none"}));
        let err = VersionConverter::read(Some(&obj)).unwrap_err();
        assert_eq!(err, MapError::format("status", "bogus"));
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn unknown_sharing_is_a_format_error() {
        let obj = object(json!({"status": "open", "sharing": "everyone"}));
        assert_eq!(
            VersionConverter::read(Some(&obj)),
            Err(MapError::format("sharing", "everyone"))
        );
    }

    #[test]
    fn writes_the_documented_example() {
        let version = Version {
            name: Some("Sprint 1".into()),
            status: VersionStatus::Locked,
            sharing: VersionSharing::System,
            description: Some("x".into()),
            due_date: None,
            ..Version::default()
        };
        let wire = VersionConverter::write(&version);
        assert_eq!(
            Value::Object(wire),
            json!({"version": {
                "name": "Sprint 1",
                "status": "locked",
                "sharing": "system",
                "description": "x",
                "due_date": ""
            }})
        );
    }

    #[test]
    fn never_writes_server_assigned_fields() {
        let version = Version {
            id: 99,
            name: Some("Release".into()),
            created_on: Some(Utc::now()),
            updated_on: Some(Utc::now()),
            due_date: Some(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()),
            project: Some(IdentifiableName::new(1, "Core")),
            custom_fields: vec![IssueCustomField {
                id: 1,
                ..IssueCustomField::default()
            }],
            ..Version::default()
        };
        let wire = VersionConverter::write(&version);

        assert_eq!(wire.len(), 1);
        let inner = wire["version"].as_object().unwrap();
        let mut keys: Vec<&str> = inner.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["description", "due_date", "name", "sharing", "status"]);
        assert_eq!(inner["due_date"], json!("2024-02-29"));
        assert_eq!(inner["description"], Value::Null);
    }

    #[test]
    fn serialize_ignores_other_kinds_and_absence() {
        let converter = VersionConverter;
        assert!(converter.serialize(None).is_empty());
        let other = Entity::IdentifiableName(IdentifiableName::new(1, "x"));
        assert!(converter.serialize(Some(&other)).is_empty());
    }

    #[test]
    fn outbound_fields_survive_a_round_trip() {
        let version = Version {
            name: Some("2.0".into()),
            description: Some("Major".into()),
            status: VersionStatus::Locked,
            sharing: VersionSharing::Tree,
            due_date: Some(Utc.with_ymd_and_hms(2022, 12, 1, 0, 0, 0).unwrap()),
            ..Version::default()
        };
        let wire = VersionConverter::write(&version);
        let back = VersionConverter::read(wire["version"].as_object())
            .unwrap()
            .unwrap();

        assert_eq!(back.name, version.name);
        assert_eq!(back.description, version.description);
        assert_eq!(back.status, version.status);
        assert_eq!(back.sharing, version.sharing);
        assert_eq!(back.due_date, version.due_date);
    }
}
