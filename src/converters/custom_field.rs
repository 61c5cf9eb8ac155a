use serde_json::Value;

use super::Converter;
use crate::error::MapResult;
use crate::model::{CustomFieldValue, Entity, EntityKind, IssueCustomField};
use crate::wire::{keys, scalar_text, FromWire, WireObject, WireObjectExt};

/// Custom field values as they appear inside other entities.
///
/// `value` is a scalar for single-valued fields and an array for fields with
/// `multiple` set. Array elements may be bare scalars or `{"value": x}`.
pub struct IssueCustomFieldConverter;

impl IssueCustomFieldConverter {
    pub fn write(field: &IssueCustomField) -> WireObject {
        let value = if field.multiple {
            Value::Array(
                field
                    .values
                    .iter()
                    .map(|v| Value::String(v.info.clone()))
                    .collect(),
            )
        } else {
            field.value().map_or(Value::Null, |v| Value::String(v.to_string()))
        };

        let mut object = WireObject::new();
        object.insert(keys::ID.into(), field.id.into());
        object.insert(keys::VALUE.into(), value);
        object
    }
}

impl FromWire for IssueCustomField {
    fn from_wire(object: &WireObject) -> MapResult<Self> {
        let values = match object.get(keys::VALUE) {
            Some(Value::Array(items)) => items.iter().filter_map(element_text).collect(),
            Some(value) => scalar_text(value).into_iter().collect(),
            None => Vec::new(),
        };

        Ok(IssueCustomField {
            id: object.get_int(keys::ID),
            name: object.get_string(keys::NAME),
            multiple: object.get_bool(keys::MULTIPLE),
            values: values.into_iter().map(CustomFieldValue::new).collect(),
        })
    }
}

fn element_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(inner) => inner.get_string(keys::VALUE),
        other => scalar_text(other),
    }
}

impl Converter for IssueCustomFieldConverter {
    fn supported_kinds(&self) -> &'static [EntityKind] {
        &[EntityKind::IssueCustomField]
    }

    fn deserialize(&self, object: Option<&WireObject>) -> MapResult<Option<Entity>> {
        object
            .map(IssueCustomField::from_wire)
            .transpose()
            .map(|field| field.map(Entity::IssueCustomField))
    }

    fn serialize(&self, entity: Option<&Entity>) -> WireObject {
        match entity {
            Some(Entity::IssueCustomField(field)) => Self::write(field),
            _ => WireObject::new(),
        }
    }
}
