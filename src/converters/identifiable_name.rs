use serde_json::Value;

use super::Converter;
use crate::error::MapResult;
use crate::model::{Entity, EntityKind, IdentifiableName};
use crate::wire::{keys, FromWire, WireObject, WireObjectExt};

pub struct IdentifiableNameConverter;

impl FromWire for IdentifiableName {
    fn from_wire(object: &WireObject) -> MapResult<Self> {
        Ok(IdentifiableName {
            id: object.get_int(keys::ID),
            name: object.get_string(keys::NAME),
        })
    }
}

impl Converter for IdentifiableNameConverter {
    fn supported_kinds(&self) -> &'static [EntityKind] {
        &[EntityKind::IdentifiableName]
    }

    fn deserialize(&self, object: Option<&WireObject>) -> MapResult<Option<Entity>> {
        object
            .map(IdentifiableName::from_wire)
            .transpose()
            .map(|name| name.map(Entity::IdentifiableName))
    }

    fn serialize(&self, entity: Option<&Entity>) -> WireObject {
        let mut object = WireObject::new();
        if let Some(Entity::IdentifiableName(reference)) = entity {
            object.insert(keys::ID.into(), reference.id.into());
            object.insert(
                keys::NAME.into(),
                reference.name.clone().map_or(Value::Null, Value::String),
            );
        }
        object
    }
}
