pub mod custom_field;
pub mod identifiable_name;
pub mod version;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{MapError, MapResult};
use crate::model::{Entity, EntityKind};
use crate::wire::WireObject;

pub use custom_field::IssueCustomFieldConverter;
pub use identifiable_name::IdentifiableNameConverter;
pub use version::VersionConverter;

/// Maps one or more entity kinds to and from wire objects.
pub trait Converter: Send + Sync {
    fn supported_kinds(&self) -> &'static [EntityKind];

    /// `None` in, `None` out: the absence of data is not an error.
    fn deserialize(&self, object: Option<&WireObject>) -> MapResult<Option<Entity>>;

    /// Builds the outbound body. Entities of a kind this converter does not
    /// handle, and `None`, produce an empty object.
    fn serialize(&self, entity: Option<&Entity>) -> WireObject;
}

/// Routes conversions to the converter registered for an entity kind.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<EntityKind, Arc<dyn Converter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(VersionConverter);
        registry.register(IssueCustomFieldConverter);
        registry.register(IdentifiableNameConverter);
        registry
    }

    /// Registers `converter` for every kind it supports, replacing any
    /// converter previously registered for those kinds.
    pub fn register(&mut self, converter: impl Converter + 'static) {
        let converter: Arc<dyn Converter> = Arc::new(converter);
        for kind in converter.supported_kinds() {
            self.converters.insert(*kind, Arc::clone(&converter));
        }
    }

    pub fn converter_for(&self, kind: EntityKind) -> Option<&dyn Converter> {
        self.converters.get(&kind).map(|c| c.as_ref())
    }

    pub fn to_wire(&self, entity: &Entity) -> WireObject {
        match self.converter_for(entity.kind()) {
            Some(converter) => converter.serialize(Some(entity)),
            None => WireObject::new(),
        }
    }

    pub fn from_wire(
        &self,
        kind: EntityKind,
        object: Option<&WireObject>,
    ) -> MapResult<Option<Entity>> {
        self.converter_for(kind)
            .ok_or(MapError::Unsupported(kind))?
            .deserialize(object)
    }
}
