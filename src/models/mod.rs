pub mod entry;
pub mod map;
pub mod race;
pub mod vehicle;

use serde::Serialize;

/// Entity shape known at compile time: its display name, the collection it
/// lives in, and its ordered field names.
pub trait Entity {
    const NAME: &'static str;
    const COLLECTION: &'static str;
    const FIELDS: &'static [&'static str];
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ModelSchema {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

const fn schema_of<E: Entity>() -> ModelSchema {
    ModelSchema {
        name: E::NAME,
        fields: E::FIELDS,
    }
}

pub const REGISTRY: &[ModelSchema] = &[
    schema_of::<vehicle::Vehicle>(),
    schema_of::<map::Map>(),
    schema_of::<race::Race>(),
    schema_of::<entry::Entry>(),
];

#[derive(Debug, Serialize)]
pub struct SchemaInfo {
    pub models: &'static [ModelSchema],
}
