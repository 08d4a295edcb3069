use std::collections::BTreeMap;

use crate::scene::{
    builder::Scene,
    primitive::{Attributes, Primitive, PrimitiveKey},
};

/// Keyed copy of a scene's primitives at one point in time.
///
/// Whole primitives are kept (not only their [`Attributes`]) so a removed entity can be painted
/// as a ghost with its old styling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    entries: BTreeMap<PrimitiveKey, Primitive>,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            entries: scene
                .primitives
                .iter()
                .map(|p| (p.key.clone(), p.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &PrimitiveKey) -> Option<&Primitive> {
        self.entries.get(key)
    }

    pub fn attributes(&self, key: &PrimitiveKey) -> Option<Attributes> {
        self.entries.get(key).map(Primitive::attributes)
    }

    pub fn contains(&self, key: &PrimitiveKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &PrimitiveKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/snapshot.rs"]
mod tests;
