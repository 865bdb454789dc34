//! Item type registry.
//!
//! The registry is the read-only table of [`ItemType`] definitions that every
//! item instance refers to. It also answers the reverse question the
//! requirement engine needs: which concrete types provide a functionality tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use workbench_types::{Functionality, ItemType, ItemTypeId};

use crate::error::WorldError;

/// All known item type definitions, indexed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ItemType>", into = "Vec<ItemType>")]
pub struct ItemRegistry {
    types: BTreeMap<ItemTypeId, ItemType>,
}

impl ItemRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register an item type.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateItemType`] if the id is already taken.
    pub fn insert(&mut self, item_type: ItemType) -> Result<(), WorldError> {
        if self.types.contains_key(&item_type.id) {
            return Err(WorldError::DuplicateItemType(item_type.id));
        }
        self.types.insert(item_type.id.clone(), item_type);
        Ok(())
    }

    /// Look up a type definition.
    pub fn get(&self, id: &ItemTypeId) -> Option<&ItemType> {
        self.types.get(id)
    }

    /// Whether the id names a concrete type or a functionality some type provides.
    pub fn knows(&self, id: &ItemTypeId) -> bool {
        if id.is_functionality() {
            self.types.values().any(|t| t.functions.contains_key(id))
        } else {
            self.types.contains_key(id)
        }
    }

    /// Display name of a type, falling back to the raw id.
    pub fn name<'a>(&'a self, id: &'a ItemTypeId) -> &'a str {
        self.types.get(id).map_or(id.as_str(), |t| t.name.as_str())
    }

    /// Every concrete type declaring the given functionality, in id order.
    pub fn providers<'a>(
        &'a self,
        function: &'a ItemTypeId,
    ) -> impl Iterator<Item = (&'a ItemType, &'a Functionality)> + 'a {
        self.types
            .values()
            .filter_map(move |t| t.functions.get(function).map(|entry| (t, entry)))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemType> {
        self.types.values()
    }
}

impl From<Vec<ItemType>> for ItemRegistry {
    fn from(types: Vec<ItemType>) -> Self {
        Self {
            types: types.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }
}

impl From<ItemRegistry> for Vec<ItemType> {
    fn from(registry: ItemRegistry) -> Self {
        registry.types.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn registry() -> ItemRegistry {
        ItemRegistry::from(vec![
            ItemType::new("welder", "welder")
                .provides("func:welder", Functionality::new(dec!(1))),
            ItemType::new("toolset", "integrated toolset")
                .provides("func:welder", Functionality::new(dec!(2)))
                .provides("func:hammer", Functionality::new(dec!(-1))),
            ItemType::new("rock", "rock"),
        ])
    }

    #[test]
    fn providers_are_listed_in_id_order() {
        let reg = registry();
        let func = ItemTypeId::from("func:welder");
        let ids: Vec<&str> = reg.providers(&func).map(|(t, _)| t.id.as_str()).collect();
        assert_eq!(ids, vec!["toolset", "welder"]);
    }

    #[test]
    fn duplicate_type_rejected() {
        let mut reg = registry();
        assert!(reg.insert(ItemType::new("rock", "another rock")).is_err());
        assert!(reg.insert(ItemType::new("stick", "stick")).is_ok());
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn knows_functionality_and_types() {
        let reg = registry();
        assert!(reg.knows(&ItemTypeId::from("func:hammer")));
        assert!(!reg.knows(&ItemTypeId::from("func:saw")));
        assert!(reg.knows(&ItemTypeId::from("rock")));
        assert!(!reg.knows(&ItemTypeId::from("anvil")));
    }

    #[test]
    fn name_falls_back_to_id() {
        let reg = registry();
        assert_eq!(reg.name(&ItemTypeId::from("toolset")), "integrated toolset");
        assert_eq!(reg.name(&ItemTypeId::from("anvil")), "anvil");
    }
}
