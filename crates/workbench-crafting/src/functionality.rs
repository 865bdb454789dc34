//! Functionality expansion table.
//!
//! A functionality tag (`func:welder`) is served by every item type that
//! declares it, each with its own charge conversion factor. The table is a
//! memo cache owned by one crafting session and filled lazily from the item
//! registry the first time a tag is asked for.

use std::collections::BTreeMap;

use tracing::debug;
use workbench_types::{ChargeFactor, Functionality, ItemTypeId, RequirementKind};
use workbench_world::ItemRegistry;

/// One concrete type serving a functionality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// The concrete item type.
    pub item_type: ItemTypeId,
    /// How it serves the functionality.
    pub functionality: Functionality,
}

impl Provider {
    /// The concrete requirement this provider needs for `requested` units of
    /// the functionality counted by `kind`, or `None` if it cannot serve.
    ///
    /// Amount requests keep their unit count. Charge requests are converted
    /// by the factor: amount-only providers need one unit, charged providers
    /// need `max(1, ceil(requested * factor))` charges.
    pub fn converts(
        &self,
        kind: RequirementKind,
        requested: i64,
    ) -> Option<(RequirementKind, i64)> {
        let factor = self.functionality.factor();
        match (factor, kind) {
            (ChargeFactor::Unusable, _) => None,
            (_, RequirementKind::Amount) => Some((RequirementKind::Amount, requested)),
            (_, RequirementKind::Charges) => factor.convert(kind, requested),
        }
    }
}

/// Lazily built map from functionality tag to its providers.
#[derive(Debug, Clone, Default)]
pub struct FunctionalityTable {
    cache: BTreeMap<ItemTypeId, Vec<Provider>>,
}

impl FunctionalityTable {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            cache: BTreeMap::new(),
        }
    }

    /// Providers of a functionality, in registry order.
    pub fn providers(&mut self, registry: &ItemRegistry, function: &ItemTypeId) -> &[Provider] {
        self.cache.entry(function.clone()).or_insert_with(|| {
            let providers: Vec<Provider> = registry
                .providers(function)
                .map(|(item_type, functionality)| Provider {
                    item_type: item_type.id.clone(),
                    functionality: functionality.clone(),
                })
                .collect();
            debug!(%function, providers = providers.len(), "Expanded functionality");
            providers
        })
    }

    /// Number of tags expanded so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been expanded yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
