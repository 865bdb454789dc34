//! Requirements: typed, counted needs and the caller's alternative-sets.
//!
//! A [`Requirement`] always names a concrete item type. It answers how much a
//! given item tree contributes toward it and, at commit time, uses that item
//! up. The caller's input is a [`RequirementSet`]: ordered alternative-sets of
//! tools and components, each entry a type or functionality id with a signed
//! count.

use serde::{Deserialize, Serialize};
use workbench_types::{Item, ItemTypeId, RequirementKind};
use workbench_world::ItemRegistry;

// ---------------------------------------------------------------------------
// Requirement
// ---------------------------------------------------------------------------

/// One typed, counted need for a concrete item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Amount or charges.
    pub kind: RequirementKind,
    /// The concrete item type needed.
    pub item_type: ItemTypeId,
    /// How many units or charges are still needed. Never negative.
    pub count: i64,
}

impl Requirement {
    /// Create a requirement.
    ///
    /// # Panics
    ///
    /// Panics if `count` is negative.
    pub fn new(kind: RequirementKind, item_type: impl Into<ItemTypeId>, count: i64) -> Self {
        assert!(count >= 0, "requirement count must not be negative");
        Self {
            kind,
            item_type: item_type.into(),
            count,
        }
    }

    /// `count` units of a type.
    pub fn amount(item_type: impl Into<ItemTypeId>, count: i64) -> Self {
        Self::new(RequirementKind::Amount, item_type, count)
    }

    /// `count` charges of a type.
    pub fn charges(item_type: impl Into<ItemTypeId>, count: i64) -> Self {
        Self::new(RequirementKind::Charges, item_type, count)
    }

    /// Same type and kind, different count.
    #[must_use]
    pub fn with_count(&self, count: i64) -> Self {
        Self::new(self.kind, self.item_type.clone(), count)
    }

    /// Whether nothing more is needed.
    pub const fn is_satisfied(&self) -> bool {
        self.count == 0
    }

    /// How much an item tree contributes toward this requirement.
    ///
    /// Contents are searched recursively. A container that holds anything is
    /// never counted itself, only its contents. Items without charge tracking
    /// count as one charge.
    pub fn amount_or_charges(&self, item: &Item) -> i64 {
        if !item.contents.is_empty() {
            return item
                .contents
                .iter()
                .map(|inner| self.amount_or_charges(inner))
                .fold(0_i64, i64::saturating_add);
        }
        if !item.matches_type(&self.item_type) {
            return 0;
        }
        match self.kind {
            RequirementKind::Amount => 1,
            RequirementKind::Charges => item.charges_or_one().max(0),
        }
    }

    /// Use an item tree toward this requirement, moving what was used into
    /// `used`.
    ///
    /// Contents are used first, erasing children that were fully used. Returns
    /// `true` when the item itself must be destroyed: amount requirements
    /// always take the whole item, charge requirements only when the charges
    /// run out and the type is destroyed when empty.
    ///
    /// # Panics
    ///
    /// Panics if accounting would drive the count negative.
    pub fn use_item(
        &mut self,
        item: &mut Item,
        registry: &ItemRegistry,
        used: &mut Vec<Item>,
    ) -> bool {
        if self.is_satisfied() {
            return false;
        }
        if !item.contents.is_empty() {
            let mut kept = Vec::with_capacity(item.contents.len());
            for mut inner in std::mem::take(&mut item.contents) {
                if !self.use_item(&mut inner, registry, used) {
                    kept.push(inner);
                }
            }
            item.contents = kept;
            return false;
        }
        if !item.matches_type(&self.item_type) {
            return false;
        }
        match (self.kind, item.charges) {
            (RequirementKind::Amount, _) | (RequirementKind::Charges, None) => {
                used.push(item.clone());
                self.count = self.count.saturating_sub(1);
                true
            }
            (RequirementKind::Charges, Some(charges)) => {
                let take = charges.clamp(0, self.count);
                if take == 0 {
                    return false;
                }
                used.push(item.clone().with_charges(take));
                let left = charges.saturating_sub(take);
                item.charges = Some(left);
                self.count = self.count.saturating_sub(take);
                assert!(self.count >= 0, "requirement count went negative");
                left == 0
                    && registry
                        .get(&item.type_id)
                        .is_some_and(|t| t.destroyed_when_empty())
            }
        }
    }
}

impl core::fmt::Display for Requirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            RequirementKind::Amount => write!(f, "{} x{}", self.item_type, self.count),
            RequirementKind::Charges => {
                write!(f, "{} ({} charges)", self.item_type, self.count)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Caller input
// ---------------------------------------------------------------------------

/// One entry of an alternative-set: an item type or functionality id with
/// the caller's signed count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSpec {
    /// Item type or `func:*` functionality id.
    #[serde(rename = "type")]
    pub type_id: ItemTypeId,
    /// Tools: `<= 0` one unit, `> 0` that many charges. Components: units,
    /// or charges for positive counts of count-by-charges types.
    pub count: i64,
}

impl RequirementSpec {
    /// Create an entry.
    pub fn new(type_id: impl Into<ItemTypeId>, count: i64) -> Self {
        Self {
            type_id: type_id.into(),
            count,
        }
    }
}

impl core::fmt::Display for RequirementSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.count > 0 {
            write!(f, "{} ({})", self.type_id, self.count)
        } else {
            write!(f, "{}", self.type_id)
        }
    }
}

/// Everything a recipe needs: alternative-sets of tools and of
/// components, in the caller's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSet {
    /// Tool alternative-sets.
    #[serde(default)]
    pub tools: Vec<Vec<RequirementSpec>>,
    /// Component alternative-sets.
    #[serde(default)]
    pub components: Vec<Vec<RequirementSpec>>,
}

impl RequirementSet {
    /// An empty set.
    pub const fn new() -> Self {
        Self {
            tools: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Add a tool alternative-set.
    #[must_use]
    pub fn tool(mut self, alternatives: Vec<RequirementSpec>) -> Self {
        self.tools.push(alternatives);
        self
    }

    /// Add a component alternative-set.
    #[must_use]
    pub fn component(mut self, alternatives: Vec<RequirementSpec>) -> Self {
        self.components.push(alternatives);
        self
    }

    /// The set needed for `batch` crafts at once: positive counts are
    /// multiplied, non-positive counts (one tool unit) stay as they are.
    #[must_use]
    pub fn scaled(&self, batch: u32) -> Self {
        let scale = |sets: &[Vec<RequirementSpec>]| -> Vec<Vec<RequirementSpec>> {
            sets.iter()
                .map(|alternatives| {
                    alternatives
                        .iter()
                        .map(|spec| {
                            let count = if spec.count > 0 {
                                spec.count.saturating_mul(i64::from(batch))
                            } else {
                                spec.count
                            };
                            RequirementSpec::new(spec.type_id.clone(), count)
                        })
                        .collect()
                })
                .collect()
        };
        Self {
            tools: scale(&self.tools),
            components: scale(&self.components),
        }
    }

    /// Whether nothing is required.
    pub fn is_empty(&self) -> bool {
        self.tools.iter().all(Vec::is_empty) && self.components.iter().all(Vec::is_empty)
    }
}
