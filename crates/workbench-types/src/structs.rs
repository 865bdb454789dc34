//! Core value structs: map points, items, item type definitions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::enums::{Phase, RequirementKind};
use crate::ids::ItemTypeId;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A map coordinate (or a mount offset relative to a vehicle origin).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum, saturating at the coordinate bounds.
    #[must_use]
    pub const fn offset(self, by: Self) -> Self {
        Self {
            x: self.x.saturating_add(by.x),
            y: self.y.saturating_add(by.y),
        }
    }

    /// Chebyshev distance (the square radius used for pickup range).
    pub const fn square_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A concrete item instance, possibly a container holding other items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The item's type.
    pub type_id: ItemTypeId,
    /// Remaining charges, or `None` for items that do not track charges.
    #[serde(default)]
    pub charges: Option<i64>,
    /// Damage level; `0` is pristine.
    #[serde(default)]
    pub damage: i32,
    /// Items stored inside this one.
    #[serde(default)]
    pub contents: Vec<Item>,
}

impl Item {
    /// Create an undamaged, empty item without charges.
    pub fn new(type_id: impl Into<ItemTypeId>) -> Self {
        Self {
            type_id: type_id.into(),
            charges: None,
            damage: 0,
            contents: Vec::new(),
        }
    }

    /// Set the charge count.
    #[must_use]
    pub const fn with_charges(mut self, charges: i64) -> Self {
        self.charges = Some(charges);
        self
    }

    /// Set the damage level.
    #[must_use]
    pub const fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Put items inside this one.
    #[must_use]
    pub fn with_contents(mut self, contents: Vec<Self>) -> Self {
        self.contents = contents;
        self
    }

    /// Whether this item is of the given type.
    pub fn matches_type(&self, type_id: &ItemTypeId) -> bool {
        &self.type_id == type_id
    }

    /// Charges this item contributes when charges are counted.
    ///
    /// Items without charge tracking count as a single charge.
    pub fn charges_or_one(&self) -> i64 {
        self.charges.unwrap_or(1)
    }
}

// ---------------------------------------------------------------------------
// Item types and functionality
// ---------------------------------------------------------------------------

/// How one item type serves a functionality tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Functionality {
    /// Charges of this type consumed per requested charge of the
    /// functionality. `-1`: no charges needed; `0`: cannot serve.
    pub charge_factor: Decimal,
    /// Multiplier on activity duration when this type is used (lower is faster).
    #[serde(default = "default_time_modifier")]
    pub time_modifier: Decimal,
}

const fn default_time_modifier() -> Decimal {
    Decimal::ONE
}

impl Functionality {
    /// A functionality entry with a neutral time modifier.
    pub const fn new(charge_factor: Decimal) -> Self {
        Self {
            charge_factor,
            time_modifier: Decimal::ONE,
        }
    }

    /// Set the time modifier.
    #[must_use]
    pub const fn with_time_modifier(mut self, time_modifier: Decimal) -> Self {
        self.time_modifier = time_modifier;
        self
    }

    /// Interpret the raw factor.
    pub fn factor(&self) -> ChargeFactor {
        ChargeFactor::from_decimal(self.charge_factor)
    }
}

/// Interpreted charge conversion factor of a functionality entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeFactor {
    /// The type serves the function without spending charges.
    AmountOnly,
    /// The type cannot serve the function.
    Unusable,
    /// The type spends `factor` of its own charges per requested charge.
    PerCharge(Decimal),
}

impl ChargeFactor {
    /// Interpret a raw factor: negative means amount-only, zero unusable.
    pub fn from_decimal(factor: Decimal) -> Self {
        if factor.is_zero() {
            Self::Unusable
        } else if factor.is_sign_negative() {
            Self::AmountOnly
        } else {
            Self::PerCharge(factor)
        }
    }

    /// Derive the concrete requirement for a request of `requested` units of
    /// the functionality counted by `kind`.
    ///
    /// Returns `None` when the type cannot serve the function. Charge
    /// requests become `max(1, ceil(requested * factor))` charges; amount
    /// requests and amount-only factors become one unit.
    pub fn convert(self, kind: RequirementKind, requested: i64) -> Option<(RequirementKind, i64)> {
        match (self, kind) {
            (Self::Unusable, _) => None,
            (Self::AmountOnly, _) | (Self::PerCharge(_), RequirementKind::Amount) => {
                Some((RequirementKind::Amount, 1))
            }
            (Self::PerCharge(factor), RequirementKind::Charges) => {
                let needed = Decimal::from(requested)
                    .checked_mul(factor)
                    .map_or(i64::MAX, |scaled| scaled.ceil().to_i64().unwrap_or(i64::MAX));
                Some((RequirementKind::Charges, needed.max(1)))
            }
        }
    }
}

/// Static definition of an item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    /// Unique id.
    pub id: ItemTypeId,
    /// Display name.
    pub name: String,
    /// Physical phase.
    #[serde(default)]
    pub phase: Phase,
    /// Whether items of this type hold other items.
    #[serde(default)]
    pub container: bool,
    /// Whether the type is stacked and consumed by charges (nails, thread).
    #[serde(default)]
    pub count_by_charges: bool,
    /// Whether an item of this type is destroyed when its charges run out.
    #[serde(default)]
    pub destroy_when_empty: bool,
    /// Functionality tags this type provides.
    #[serde(default)]
    pub functions: BTreeMap<ItemTypeId, Functionality>,
    /// Tool qualities and their levels (`HAMMER` 1, `SAW_W` 2).
    #[serde(default)]
    pub qualities: BTreeMap<String, i32>,
}

impl ItemType {
    /// A plain solid item type.
    pub fn new(id: impl Into<ItemTypeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phase: Phase::Solid,
            container: false,
            count_by_charges: false,
            destroy_when_empty: false,
            functions: BTreeMap::new(),
            qualities: BTreeMap::new(),
        }
    }

    /// Mark as a container.
    #[must_use]
    pub const fn container(mut self) -> Self {
        self.container = true;
        self
    }

    /// Mark as counted by charges (implies destruction when empty).
    #[must_use]
    pub const fn count_by_charges(mut self) -> Self {
        self.count_by_charges = true;
        self
    }

    /// Mark as destroyed once its charges reach zero.
    #[must_use]
    pub const fn destroy_when_empty(mut self) -> Self {
        self.destroy_when_empty = true;
        self
    }

    /// Set the phase.
    #[must_use]
    pub const fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Declare a functionality this type provides.
    #[must_use]
    pub fn provides(mut self, function: impl Into<ItemTypeId>, entry: Functionality) -> Self {
        self.functions.insert(function.into(), entry);
        self
    }

    /// Declare a tool quality at a level.
    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>, level: i32) -> Self {
        self.qualities.insert(quality.into(), level);
        self
    }

    /// Whether this type has `quality` at `level` or better.
    pub fn has_quality(&self, quality: &str, level: i32) -> bool {
        self.qualities.get(quality).is_some_and(|have| *have >= level)
    }

    /// Whether an emptied item of this type disappears.
    pub const fn destroyed_when_empty(&self) -> bool {
        self.count_by_charges || self.destroy_when_empty
    }

    /// Whether this type is a liquid.
    pub fn is_liquid(&self) -> bool {
        self.phase == Phase::Liquid
    }

    /// Time modifier for a functionality, neutral if the type does not
    /// declare one.
    pub fn time_modifier(&self, function: &ItemTypeId) -> Decimal {
        self.functions
            .get(function)
            .map_or(Decimal::ONE, |entry| entry.time_modifier)
    }
}
