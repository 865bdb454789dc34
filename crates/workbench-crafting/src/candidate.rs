//! Candidates: located, not-yet-consumed items that can satisfy a requirement.
//!
//! A [`Locator`] is a plain value (coordinates plus index, or a symbolic id),
//! never a reference into a live container. It is re-resolved against the
//! world immediately before every read or mutation, so a candidate survives
//! being persisted across turns and simply fails to resolve if its slot is
//! gone.

use serde::{Deserialize, Serialize};
use workbench_types::{BionicId, ItemTypeId, Point, SourceKind, VehicleId};

// ---------------------------------------------------------------------------
// Source mask
// ---------------------------------------------------------------------------

/// A set of [`SourceKind`]s to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceMask(u8);

impl SourceMask {
    /// Nothing.
    pub const NONE: Self = Self(0);
    /// Carried inventory stacks.
    pub const INVENTORY: Self = Self(1 << 0);
    /// Worn items.
    pub const WORN: Self = Self(1 << 1);
    /// Bionic pseudo tools.
    pub const BIONIC: Self = Self(1 << 2);
    /// Ground items.
    pub const MAP: Self = Self(1 << 3);
    /// Vehicle cargo.
    pub const VEHICLE_CARGO: Self = Self(1 << 4);
    /// Vehicle part pseudo items.
    pub const VEHICLE_PSEUDO: Self = Self(1 << 5);
    /// Environment pseudo items.
    pub const ENVIRONMENT: Self = Self(1 << 6);
    /// Everything on the player's person.
    pub const PLAYER: Self = Self(Self::INVENTORY.0 | Self::WORN.0 | Self::BIONIC.0);
    /// Everything around the player.
    pub const NEARBY: Self = Self(
        Self::MAP.0 | Self::VEHICLE_CARGO.0 | Self::VEHICLE_PSEUDO.0 | Self::ENVIRONMENT.0,
    );
    /// Every source.
    pub const ALL: Self = Self(Self::PLAYER.0 | Self::NEARBY.0);

    /// The single-kind mask for a source kind.
    pub const fn of(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Inventory => Self::INVENTORY,
            SourceKind::Worn => Self::WORN,
            SourceKind::Bionic => Self::BIONIC,
            SourceKind::Map => Self::MAP,
            SourceKind::VehicleCargo => Self::VEHICLE_CARGO,
            SourceKind::VehiclePseudo => Self::VEHICLE_PSEUDO,
            SourceKind::Environment => Self::ENVIRONMENT,
        }
    }

    /// Whether the mask includes a source kind.
    pub const fn includes(self, kind: SourceKind) -> bool {
        (self.0 & Self::of(kind).0) != 0
    }

    /// Union of two masks.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// This mask without the kinds in `other`.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl Default for SourceMask {
    fn default() -> Self {
        Self::ALL
    }
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

/// Where a candidate lives.
///
/// Variant order follows the catalog enumeration order, so sorting locators
/// sorts candidates person-first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Locator {
    /// Item `index` of carried stack `stack`.
    Inventory {
        /// Stack index.
        stack: usize,
        /// Item index within the stack.
        index: usize,
    },
    /// Worn item `index`.
    Worn {
        /// Index in the worn list.
        index: usize,
    },
    /// Pseudo tool of an installed bionic.
    Bionic {
        /// The bionic.
        bionic: BionicId,
    },
    /// Item `index` on the tile at `pos`.
    Map {
        /// Tile position.
        pos: Point,
        /// Item index on the tile.
        index: usize,
    },
    /// Item `index` in the cargo part at `mount` of `vehicle`.
    VehicleCargo {
        /// The vehicle.
        vehicle: VehicleId,
        /// Mount offset of the cargo part.
        mount: Point,
        /// Item index in the part.
        index: usize,
    },
    /// Pseudo item `pseudo` exposed by the part at `mount` of `vehicle`.
    VehiclePseudo {
        /// The vehicle.
        vehicle: VehicleId,
        /// Mount offset of the part.
        mount: Point,
        /// The pseudo item type.
        pseudo: ItemTypeId,
    },
    /// Pseudo item `pseudo` offered by the tile at `pos`.
    Environment {
        /// Tile position.
        pos: Point,
        /// The pseudo item type.
        pseudo: ItemTypeId,
    },
}

impl Locator {
    /// The storage domain this locator points into.
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Inventory { .. } => SourceKind::Inventory,
            Self::Worn { .. } => SourceKind::Worn,
            Self::Bionic { .. } => SourceKind::Bionic,
            Self::Map { .. } => SourceKind::Map,
            Self::VehicleCargo { .. } => SourceKind::VehicleCargo,
            Self::VehiclePseudo { .. } => SourceKind::VehiclePseudo,
            Self::Environment { .. } => SourceKind::Environment,
        }
    }

    /// Whether the locator is on the player's person.
    pub const fn is_on_person(&self) -> bool {
        self.kind().is_on_person()
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// A located item (or pseudo item) considered for one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Where the item lives.
    pub locator: Locator,
    /// The concrete requirement type it is considered for.
    pub usage_type: ItemTypeId,
    /// How many units or charges of it this requirement may use.
    pub available: i64,
}

impl Candidate {
    /// Create a candidate.
    pub const fn new(locator: Locator, usage_type: ItemTypeId, available: i64) -> Self {
        Self {
            locator,
            usage_type,
            available,
        }
    }

    /// The candidate's storage domain.
    pub const fn kind(&self) -> SourceKind {
        self.locator.kind()
    }
}

/// Total usable amount across candidates.
pub fn total_available(candidates: &[Candidate]) -> i64 {
    candidates
        .iter()
        .map(|c| c.available)
        .fold(0_i64, i64::saturating_add)
}

/// Split a candidate list into what is on the player and what is nearby.
pub fn split_counts(candidates: &[Candidate]) -> (i64, i64) {
    candidates.iter().fold((0_i64, 0_i64), |(player, map), c| {
        if c.locator.is_on_person() {
            (player.saturating_add(c.available), map)
        } else {
            (player, map.saturating_add(c.available))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_compose() {
        assert!(SourceMask::PLAYER.includes(SourceKind::Worn));
        assert!(!SourceMask::PLAYER.includes(SourceKind::Map));
        assert!(SourceMask::NEARBY.includes(SourceKind::Environment));
        assert!(SourceMask::ALL.includes(SourceKind::Bionic));
        assert!(!SourceMask::NONE.includes(SourceKind::Inventory));
        let mixed = SourceMask::INVENTORY.with(SourceMask::MAP);
        assert!(mixed.includes(SourceKind::Map));
        assert!(!mixed.includes(SourceKind::VehicleCargo));
        let tools = SourceMask::ALL.without(SourceMask::WORN);
        assert!(!tools.includes(SourceKind::Worn));
        assert!(tools.includes(SourceKind::Bionic));
    }

    #[test]
    fn locators_sort_person_first() {
        let mut locators = vec![
            Locator::Environment {
                pos: Point::new(0, 0),
                pseudo: ItemTypeId::from("fire"),
            },
            Locator::Map {
                pos: Point::new(1, 0),
                index: 0,
            },
            Locator::Worn { index: 0 },
            Locator::Inventory { stack: 2, index: 0 },
        ];
        locators.sort();
        assert_eq!(locators.first().map(Locator::kind), Some(SourceKind::Inventory));
        assert_eq!(locators.last().map(Locator::kind), Some(SourceKind::Environment));
    }

    #[test]
    fn counts_split_by_person() {
        let candidates = vec![
            Candidate::new(Locator::Worn { index: 0 }, ItemTypeId::from("rag"), 2),
            Candidate::new(
                Locator::Map {
                    pos: Point::new(1, 1),
                    index: 0,
                },
                ItemTypeId::from("rag"),
                3,
            ),
        ];
        assert_eq!(split_counts(&candidates), (2, 3));
        assert_eq!(total_available(&candidates), 5);
    }

    #[test]
    fn locator_json_is_tagged() {
        let json = serde_json::to_string(&Locator::Worn { index: 1 }).unwrap_or_default();
        assert_eq!(json, r#"{"source":"worn","index":1}"#);
    }
}
