//! Enumeration types for the Workbench crafting inventory.
//!
//! Requirement kinds and availability states are used by the resolution
//! engine; terrain, furniture, part functions and fuels describe the storage
//! domains the engine draws from.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requirement accounting
// ---------------------------------------------------------------------------

/// How a requirement counts what it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RequirementKind {
    /// Discrete units: each matching item counts once.
    Amount,
    /// Consumable charges held by matching items.
    Charges,
}

/// Availability of a single concrete requirement after gathering.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Availability {
    /// Not gathered yet.
    #[default]
    Unknown,
    /// Enough matching items were found.
    Available,
    /// Not enough matching items exist.
    Unavailable,
    /// Enough items exist, but they were claimed by an overlapping requirement.
    Disabled,
}

impl Availability {
    /// Whether the requirement may be selected.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

// ---------------------------------------------------------------------------
// Source domains
// ---------------------------------------------------------------------------

/// The storage domain a candidate item lives in.
///
/// The declaration order is the catalog enumeration order: items on the
/// player's person come first, nearby sources after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// A stack in the player's carried inventory.
    Inventory,
    /// An item the player is wearing.
    Worn,
    /// A pseudo tool backed by an installed bionic and bio-power.
    Bionic,
    /// An item lying on a map tile.
    Map,
    /// An item in a vehicle cargo compartment.
    VehicleCargo,
    /// A pseudo tool backed by a vehicle part and the vehicle's fuel.
    VehiclePseudo,
    /// A pseudo item provided by the surroundings (fire, water source).
    Environment,
}

impl SourceKind {
    /// Whether items of this kind are carried by the player.
    pub const fn is_on_person(self) -> bool {
        matches!(self, Self::Inventory | Self::Worn | Self::Bionic)
    }

    /// Whether this kind is backed by a pseudo item rather than a real item slot.
    pub const fn is_pseudo(self) -> bool {
        matches!(self, Self::Bionic | Self::VehiclePseudo | Self::Environment)
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Physical phase of an item type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Phase {
    /// Ordinary solid item.
    #[default]
    Solid,
    /// Liquid; never picked up from open ground.
    Liquid,
    /// Gas.
    Gas,
}

// ---------------------------------------------------------------------------
// Map features
// ---------------------------------------------------------------------------

/// Ground type of a map tile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Terrain {
    /// Plain walkable floor.
    #[default]
    Floor,
    /// Grass or dirt.
    Grass,
    /// Shallow water; a drinkable water source.
    WaterShallow,
    /// Deep water; a drinkable water source.
    WaterDeep,
    /// Lava; counts as fire.
    Lava,
}

impl Terrain {
    /// Whether the terrain provides water.
    pub const fn is_water(self) -> bool {
        matches!(self, Self::WaterShallow | Self::WaterDeep)
    }
}

/// Furniture standing on a map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Furniture {
    /// A toilet; its tank is a water source.
    Toilet,
    /// A table.
    Table,
    /// A locker or cupboard.
    Locker,
}

// ---------------------------------------------------------------------------
// Vehicles
// ---------------------------------------------------------------------------

/// A function a vehicle part provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartFunction {
    /// Cargo space holding items.
    Cargo,
    /// Kitchen unit: hotplate on battery plus a clean water tap.
    Kitchen,
    /// Welding rig on battery.
    WeldingRig,
    /// Forge on battery.
    Forge,
    /// Chemistry lab on battery.
    ChemistryLab,
    /// Autoclave on battery.
    Autoclave,
    /// Structural frame; exposes nothing.
    Frame,
}

/// A fuel stored in a vehicle's tanks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Fuel {
    /// Electric charge in the vehicle batteries.
    Battery,
    /// Clean water in the water tanks.
    Water,
    /// Gasoline.
    Gasoline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kinds_order_person_first() {
        let mut kinds = vec![
            SourceKind::Environment,
            SourceKind::Map,
            SourceKind::Bionic,
            SourceKind::Inventory,
        ];
        kinds.sort();
        assert_eq!(kinds.first(), Some(&SourceKind::Inventory));
        assert!(kinds.iter().take(2).all(|k| k.is_on_person()));
    }

    #[test]
    fn pseudo_kinds() {
        assert!(SourceKind::Bionic.is_pseudo());
        assert!(SourceKind::Environment.is_pseudo());
        assert!(!SourceKind::VehicleCargo.is_pseudo());
    }

    #[test]
    fn only_available_is_available() {
        assert!(Availability::Available.is_available());
        assert!(!Availability::Disabled.is_available());
        assert!(!Availability::Unknown.is_available());
    }
}
