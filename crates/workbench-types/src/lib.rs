//! Shared type definitions for the Workbench crafting inventory.
//!
//! This crate is the single source of truth for the value types that flow
//! between the storage domains (`workbench-world`) and the requirement
//! resolution engine (`workbench-crafting`).
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtypes (item types, vehicles, bionics)
//! - [`enums`] -- Enumeration types (requirement kinds, source kinds,
//!   availability, terrain, vehicle part functions, fuels)
//! - [`structs`] -- Items, item type definitions, functionality entries,
//!   map points

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Availability, Fuel, Furniture, PartFunction, Phase, RequirementKind, SourceKind, Terrain,
};
pub use ids::{BionicId, ItemTypeId, VehicleId};
pub use structs::{ChargeFactor, Functionality, Item, ItemType, Point};
