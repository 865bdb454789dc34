//! Storage domains for the Workbench crafting inventory.
//!
//! This crate models every place a crafting requirement may be satisfied
//! from: the player (carried stacks, worn items, bionics, bio-power), the map
//! tiles around them (ground items, fire, water), and vehicles (cargo
//! compartments, tool parts, fuel tanks). Each domain owns its own mutation
//! primitives; the resolution engine in `workbench-crafting` only reads
//! through them and calls them back at commit time.
//!
//! # Modules
//!
//! - [`error`] -- Error types for storage operations.
//! - [`registry`] -- [`ItemRegistry`]: item type definitions and
//!   functionality providers.
//! - [`map`] -- [`GameMap`] and [`Tile`]: ground items and terrain features.
//! - [`vehicle`] -- [`Vehicle`] parts, cargo and fuel.
//! - [`player`] -- [`Player`] stacks, worn items, bionics and power.
//! - [`world`] -- [`World`]: all domains bundled for one evaluation.
//! - [`sample`] -- Standard item registry and world builders.
//!
//! [`ItemRegistry`]: registry::ItemRegistry
//! [`GameMap`]: map::GameMap
//! [`Tile`]: map::Tile
//! [`Vehicle`]: vehicle::Vehicle
//! [`Player`]: player::Player
//! [`World`]: world::World

pub mod error;
pub mod map;
pub mod player;
pub mod registry;
pub mod sample;
pub mod vehicle;
pub mod world;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use map::{GameMap, Tile};
pub use player::{Bionic, Player};
pub use registry::ItemRegistry;
pub use sample::{standard_registry, workshop_world};
pub use vehicle::{Vehicle, VehiclePart};
pub use world::World;
