//! All storage domains bundled for one crafting evaluation.

use serde::{Deserialize, Serialize};
use tracing::info;
use workbench_types::{Item, ItemTypeId, Point, VehicleId};

use crate::error::WorldError;
use crate::map::GameMap;
use crate::player::Player;
use crate::registry::ItemRegistry;
use crate::vehicle::{Vehicle, VehiclePart};

/// The registry, the map, the vehicles on it and the player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    /// Item type definitions.
    #[serde(default)]
    pub registry: ItemRegistry,
    /// Map tiles.
    #[serde(default)]
    pub map: GameMap,
    /// Vehicles on the map.
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    /// The crafting player.
    #[serde(default)]
    pub player: Player,
}

impl World {
    /// A world with no vehicles.
    pub const fn new(registry: ItemRegistry, map: GameMap, player: Player) -> Self {
        Self {
            registry,
            map,
            vehicles: Vec::new(),
            player,
        }
    }

    /// Place a vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateVehicle`] if the id is taken, or
    /// [`WorldError::TileOccupied`] if one of its parts overlaps another
    /// vehicle.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<(), WorldError> {
        if self.vehicles.iter().any(|v| v.id == vehicle.id) {
            return Err(WorldError::DuplicateVehicle(vehicle.id));
        }
        for part in &vehicle.parts {
            let pos = vehicle.position_of(part.mount);
            if self.vehicle_part_at(pos).is_some() {
                return Err(WorldError::TileOccupied(pos));
            }
        }
        info!(
            vehicle = %vehicle.id,
            name = %vehicle.name,
            origin = %vehicle.origin,
            "Placed vehicle"
        );
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Look up a vehicle.
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Look up a vehicle mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::VehicleNotFound`] if no such vehicle exists.
    pub fn vehicle_mut(&mut self, id: VehicleId) -> Result<&mut Vehicle, WorldError> {
        self.vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(WorldError::VehicleNotFound(id))
    }

    /// The vehicle part covering a map point.
    pub fn vehicle_part_at(&self, pos: Point) -> Option<(&Vehicle, &VehiclePart)> {
        self.vehicles
            .iter()
            .find_map(|v| v.part_covering(pos).map(|part| (v, part)))
    }

    /// Check that every item anywhere in the world has a registered type.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownItemType`] naming the first unknown type.
    pub fn validate(&self) -> Result<(), WorldError> {
        let carried = self.player.inventory.iter().flatten();
        let worn = self.player.worn.iter();
        let ground = self.map.iter().flat_map(|t| t.items.iter());
        let cargo = self
            .vehicles
            .iter()
            .flat_map(|v| v.parts.iter())
            .flat_map(|p| p.items.iter());
        for item in carried.chain(worn).chain(ground).chain(cargo) {
            self.validate_item(item)?;
        }
        Ok(())
    }

    fn validate_item(&self, item: &Item) -> Result<(), WorldError> {
        if self.registry.get(&item.type_id).is_none() {
            return Err(WorldError::UnknownItemType(item.type_id.clone()));
        }
        item.contents
            .iter()
            .try_for_each(|inner| self.validate_item(inner))
    }

    /// Display name of a type.
    pub fn item_name<'a>(&'a self, id: &'a ItemTypeId) -> &'a str {
        self.registry.name(id)
    }
}
