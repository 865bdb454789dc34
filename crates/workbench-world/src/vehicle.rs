//! Vehicles: parts, cargo compartments and fuel tanks.
//!
//! A [`Vehicle`] sits at an origin point and owns a list of [`VehiclePart`]s
//! mounted at offsets from that origin. Cargo parts hold items; tool parts
//! (kitchen, welding rig, forge) expose pseudo tools that draw on the
//! vehicle's shared fuel tanks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use workbench_types::{Fuel, Item, PartFunction, Point, VehicleId};

use crate::error::WorldError;

/// One part mounted on a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePart {
    /// Offset from the vehicle origin.
    pub mount: Point,
    /// What the part does.
    #[serde(default)]
    pub functions: Vec<PartFunction>,
    /// Items stored in the part (cargo parts only).
    #[serde(default)]
    pub items: Vec<Item>,
}

impl VehiclePart {
    /// A part with the given functions and no items.
    pub const fn new(mount: Point, functions: Vec<PartFunction>) -> Self {
        Self {
            mount,
            functions,
            items: Vec::new(),
        }
    }

    /// Store items in the part.
    #[must_use]
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Whether the part provides a function.
    pub fn has_function(&self, function: PartFunction) -> bool {
        self.functions.contains(&function)
    }

    /// Whether the part is a cargo compartment.
    pub fn is_cargo(&self) -> bool {
        self.has_function(PartFunction::Cargo)
    }

    /// Borrow a stored item mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SlotOutOfRange`] if there is no such slot.
    pub fn item_mut(&mut self, index: usize) -> Result<&mut Item, WorldError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(WorldError::SlotOutOfRange { index, len })
    }

    /// Remove a stored item and return it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::SlotOutOfRange`] if there is no such slot.
    pub fn remove_item(&mut self, index: usize) -> Result<Item, WorldError> {
        let len = self.items.len();
        if index >= len {
            return Err(WorldError::SlotOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }
}

/// A vehicle on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique id.
    #[serde(default)]
    pub id: VehicleId,
    /// Display name.
    pub name: String,
    /// Map point of mount `(0, 0)`.
    pub origin: Point,
    /// Current speed; only stationary vehicles are reachable for crafting.
    #[serde(default)]
    pub velocity: i32,
    /// Mounted parts.
    #[serde(default)]
    pub parts: Vec<VehiclePart>,
    /// Fuel left per tank type.
    #[serde(default)]
    pub fuel: BTreeMap<Fuel, i64>,
}

impl Vehicle {
    /// A stationary vehicle with no parts and empty tanks.
    pub fn new(name: impl Into<String>, origin: Point) -> Self {
        Self {
            id: VehicleId::new(),
            name: name.into(),
            origin,
            velocity: 0,
            parts: Vec::new(),
            fuel: BTreeMap::new(),
        }
    }

    /// Mount a part.
    #[must_use]
    pub fn with_part(mut self, part: VehiclePart) -> Self {
        self.parts.push(part);
        self
    }

    /// Fill a tank.
    #[must_use]
    pub fn with_fuel(mut self, fuel: Fuel, amount: i64) -> Self {
        self.fuel.insert(fuel, amount.max(0));
        self
    }

    /// Whether the vehicle is standing still.
    pub const fn is_stationary(&self) -> bool {
        self.velocity == 0
    }

    /// Map point of a mount offset.
    pub const fn position_of(&self, mount: Point) -> Point {
        self.origin.offset(mount)
    }

    /// The part mounted at an offset.
    pub fn part_at(&self, mount: Point) -> Option<&VehiclePart> {
        self.parts.iter().find(|p| p.mount == mount)
    }

    /// The part mounted at an offset, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PartNotFound`] if nothing is mounted there.
    pub fn part_at_mut(&mut self, mount: Point) -> Result<&mut VehiclePart, WorldError> {
        let vehicle = self.id;
        self.parts
            .iter_mut()
            .find(|p| p.mount == mount)
            .ok_or(WorldError::PartNotFound { vehicle, mount })
    }

    /// The part covering a map point.
    pub fn part_covering(&self, pos: Point) -> Option<&VehiclePart> {
        self.parts.iter().find(|p| self.position_of(p.mount) == pos)
    }

    /// Fuel left in a tank.
    pub fn fuel_left(&self, fuel: Fuel) -> i64 {
        self.fuel.get(&fuel).copied().unwrap_or(0)
    }

    /// Drain up to `amount` from a tank; returns how much was drained.
    pub fn drain_fuel(&mut self, fuel: Fuel, amount: i64) -> i64 {
        let Some(tank) = self.fuel.get_mut(&fuel) else {
            return 0;
        };
        let drained = amount.clamp(0, *tank);
        *tank = tank.saturating_sub(drained);
        debug!(vehicle = %self.id, ?fuel, drained, left = *tank, "Drained vehicle fuel");
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn van() -> Vehicle {
        Vehicle::new("van", Point::new(10, 10))
            .with_part(VehiclePart::new(Point::new(0, 0), vec![PartFunction::Frame]))
            .with_part(
                VehiclePart::new(Point::new(1, 0), vec![PartFunction::Cargo])
                    .with_items(vec![Item::new("hammer")]),
            )
            .with_fuel(Fuel::Battery, 100)
    }

    #[test]
    fn parts_resolve_by_mount_and_position() {
        let v = van();
        assert!(v.part_at(Point::new(1, 0)).is_some_and(VehiclePart::is_cargo));
        assert!(v.part_covering(Point::new(11, 10)).is_some_and(VehiclePart::is_cargo));
        assert!(v.part_covering(Point::new(12, 10)).is_none());
    }

    #[test]
    fn drain_is_capped_by_tank() {
        let mut v = van();
        assert_eq!(v.drain_fuel(Fuel::Battery, 30), 30);
        assert_eq!(v.fuel_left(Fuel::Battery), 70);
        assert_eq!(v.drain_fuel(Fuel::Battery, 500), 70);
        assert_eq!(v.fuel_left(Fuel::Battery), 0);
        assert_eq!(v.drain_fuel(Fuel::Water, 5), 0);
    }

    #[test]
    fn missing_part_is_an_error() {
        let mut v = van();
        assert!(matches!(
            v.part_at_mut(Point::new(3, 3)),
            Err(WorldError::PartNotFound { .. })
        ));
    }

    #[test]
    fn cargo_slots_are_bounds_checked() {
        let mut v = van();
        let part = v.part_at_mut(Point::new(1, 0));
        assert!(part.is_ok_and(|p| {
            p.item_mut(1).is_err() && p.remove_item(0).is_ok() && p.items.is_empty()
        }));
    }
}
