//! Error types for the `workbench-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use workbench_types::{ItemTypeId, Point, VehicleId};

/// Errors that can occur during storage-domain operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No tile exists at the given point.
    #[error("tile not found: {0}")]
    TileNotFound(Point),

    /// No vehicle with the given id exists.
    #[error("vehicle not found: {0}")]
    VehicleNotFound(VehicleId),

    /// The vehicle has no part mounted at the given offset.
    #[error("vehicle {vehicle} has no part at mount {mount}")]
    PartNotFound {
        /// The vehicle.
        vehicle: VehicleId,
        /// The mount offset.
        mount: Point,
    },

    /// An item slot index was past the end of its container.
    #[error("slot {index} out of range (len {len})")]
    SlotOutOfRange {
        /// The requested index.
        index: usize,
        /// The container length.
        len: usize,
    },

    /// An item references a type the registry does not define.
    #[error("unknown item type: {0}")]
    UnknownItemType(ItemTypeId),

    /// A duplicate item type was registered.
    #[error("duplicate item type: {0}")]
    DuplicateItemType(ItemTypeId),

    /// A duplicate vehicle was placed.
    #[error("duplicate vehicle id: {0}")]
    DuplicateVehicle(VehicleId),

    /// Two vehicles claim the same tile.
    #[error("tile {0} is already occupied by a vehicle")]
    TileOccupied(Point),
}
