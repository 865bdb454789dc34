//! Error types for the `workbench-crafting` crate.
//!
//! An unsatisfiable requirement set is not an error while checking; it only
//! becomes [`CraftingError::Unsatisfiable`] when a caller asks to commit it.

use workbench_types::ItemTypeId;
use workbench_world::WorldError;

use crate::solution::SolutionState;

/// Errors raised by requirement resolution and consumption.
#[derive(Debug, thiserror::Error)]
pub enum CraftingError {
    /// An alternative names an item type or functionality nobody defines.
    #[error("unknown item type or functionality: {0}")]
    UnknownItemType(ItemTypeId),

    /// A solution operation was called out of order.
    #[error("cannot {operation} a solution in state {state:?}")]
    PhaseViolation {
        /// The attempted operation.
        operation: &'static str,
        /// The state the solution was in.
        state: SolutionState,
    },

    /// The caller asked to commit a requirement set that cannot be met.
    #[error("missing: {}", missing.join("; "))]
    Unsatisfiable {
        /// One line per unmet alternative-set, as written by the caller.
        missing: Vec<String>,
    },

    /// A persisted selection could not be decoded.
    #[error("malformed persisted selection: {message}")]
    Persist {
        /// What was wrong with the blob.
        message: String,
    },

    /// JSON encoding or decoding failed.
    #[error("selection JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A storage domain rejected a mutation.
    #[error("storage error: {source}")]
    World {
        /// The underlying storage error.
        #[from]
        source: WorldError,
    },
}
