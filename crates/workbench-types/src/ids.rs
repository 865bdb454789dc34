//! Identifier newtypes.
//!
//! Item types and bionics are identified by their string ids as they appear
//! in the game data (`"hammer"`, `"func:welder"`, `"bio_tools_welder"`).
//! Vehicles are runtime entities and get a UUID v7 wrapper so a persisted
//! selection can find the same vehicle again on a later turn.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix marking a virtual functionality type rather than a concrete item.
pub const FUNCTIONALITY_PREFIX: &str = "func:";

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around [`String`] for data-defined ids.
macro_rules! define_name_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a vehicle on the map.
    VehicleId
}

define_name_id! {
    /// Identifier of an item type or of a functionality tag (`func:*`).
    ItemTypeId
}

define_name_id! {
    /// Identifier of an installed bionic (`bio_tools_welder`).
    BionicId
}

impl ItemTypeId {
    /// Whether this id names a virtual functionality rather than a concrete
    /// item type.
    pub fn is_functionality(&self) -> bool {
        self.0.starts_with(FUNCTIONALITY_PREFIX)
    }
}
