//! Configuration for the crafting inventory.
//!
//! Every field has a default, so an empty YAML document yields the standard
//! configuration: a six tile pickup radius, fire and water from the
//! surroundings, `bio_tools_*` bionics exposing `toolset_*` pseudo tools, and
//! the usual vehicle workshop parts running on the vehicle battery.

use std::path::Path;

use serde::{Deserialize, Serialize};
use workbench_types::{Fuel, ItemTypeId, PartFunction};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level crafting inventory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingConfig {
    /// Tile radius searched for ground items, vehicles and environment
    /// features.
    #[serde(default = "default_pickup_radius")]
    pub pickup_radius: u32,

    /// Pseudo items offered by the surroundings.
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Pseudo tools offered by installed bionics.
    #[serde(default)]
    pub bionics: BionicConfig,

    /// Pseudo items offered by vehicle parts.
    #[serde(default = "default_vehicle_pseudo")]
    pub vehicle_pseudo: Vec<VehiclePseudoRule>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            pickup_radius: default_pickup_radius(),
            environment: EnvironmentConfig::default(),
            bionics: BionicConfig::default(),
            vehicle_pseudo: default_vehicle_pseudo(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CraftingConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Pseudo items a vehicle part function exposes.
    pub fn pseudo_items_for(
        &self,
        function: PartFunction,
    ) -> impl Iterator<Item = &VehiclePseudoRule> {
        self.vehicle_pseudo
            .iter()
            .filter(move |rule| rule.function == function)
    }
}

/// Environment pseudo item settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Pseudo item id for a nearby fire or lava.
    #[serde(default = "default_fire_item")]
    pub fire_item: ItemTypeId,

    /// Charges a fire offers.
    #[serde(default = "default_fire_charges")]
    pub fire_charges: i64,

    /// Pseudo item id for a nearby water source.
    #[serde(default = "default_water_item")]
    pub water_item: ItemTypeId,

    /// Charges a water source offers.
    #[serde(default = "default_water_charges")]
    pub water_charges: i64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            fire_item: default_fire_item(),
            fire_charges: default_fire_charges(),
            water_item: default_water_item(),
            water_charges: default_water_charges(),
        }
    }
}

/// Bionic pseudo tool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BionicConfig {
    /// Prefix of bionic ids that expose a tool.
    #[serde(default = "default_bionic_prefix")]
    pub bionic_prefix: String,

    /// Prefix of the pseudo tool id replacing the bionic prefix.
    #[serde(default = "default_pseudo_prefix")]
    pub pseudo_prefix: String,
}

impl Default for BionicConfig {
    fn default() -> Self {
        Self {
            bionic_prefix: default_bionic_prefix(),
            pseudo_prefix: default_pseudo_prefix(),
        }
    }
}

impl BionicConfig {
    /// Pseudo tool id for a bionic, or `None` if the bionic exposes no tool.
    pub fn pseudo_for(&self, bionic: &str) -> Option<ItemTypeId> {
        bionic
            .strip_prefix(self.bionic_prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .map(|rest| ItemTypeId::new(format!("{}{rest}", self.pseudo_prefix)))
    }
}

/// One pseudo item exposed by a vehicle part function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePseudoRule {
    /// The part function.
    pub function: PartFunction,
    /// The pseudo item exposed.
    pub item: ItemTypeId,
    /// The tank whose contents become the pseudo item's charges.
    pub fuel: Fuel,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_pickup_radius() -> u32 {
    6
}

fn default_fire_item() -> ItemTypeId {
    ItemTypeId::from("fire")
}

const fn default_fire_charges() -> i64 {
    1
}

fn default_water_item() -> ItemTypeId {
    ItemTypeId::from("water")
}

const fn default_water_charges() -> i64 {
    50
}

fn default_bionic_prefix() -> String {
    "bio_tools_".to_owned()
}

fn default_pseudo_prefix() -> String {
    "toolset_".to_owned()
}

fn default_vehicle_pseudo() -> Vec<VehiclePseudoRule> {
    let rule = |function, item: &str, fuel| VehiclePseudoRule {
        function,
        item: ItemTypeId::from(item),
        fuel,
    };
    vec![
        rule(PartFunction::Kitchen, "installed_kitchen_unit", Fuel::Battery),
        rule(PartFunction::Kitchen, "water_clean", Fuel::Water),
        rule(PartFunction::WeldingRig, "welding_rig", Fuel::Battery),
        rule(PartFunction::Forge, "forge", Fuel::Battery),
        rule(PartFunction::ChemistryLab, "chemistry_set", Fuel::Battery),
        rule(PartFunction::Autoclave, "autoclave", Fuel::Battery),
    ]
}

fn default_log_level() -> String {
    "info".to_owned()
}
