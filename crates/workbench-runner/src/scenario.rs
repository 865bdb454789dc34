//! Scenario files: a world, a requirement set and scripted answers.
//!
//! A scenario without a `world` section runs against the sample workshop.
//! A world without item types gets the standard registry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use workbench_crafting::RequirementSet;
use workbench_world::{World, standard_registry, workshop_world};

use crate::error::RunnerError;

/// How the runner drives the facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Select, persist, then resume from the blob.
    #[default]
    Persisted,
    /// Select and consume in one go.
    Immediate,
    /// Only check whether the requirements could be met.
    CheckOnly,
}

/// One scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// The world to craft in.
    #[serde(default)]
    pub world: Option<World>,
    /// What the recipe needs.
    pub requirements: RequirementSet,
    /// Answers fed to the chooser, in order.
    #[serde(default)]
    pub answers: Vec<usize>,
    /// How to drive the facade.
    #[serde(default)]
    pub mode: Mode,
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, RunnerError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RunnerError::ScenarioIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse a scenario from YAML; `origin` is used in error messages.
    pub fn parse(yaml: &str, origin: &Path) -> Result<Self, RunnerError> {
        serde_yml::from_str(yaml).map_err(|e| RunnerError::ScenarioParse {
            path: origin.display().to_string(),
            message: format!("{e}"),
        })
    }

    /// Build and validate the scenario's world.
    pub fn build_world(&self) -> Result<World, RunnerError> {
        let mut world = match &self.world {
            Some(world) => world.clone(),
            None => workshop_world()?,
        };
        if world.registry.is_empty() {
            world.registry = standard_registry();
        }
        world.validate()?;
        Ok(world)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn minimal_scenario_uses_workshop() {
        let yaml = r#"
name: birdhouse
requirements:
  tools:
    - - { type: "func:hammer", count: -1 }
  components:
    - - { type: "2x4", count: 2 }
    - - { type: nail, count: 20 }
"#;
        let scenario = Scenario::parse(yaml, Path::new("inline")).unwrap();
        assert_eq!(scenario.mode, Mode::Persisted);
        assert_eq!(scenario.requirements.components.len(), 2);
        let world = scenario.build_world().unwrap();
        assert!(!world.vehicles.is_empty());
    }

    #[test]
    fn inline_world_gets_standard_registry() {
        let yaml = r"
name: patch
mode: immediate
world:
  player:
    inventory:
      - - { type_id: rag }
requirements:
  components:
    - - { type: rag, count: 1 }
";
        let scenario = Scenario::parse(yaml, Path::new("inline")).unwrap();
        assert_eq!(scenario.mode, Mode::Immediate);
        let world = scenario.build_world().unwrap();
        assert!(!world.registry.is_empty());
        assert_eq!(world.player.inventory.len(), 1);
    }

    #[test]
    fn unknown_items_fail_validation() {
        let yaml = r"
name: broken
world:
  player:
    inventory:
      - - { type_id: anvil }
requirements: {}
";
        let scenario = Scenario::parse(yaml, Path::new("inline")).unwrap();
        assert!(matches!(scenario.build_world(), Err(RunnerError::World { .. })));
    }
}
