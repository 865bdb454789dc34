//! Scenario runner for the Workbench crafting inventory.
//!
//! Loads a crafting configuration and a scenario file, then drives the
//! crafting facade without any interactive UI: prompts are answered from
//! the scenario's scripted answers, falling back to the first option.
//!
//! # Usage
//!
//! ```text
//! workbench-runner [SCENARIO] [CONFIG]
//! ```
//!
//! `SCENARIO` defaults to `scenarios/birdhouse.yaml` and `CONFIG` to
//! `workbench-config.yaml`; a missing config file means defaults.
//!
//! # Run Sequence
//!
//! 1. Load configuration
//! 2. Initialize structured logging (tracing)
//! 3. Load the scenario and build its world
//! 4. Check the requirements and report the best tool time factor
//! 5. Select and consume, persisting in between unless told otherwise
//! 6. Log the outcome

mod error;
mod scenario;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use workbench_crafting::{CraftingConfig, CraftingSession, ScriptedChooser};

use crate::error::RunnerError;
use crate::scenario::{Mode, Scenario};

const DEFAULT_SCENARIO: &str = "scenarios/birdhouse.yaml";
const DEFAULT_CONFIG: &str = "workbench-config.yaml";

/// Application entry point for the scenario runner.
///
/// # Errors
///
/// Returns an error if loading fails or the requirements cannot be met.
fn main() -> Result<(), RunnerError> {
    let mut args = std::env::args().skip(1);
    let scenario_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_SCENARIO), PathBuf::from);
    let config_path = args.next().map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);

    // 1. Load configuration.
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %config_path.display(),
        pickup_radius = config.pickup_radius,
        vehicle_rules = config.vehicle_pseudo.len(),
        "workbench-runner starting"
    );

    // 3. Load the scenario.
    let scenario = Scenario::from_file(&scenario_path)?;
    let mut world = scenario.build_world()?;
    info!(
        scenario = scenario.name,
        mode = ?scenario.mode,
        item_types = world.registry.len(),
        vehicles = world.vehicles.len(),
        "Scenario loaded"
    );

    // 4. Check.
    let mut chooser = ScriptedChooser::new(scenario.answers.clone());
    let possible = {
        let mut session = CraftingSession::new(&mut world, config.clone());
        let possible = session.has_all_requirements(&scenario.requirements)?;
        let time_factor = session.compute_time_factor(&scenario.requirements.tools);
        info!(possible, %time_factor, "Requirements checked");
        let solution = session.evaluate(&scenario.requirements, true)?;
        debug!("Solution:\n{solution}");
        if !possible {
            warn!(missing = ?solution.missing(), "Requirements cannot be met");
        }
        possible
    };
    if !possible || scenario.mode == Mode::CheckOnly {
        return Ok(());
    }

    // 5. Select and consume.
    let report = match scenario.mode {
        Mode::Persisted => {
            let blob = {
                let mut session = CraftingSession::new(&mut world, config.clone());
                session.gather_input(&scenario.requirements, &mut chooser)?
            };
            info!(bytes = blob.len(), "Selection persisted");
            debug!(blob, "Persisted selection");
            let mut session = CraftingSession::new(&mut world, config);
            session.resume_and_consume(&scenario.requirements, &blob, &mut chooser)?
        }
        Mode::Immediate | Mode::CheckOnly => {
            let mut session = CraftingSession::new(&mut world, config);
            session.gather_and_consume(&scenario.requirements, &mut chooser)?
        }
    };

    // 6. Log the outcome.
    for item in &report.used_tools {
        info!(item = %item.type_id, charges = ?item.charges, "Used tool");
    }
    for item in &report.used_components {
        info!(item = %item.type_id, charges = ?item.charges, "Used component");
    }
    for failure in &report.failures {
        warn!(complex = failure.complex, missing = failure.missing, "Requirement not consumed");
    }
    info!(
        complete = report.is_complete(),
        prompts = chooser.prompts.len(),
        notices = chooser.notices.len(),
        "Scenario finished"
    );
    Ok(())
}

/// Load the crafting configuration, or defaults if the file is absent.
fn load_config(path: &Path) -> Result<CraftingConfig, RunnerError> {
    if path.exists() {
        Ok(CraftingConfig::from_file(path)?)
    } else {
        Ok(CraftingConfig::default())
    }
}
