//! The crafting facade.
//!
//! A [`CraftingSession`] borrows the world for one turn, builds the source
//! catalog once, and drives [`Solution`]s through their lifecycle:
//!
//! - [`CraftingSession::has_all_requirements`]: gather without storing.
//! - [`CraftingSession::gather_input`]: gather, select, serialize.
//! - [`CraftingSession::resume_and_consume`]: deserialize a blob from an
//!   earlier turn and consume it.
//! - [`CraftingSession::gather_and_consume`]: the straight-through path.

use rust_decimal::Decimal;
use tracing::{info, warn};
use workbench_types::{Item, ItemTypeId};
use workbench_world::World;

use crate::chooser::Chooser;
use crate::config::CraftingConfig;
use crate::consume::ConsumeReport;
use crate::error::CraftingError;
use crate::functionality::FunctionalityTable;
use crate::requirement::{RequirementSet, RequirementSpec};
use crate::solution::Solution;
use crate::source::SourceCatalog;

/// One turn's worth of crafting against a world.
#[derive(Debug)]
pub struct CraftingSession<'w> {
    world: &'w mut World,
    catalog: SourceCatalog,
    functions: FunctionalityTable,
    config: CraftingConfig,
}

impl<'w> CraftingSession<'w> {
    /// A session searching everything within the configured pickup radius.
    pub fn new(world: &'w mut World, config: CraftingConfig) -> Self {
        let catalog = SourceCatalog::new(world, Some(config.pickup_radius), &config);
        Self {
            world,
            catalog,
            functions: FunctionalityTable::new(),
            config,
        }
    }

    /// A session limited to the player's own possessions and bionics.
    pub fn without_surroundings(world: &'w mut World, config: CraftingConfig) -> Self {
        let catalog = SourceCatalog::new(world, None, &config);
        Self {
            world,
            catalog,
            functions: FunctionalityTable::new(),
            config,
        }
    }

    /// The sources in reach.
    pub const fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// The world as it currently stands.
    pub fn world(&self) -> &World {
        self.world
    }

    /// The configuration the session was built with.
    pub const fn config(&self) -> &CraftingConfig {
        &self.config
    }

    /// Expand and gather a requirement set.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::UnknownItemType`] for unknown ids.
    pub fn evaluate(
        &mut self,
        requirements: &RequirementSet,
        store: bool,
    ) -> Result<Solution, CraftingError> {
        let mut solution =
            Solution::init(requirements, &self.world.registry, &mut self.functions)?;
        solution.gather(self.world, &self.catalog, store)?;
        Ok(solution)
    }

    /// Whether the requirement set could be met right now.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::UnknownItemType`] for unknown ids.
    pub fn has_all_requirements(
        &mut self,
        requirements: &RequirementSet,
    ) -> Result<bool, CraftingError> {
        Ok(self.evaluate(requirements, false)?.is_possible())
    }

    /// Whether `batch` crafts' worth of the requirement set could be met.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::UnknownItemType`] for unknown ids.
    pub fn has_all_requirements_batch(
        &mut self,
        requirements: &RequirementSet,
        batch: u32,
    ) -> Result<bool, CraftingError> {
        self.has_all_requirements(&requirements.scaled(batch))
    }

    /// Gather and select, returning the persisted selection.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::Unsatisfiable`] listing what is missing, or
    /// [`CraftingError::UnknownItemType`] for unknown ids.
    pub fn gather_input(
        &mut self,
        requirements: &RequirementSet,
        chooser: &mut dyn Chooser,
    ) -> Result<String, CraftingError> {
        let mut solution = self.evaluate(requirements, true)?;
        solution.select(self.world, &self.catalog, chooser)?;
        solution.serialize(self.world)
    }

    /// [`CraftingSession::gather_input`] for `batch` crafts at once.
    ///
    /// # Errors
    ///
    /// As [`CraftingSession::gather_input`].
    pub fn gather_input_batch(
        &mut self,
        requirements: &RequirementSet,
        batch: u32,
        chooser: &mut dyn Chooser,
    ) -> Result<String, CraftingError> {
        self.gather_input(&requirements.scaled(batch), chooser)
    }

    /// Consume a selection persisted by [`CraftingSession::gather_input`],
    /// possibly on an earlier turn.
    ///
    /// Requirements whose persisted items vanished are picked again; those
    /// that cannot be met any more are listed in the report.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::Persist`] or a JSON error for a malformed
    /// blob, or [`CraftingError::World`] if a mutation fails.
    pub fn resume_and_consume(
        &mut self,
        requirements: &RequirementSet,
        blob: &str,
        chooser: &mut dyn Chooser,
    ) -> Result<ConsumeReport, CraftingError> {
        let mut solution =
            Solution::init(requirements, &self.world.registry, &mut self.functions)?;
        let failed = solution.deserialize(blob, self.world, &self.catalog)?;
        if !failed.is_empty() {
            warn!(?failed, "Some persisted selections must be picked again");
        }
        solution.consume(self.world, &self.catalog, chooser)
    }

    /// [`CraftingSession::resume_and_consume`] for a blob persisted by
    /// [`CraftingSession::gather_input_batch`] with the same `batch`.
    ///
    /// # Errors
    ///
    /// As [`CraftingSession::resume_and_consume`].
    pub fn resume_and_consume_batch(
        &mut self,
        requirements: &RequirementSet,
        batch: u32,
        blob: &str,
        chooser: &mut dyn Chooser,
    ) -> Result<ConsumeReport, CraftingError> {
        self.resume_and_consume(&requirements.scaled(batch), blob, chooser)
    }

    /// Gather, select and consume in one go.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::Unsatisfiable`] listing what is missing, or
    /// [`CraftingError::World`] if a mutation fails.
    pub fn gather_and_consume(
        &mut self,
        requirements: &RequirementSet,
        chooser: &mut dyn Chooser,
    ) -> Result<ConsumeReport, CraftingError> {
        let mut solution = self.evaluate(requirements, true)?;
        solution.select(self.world, &self.catalog, chooser)?;
        let report = solution.consume(self.world, &self.catalog, chooser)?;
        info!(complete = report.is_complete(), "Crafting inputs consumed");
        Ok(report)
    }

    /// Consume `count` of a single component type.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::Unsatisfiable`] if not enough is in reach.
    pub fn consume_items(
        &mut self,
        item_type: impl Into<ItemTypeId>,
        count: i64,
        chooser: &mut dyn Chooser,
    ) -> Result<Vec<Item>, CraftingError> {
        let requirements =
            RequirementSet::new().component(vec![RequirementSpec::new(item_type, count)]);
        Ok(self.gather_and_consume(&requirements, chooser)?.used_components)
    }

    /// Use a single tool type, draining `charges` if positive.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::Unsatisfiable`] if no such tool is in reach.
    pub fn consume_tools(
        &mut self,
        item_type: impl Into<ItemTypeId>,
        charges: i64,
        chooser: &mut dyn Chooser,
    ) -> Result<Vec<Item>, CraftingError> {
        let requirements =
            RequirementSet::new().tool(vec![RequirementSpec::new(item_type, charges)]);
        Ok(self.gather_and_consume(&requirements, chooser)?.used_tools)
    }

    /// Best reachable time factor for a tool list, before any selection.
    pub fn compute_time_factor(&mut self, tools: &[Vec<RequirementSpec>]) -> Decimal {
        self.catalog
            .compute_time_factor(self.world, tools, &mut self.functions)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use workbench_types::Fuel;
    use workbench_world::workshop_world;

    use super::*;
    use crate::chooser::FirstOption;

    fn birdhouse() -> RequirementSet {
        RequirementSet::new()
            .tool(vec![RequirementSpec::new("func:hammer", -1)])
            .component(vec![RequirementSpec::new("2x4", 2)])
            .component(vec![RequirementSpec::new("nail", 20)])
    }

    #[test]
    fn checking_does_not_mutate() {
        let mut world = workshop_world().unwrap();
        let before = world.clone();
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        assert!(session.has_all_requirements(&birdhouse()).unwrap());
        assert!(session.has_all_requirements(&birdhouse()).unwrap());
        assert_eq!(session.world().player, before.player);
        assert_eq!(session.world().map, before.map);
    }

    #[test]
    fn straight_through_consumes() {
        let mut world = workshop_world().unwrap();
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        let report = session.gather_and_consume(&birdhouse(), &mut FirstOption).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.used_tools, vec![Item::new("hammer")]);
        assert_eq!(report.used_components.len(), 3);
    }

    #[test]
    fn persisted_selection_resumes_later() {
        let mut world = workshop_world().unwrap();
        let blob = {
            let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
            session.gather_input(&birdhouse(), &mut FirstOption).unwrap()
        };
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        let report = session
            .resume_and_consume(&birdhouse(), &blob, &mut FirstOption)
            .unwrap();
        assert!(report.is_complete());
        assert_eq!(report.used_components.len(), 3);
    }

    #[test]
    fn unsatisfiable_input_lists_missing() {
        let mut world = workshop_world().unwrap();
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        let reqs = RequirementSet::new().tool(vec![RequirementSpec::new("func:saw", -1)]);
        let err = session.gather_input(&reqs, &mut FirstOption).unwrap_err();
        assert_eq!(err.to_string(), "missing: func:saw");
    }

    #[test]
    fn single_type_shortcuts() {
        let mut world = workshop_world().unwrap();
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        let nails = session.consume_items("nail", 30, &mut FirstOption).unwrap();
        assert_eq!(nails.iter().filter_map(|i| i.charges).sum::<i64>(), 30);
        let welds = session.consume_tools("welding_rig", 25, &mut FirstOption).unwrap();
        assert_eq!(welds, vec![Item::new("welding_rig").with_charges(25)]);
        let truck = session.world().vehicles.first().map(|v| v.fuel_left(Fuel::Battery));
        assert_eq!(truck, Some(125));
    }

    #[test]
    fn own_possessions_only() {
        let mut world = workshop_world().unwrap();
        let mut session =
            CraftingSession::without_surroundings(&mut world, CraftingConfig::default());
        let planks = RequirementSet::new().component(vec![RequirementSpec::new("2x4", 1)]);
        assert!(!session.has_all_requirements(&planks).unwrap());
        let weld = RequirementSet::new().tool(vec![RequirementSpec::new("func:welder", 20)]);
        assert!(session.has_all_requirements(&weld).unwrap());
    }

    #[test]
    fn batches_scale_positive_counts() {
        let mut world = workshop_world().unwrap();
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        // Five planks in reach: two birdhouses fit, three do not.
        assert!(session.has_all_requirements_batch(&birdhouse(), 2).unwrap());
        assert!(!session.has_all_requirements_batch(&birdhouse(), 3).unwrap());

        let blob = session
            .gather_input_batch(&birdhouse(), 2, &mut FirstOption)
            .unwrap();
        let report = session
            .resume_and_consume_batch(&birdhouse(), 2, &blob, &mut FirstOption)
            .unwrap();
        assert!(report.is_complete());
        assert_eq!(report.used_tools, vec![Item::new("hammer")]);
        let planks = report
            .used_components
            .iter()
            .filter(|i| i.type_id.as_str() == "2x4")
            .count();
        let nails: i64 = report.used_components.iter().filter_map(|i| i.charges).sum();
        assert_eq!(planks, 4);
        assert_eq!(nails, 40);
    }

    #[test]
    fn time_factor_before_selection() {
        let mut world = workshop_world().unwrap();
        let mut session = CraftingSession::new(&mut world, CraftingConfig::default());
        let tools = vec![vec![RequirementSpec::new("func:hammer", -1)]];
        assert_eq!(session.compute_time_factor(&tools), dec!(1));
    }
}
