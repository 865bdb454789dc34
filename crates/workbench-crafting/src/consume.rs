//! Committing a selection against the world.
//!
//! Each complex requirement is re-validated first: its selected candidates
//! must still cover the need, counting slots destroyed earlier in this batch
//! as empty. A requirement that no longer holds is gathered and selected
//! again on its own; only if that also fails is it reported, and the rest of
//! the batch carries on.
//!
//! Slots are never removed while the batch runs. Destroyed slots are
//! collected and removed in one compaction pass at the end, highest index
//! first, so locators stay valid throughout.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};
use workbench_types::{Availability, Item, RequirementKind};
use workbench_world::{World, WorldError};

use crate::candidate::{Candidate, Locator};
use crate::chooser::Chooser;
use crate::complex::ComplexRequirement;
use crate::error::CraftingError;
use crate::requirement::Requirement;
use crate::source::{Backing, SourceCatalog};
use crate::solution::{Solution, SolutionState};

/// A requirement that could not be consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumeFailure {
    /// Index of the complex requirement.
    pub complex: usize,
    /// The alternative-set as written.
    pub missing: String,
}

/// What a consume pass used up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumeReport {
    /// Component fragments removed from the world.
    pub used_components: Vec<Item>,
    /// Tools used, or the charges drained from them.
    pub used_tools: Vec<Item>,
    /// Requirements that could not be met.
    pub failures: Vec<ConsumeFailure>,
}

impl ConsumeReport {
    /// Whether every requirement was consumed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Solution {
    /// Use the selected candidates, mutating the world.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::PhaseViolation`] unless the solution is
    /// selected or serialized, or [`CraftingError::World`] if a storage
    /// domain rejects a mutation.
    pub fn consume(
        &mut self,
        world: &mut World,
        catalog: &SourceCatalog,
        chooser: &mut dyn Chooser,
    ) -> Result<ConsumeReport, CraftingError> {
        if !matches!(self.state(), SolutionState::Selected | SolutionState::Serialized) {
            return Err(CraftingError::PhaseViolation {
                operation: "consume",
                state: self.state(),
            });
        }
        let mut report = ConsumeReport::default();
        let mut destroyed: BTreeSet<Locator> = BTreeSet::new();

        for (ci, complex) in self.complex_reqs.iter_mut().enumerate() {
            if !selection_holds(complex, world, catalog, &destroyed) {
                let missing = complex.describe_alternatives();
                chooser.notify(&format!("{missing} is no longer available; looking again"));
                warn!(complex = ci, %missing, "Selected items vanished before consume");
                if !reselect(complex, world, catalog, &destroyed, chooser) {
                    chooser.notify(&format!("Could not find {missing}"));
                    report.failures.push(ConsumeFailure { complex: ci, missing });
                    continue;
                }
            }
            let (Some(selection), Some(simple)) = (complex.selection.clone(), complex.selected())
            else {
                continue;
            };
            let mut remaining = simple.requirement.clone();
            let out = if complex.is_tool {
                &mut report.used_tools
            } else {
                &mut report.used_components
            };
            for candidate in &selection.candidates {
                if remaining.is_satisfied() {
                    break;
                }
                let before = remaining.count;
                let mut share = remaining.with_count(candidate.available.min(remaining.count));
                let share_before = share.count;
                if complex.is_tool && remaining.kind == RequirementKind::Amount {
                    if let Some(item) = catalog.resolve(world, &candidate.locator) {
                        out.push(item.into_owned());
                    }
                    share.count = 0;
                } else if use_candidate(world, catalog, candidate, &mut share, out)? {
                    destroyed.insert(candidate.locator.clone());
                }
                let used = share_before.saturating_sub(share.count);
                remaining.count = before.saturating_sub(used);
                debug!(complex = ci, locator = ?candidate.locator, used, "Consumed candidate");
            }
            if !remaining.is_satisfied() {
                let missing = complex.describe_alternatives();
                warn!(complex = ci, short = remaining.count, "Consume fell short");
                chooser.notify(&format!("Not enough {missing}"));
                report.failures.push(ConsumeFailure { complex: ci, missing });
            }
        }

        compact(world, &destroyed)?;
        self.set_state(SolutionState::Consumed);
        info!(
            components = report.used_components.len(),
            tools = report.used_tools.len(),
            failures = report.failures.len(),
            "Consumed solution"
        );
        Ok(report)
    }
}

/// Whether the selected candidates still cover the need.
fn selection_holds(
    complex: &ComplexRequirement,
    world: &World,
    catalog: &SourceCatalog,
    destroyed: &BTreeSet<Locator>,
) -> bool {
    let (Some(selection), Some(simple)) = (&complex.selection, complex.selected()) else {
        return false;
    };
    let covered = selection
        .candidates
        .iter()
        .filter(|c| !destroyed.contains(&c.locator))
        .filter_map(|c| {
            catalog
                .resolve(world, &c.locator)
                .map(|item| c.available.min(simple.requirement.amount_or_charges(&item)))
        })
        .fold(0_i64, i64::saturating_add);
    covered >= simple.requirement.count
}

/// Gather and select one complex requirement again, ignoring destroyed slots.
fn reselect(
    complex: &mut ComplexRequirement,
    world: &World,
    catalog: &SourceCatalog,
    destroyed: &BTreeSet<Locator>,
    chooser: &mut dyn Chooser,
) -> bool {
    complex.reset();
    complex.gather(world, catalog);
    for simple in &mut complex.simple_reqs {
        let kept: Vec<Candidate> = simple
            .candidates
            .iter()
            .filter(|c| !destroyed.contains(&c.locator))
            .cloned()
            .collect();
        simple.set_candidates(kept);
        if simple.is_possible() && !simple.candidates_suffice() {
            simple.availability = Availability::Unavailable;
        }
    }
    if !complex.is_possible() {
        return false;
    }
    complex.select(world, catalog, chooser);
    true
}

/// Use one candidate toward `share`. Returns whether its slot must go.
fn use_candidate(
    world: &mut World,
    catalog: &SourceCatalog,
    candidate: &Candidate,
    share: &mut Requirement,
    used: &mut Vec<Item>,
) -> Result<bool, CraftingError> {
    if let Some(source) = catalog.pseudo_source(&candidate.locator) {
        let mut temp = source.materialize(world);
        let before = temp.charges_or_one();
        share.use_item(&mut temp, &world.registry, used);
        let drained = before.saturating_sub(temp.charges_or_one());
        match &source.backing {
            Backing::BioPower => {
                world.player.drain_power(drained);
            }
            Backing::VehicleFuel { vehicle, fuel } => {
                world.vehicle_mut(*vehicle)?.drain_fuel(*fuel, drained);
            }
            Backing::Fixed(_) => {}
        }
        return Ok(false);
    }

    let World {
        registry,
        map,
        vehicles,
        player,
    } = world;
    let item = match &candidate.locator {
        Locator::Inventory { stack, index } => player.stack_item_mut(*stack, *index)?,
        Locator::Worn { index } => player.worn_item_mut(*index)?,
        Locator::Map { pos, index } => map.item_mut(*pos, *index)?,
        Locator::VehicleCargo {
            vehicle,
            mount,
            index,
        } => vehicles
            .iter_mut()
            .find(|v| v.id == *vehicle)
            .ok_or(WorldError::VehicleNotFound(*vehicle))?
            .part_at_mut(*mount)?
            .item_mut(*index)?,
        Locator::Bionic { .. } | Locator::VehiclePseudo { .. } | Locator::Environment { .. } => {
            return Ok(false);
        }
    };
    Ok(share.use_item(item, registry, used))
}

/// Remove destroyed slots, highest index first, then drop empty stacks.
fn compact(world: &mut World, destroyed: &BTreeSet<Locator>) -> Result<(), CraftingError> {
    for locator in destroyed.iter().rev() {
        match locator {
            Locator::Inventory { stack, index } => {
                world.player.remove_stack_item(*stack, *index)?;
            }
            Locator::Worn { index } => {
                world.player.remove_worn(*index)?;
            }
            Locator::Map { pos, index } => {
                world.map.remove_item(*pos, *index)?;
            }
            Locator::VehicleCargo {
                vehicle,
                mount,
                index,
            } => {
                world
                    .vehicle_mut(*vehicle)?
                    .part_at_mut(*mount)?
                    .remove_item(*index)?;
            }
            Locator::Bionic { .. }
            | Locator::VehiclePseudo { .. }
            | Locator::Environment { .. } => {}
        }
    }
    world.player.remove_empty_stacks();
    debug!(removed = destroyed.len(), "Compacted storage");
    Ok(())
}
