//! Persisting a selection across turns.
//!
//! The blob is a JSON array with one entry per complex requirement. Each
//! entry is an array whose first element is the selected simple requirement
//! index and whose remaining elements are the selected candidates. Inventory
//! candidates also carry the length of their stack, so a stack that was
//! split or merged in between is noticed on resume.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use workbench_types::Availability;
use workbench_world::World;

use crate::candidate::{Candidate, Locator, total_available};
use crate::complex::Selection;
use crate::error::CraftingError;
use crate::solution::{Solution, SolutionState};
use crate::source::SourceCatalog;

/// A candidate as written to the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedCandidate {
    #[serde(flatten)]
    candidate: Candidate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stack_len: Option<usize>,
}

fn persist_error(message: impl Into<String>) -> CraftingError {
    CraftingError::Persist {
        message: message.into(),
    }
}

impl Solution {
    /// Write the selection to an opaque blob.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::PhaseViolation`] unless the solution is
    /// selected, or a JSON error.
    pub fn serialize(&mut self, world: &World) -> Result<String, CraftingError> {
        if self.state() != SolutionState::Selected {
            return Err(CraftingError::PhaseViolation {
                operation: "serialize",
                state: self.state(),
            });
        }
        let mut entries = Vec::with_capacity(self.complex_reqs.len());
        for complex in &self.complex_reqs {
            let Some(selection) = &complex.selection else {
                return Err(persist_error("complex requirement without a selection"));
            };
            let mut entry = vec![Value::from(selection.index)];
            for candidate in &selection.candidates {
                let stack_len = match candidate.locator {
                    Locator::Inventory { stack, .. } => world.player.stack_len(stack),
                    _ => None,
                };
                entry.push(serde_json::to_value(PersistedCandidate {
                    candidate: candidate.clone(),
                    stack_len,
                })?);
            }
            entries.push(Value::Array(entry));
        }
        let blob = serde_json::to_string(&entries)?;
        self.set_state(SolutionState::Serialized);
        info!(entries = entries.len(), bytes = blob.len(), "Serialized selection");
        Ok(blob)
    }

    /// Restore a selection from a blob, re-validating every slot against the
    /// current world.
    ///
    /// Returns the indices of complex requirements whose persisted selection
    /// no longer holds; those are left without a selection and are picked
    /// again at consume time.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::PhaseViolation`] if the solution has already
    /// been selected, [`CraftingError::Persist`] if the blob does not match
    /// this solution's shape, or a JSON error.
    pub fn deserialize(
        &mut self,
        blob: &str,
        world: &World,
        catalog: &SourceCatalog,
    ) -> Result<Vec<usize>, CraftingError> {
        if !matches!(self.state(), SolutionState::Init | SolutionState::Gathered) {
            return Err(CraftingError::PhaseViolation {
                operation: "deserialize",
                state: self.state(),
            });
        }
        let entries: Vec<Vec<Value>> = serde_json::from_str(blob)?;
        if entries.len() != self.complex_reqs.len() {
            return Err(persist_error(format!(
                "blob has {} entries for {} requirements",
                entries.len(),
                self.complex_reqs.len()
            )));
        }

        let mut failed = Vec::new();
        for (ci, (complex, entry)) in self.complex_reqs.iter_mut().zip(entries).enumerate() {
            complex.reset();
            let mut values = entry.into_iter();
            let index = values
                .next()
                .and_then(|v| v.as_u64())
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| persist_error(format!("entry {ci} has no index")))?;
            let candidates = values
                .map(serde_json::from_value::<PersistedCandidate>)
                .collect::<Result<Vec<_>, _>>()?;

            let Some(simple) = complex.simple_reqs.get_mut(index) else {
                warn!(complex = ci, index, "Persisted index out of range");
                failed.push(ci);
                continue;
            };
            let still_valid = candidates.iter().all(|p| {
                let Some(item) = catalog.resolve(world, &p.candidate.locator) else {
                    return false;
                };
                let stack_ok = match p.candidate.locator {
                    Locator::Inventory { stack, .. } => {
                        world.player.stack_len(stack) == p.stack_len
                    }
                    _ => true,
                };
                stack_ok && simple.requirement.amount_or_charges(&item) > 0
            });
            let candidates: Vec<Candidate> = candidates.into_iter().map(|p| p.candidate).collect();
            if !still_valid || total_available(&candidates) < simple.requirement.count {
                warn!(complex = ci, requirement = %simple, "Persisted selection no longer holds");
                failed.push(ci);
                continue;
            }
            simple.set_candidates(candidates.clone());
            simple.availability = Availability::Available;
            complex.selection = Some(Selection { index, candidates });
        }

        self.refresh_time_factor();
        self.set_state(SolutionState::Selected);
        info!(failed = failed.len(), "Restored selection");
        Ok(failed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use workbench_world::workshop_world;

    use super::*;
    use crate::chooser::FirstOption;
    use crate::config::CraftingConfig;
    use crate::functionality::FunctionalityTable;
    use crate::requirement::{RequirementSet, RequirementSpec};

    fn selected(world: &World, catalog: &SourceCatalog, reqs: &RequirementSet) -> Solution {
        let mut table = FunctionalityTable::new();
        let mut sol = Solution::init(reqs, &world.registry, &mut table).unwrap();
        sol.gather(world, catalog, true).unwrap();
        sol.select(world, catalog, &mut FirstOption).unwrap();
        sol
    }

    fn fresh(world: &World, reqs: &RequirementSet) -> Solution {
        let mut table = FunctionalityTable::new();
        Solution::init(reqs, &world.registry, &mut table).unwrap()
    }

    fn requirements() -> RequirementSet {
        RequirementSet::new()
            .tool(vec![RequirementSpec::new("hammer", -1)])
            .component(vec![RequirementSpec::new("nail", 50)])
    }

    #[test]
    fn blob_layout_is_index_then_candidates() {
        let world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let mut sol = selected(&world, &catalog, &requirements());
        let blob = sol.serialize(&world).unwrap();
        assert_eq!(sol.state(), SolutionState::Serialized);

        let parsed: Value = serde_json::from_str(&blob).unwrap();
        let hammer = &parsed[0];
        assert_eq!(hammer[0], Value::from(0_u64));
        assert_eq!(hammer[1]["locator"]["source"], Value::from("inventory"));
        assert_eq!(hammer[1]["stack_len"], Value::from(1_u64));
    }

    #[test]
    fn unchanged_world_restores_everything() {
        let world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let mut original = selected(&world, &catalog, &requirements());
        let blob = original.serialize(&world).unwrap();

        let mut restored = fresh(&world, &requirements());
        let failed = restored.deserialize(&blob, &world, &catalog).unwrap();
        assert!(failed.is_empty());
        let originals: Vec<_> = original.complex_reqs.iter().map(|c| c.selection.clone()).collect();
        let restoreds: Vec<_> = restored.complex_reqs.iter().map(|c| c.selection.clone()).collect();
        assert_eq!(originals, restoreds);
    }

    #[test]
    fn vanished_slot_fails_only_its_requirement() {
        let mut world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let mut sol = selected(&world, &catalog, &requirements());
        let blob = sol.serialize(&world).unwrap();

        // The hammer is dropped between turns.
        if let Some(stack) = world.player.inventory.first_mut() {
            stack.clear();
        }
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let mut restored = fresh(&world, &requirements());
        let failed = restored.deserialize(&blob, &world, &catalog).unwrap();
        assert_eq!(failed, vec![0]);
        assert!(restored.complex_reqs.first().is_some_and(|c| c.selection.is_none()));
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let mut sol = fresh(&world, &requirements());
        assert!(matches!(
            sol.deserialize("[[0]]", &world, &catalog),
            Err(CraftingError::Persist { .. })
        ));
        assert!(matches!(
            sol.deserialize("not json", &world, &catalog),
            Err(CraftingError::Json { .. })
        ));
    }
}
