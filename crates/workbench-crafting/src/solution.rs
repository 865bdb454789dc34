//! The resolved requirement graph for one requirement set.
//!
//! A [`Solution`] moves through `Init -> Gathered -> Selected -> (Serialized
//! | Consumed)`. Gathering is incremental: each simple requirement that turns
//! out available is checked against the overlapping requirements gathered
//! before it, so every overlapping pair is examined exactly once.

use rust_decimal::Decimal;
use tracing::{debug, info};
use workbench_world::{ItemRegistry, World};

use crate::chooser::Chooser;
use crate::complex::ComplexRequirement;
use crate::error::CraftingError;
use crate::functionality::FunctionalityTable;
use crate::overlap::{OverlapOutcome, link_overlaps, resolve_pair, simple_ref};
use crate::requirement::{RequirementSet, RequirementSpec};
use crate::simple::SimpleRef;
use crate::source::SourceCatalog;

/// Where a solution is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionState {
    /// Built, nothing gathered.
    Init,
    /// Candidates gathered and availability known.
    Gathered,
    /// Every complex requirement carries a selection.
    Selected,
    /// The selection was written to a persisted blob.
    Serialized,
    /// The selection was committed against the world.
    Consumed,
}

/// One requirement set, expanded and resolved.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Tool alternative-sets first, then components, in caller order.
    pub complex_reqs: Vec<ComplexRequirement>,
    /// Alternative-sets whose entries all expanded to nothing usable.
    pub unresolvable: Vec<Vec<RequirementSpec>>,
    /// Worst time multiplier among the selected tools.
    pub tool_time_factor: Decimal,
    state: SolutionState,
    stored: bool,
}

impl Solution {
    /// Expand a requirement set.
    ///
    /// Alternative-sets that are empty as written are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::UnknownItemType`] if any entry names an
    /// unknown type or functionality.
    pub fn init(
        requirements: &RequirementSet,
        registry: &ItemRegistry,
        functions: &mut FunctionalityTable,
    ) -> Result<Self, CraftingError> {
        let mut complex_reqs = Vec::new();
        let mut unresolvable = Vec::new();
        let sets = requirements
            .tools
            .iter()
            .map(|set| (set, true))
            .chain(requirements.components.iter().map(|set| (set, false)));
        for (alternatives, is_tool) in sets {
            if alternatives.is_empty() {
                continue;
            }
            let complex = ComplexRequirement::expand(alternatives, is_tool, registry, functions)?;
            if complex.simple_reqs.is_empty() {
                info!(
                    alternatives = %complex.describe_alternatives(),
                    "Alternative-set expanded to nothing"
                );
                unresolvable.push(alternatives.clone());
            } else {
                complex_reqs.push(complex);
            }
        }
        link_overlaps(&mut complex_reqs);
        debug!(
            complex = complex_reqs.len(),
            unresolvable = unresolvable.len(),
            "Initialised solution"
        );
        Ok(Self {
            complex_reqs,
            unresolvable,
            tool_time_factor: Decimal::ONE,
            state: SolutionState::Init,
            stored: false,
        })
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SolutionState {
        self.state
    }

    pub(crate) const fn set_state(&mut self, state: SolutionState) {
        self.state = state;
    }

    /// Discover candidates and availability, resolving overlaps.
    ///
    /// With `store == false` only availability is kept; candidate lists are
    /// dropped and the solution cannot be selected.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::PhaseViolation`] on a consumed solution.
    pub fn gather(
        &mut self,
        world: &World,
        catalog: &SourceCatalog,
        store: bool,
    ) -> Result<(), CraftingError> {
        if self.state == SolutionState::Consumed {
            return Err(CraftingError::PhaseViolation {
                operation: "gather",
                state: self.state,
            });
        }
        for complex in &mut self.complex_reqs {
            complex.reset();
        }

        for ci in 0..self.complex_reqs.len() {
            let simple_count = self.complex_reqs.get(ci).map_or(0, |c| c.simple_reqs.len());
            for si in 0..simple_count {
                let trigger = SimpleRef::new(ci, si);
                let Some(simple) = self
                    .complex_reqs
                    .get_mut(ci)
                    .and_then(|c| c.simple_reqs.get_mut(si))
                else {
                    continue;
                };
                simple.gather(world, catalog);
                if !simple.is_possible() {
                    continue;
                }
                let earlier: Vec<SimpleRef> = simple
                    .overlaps
                    .iter()
                    .copied()
                    .filter(|p| p.complex < ci)
                    .collect();
                for partner in earlier {
                    let outcome =
                        resolve_pair(&mut self.complex_reqs, trigger, partner, world, catalog);
                    let trigger_lost = match outcome {
                        OverlapOutcome::BothDisabled => true,
                        OverlapOutcome::Disabled(victim) => victim == trigger,
                        OverlapOutcome::NoConflict | OverlapOutcome::Separated => false,
                    };
                    if trigger_lost {
                        break;
                    }
                }
            }
        }

        if !store {
            for simple in self.complex_reqs.iter_mut().flat_map(|c| c.simple_reqs.iter_mut()) {
                simple.candidates.clear();
            }
        }
        self.stored = store;
        self.state = SolutionState::Gathered;
        info!(possible = self.is_possible(), store, "Gathered solution");
        Ok(())
    }

    /// Whether every alternative-set has an available alternative.
    pub fn is_possible(&self) -> bool {
        self.unresolvable.is_empty()
            && self.complex_reqs.iter().all(ComplexRequirement::is_possible)
    }

    /// The unmet alternative-sets, as the caller wrote them.
    pub fn missing(&self) -> Vec<String> {
        self.complex_reqs
            .iter()
            .filter(|c| !c.is_possible())
            .map(ComplexRequirement::describe_alternatives)
            .chain(self.unresolvable.iter().map(|set| {
                set.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" OR ")
            }))
            .collect()
    }

    /// Narrow every complex requirement to one alternative and candidates.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::PhaseViolation`] unless the solution was
    /// gathered with candidates stored, and
    /// [`CraftingError::Unsatisfiable`] if it is not possible.
    pub fn select(
        &mut self,
        world: &World,
        catalog: &SourceCatalog,
        chooser: &mut dyn Chooser,
    ) -> Result<(), CraftingError> {
        if self.state != SolutionState::Gathered || !self.stored {
            return Err(CraftingError::PhaseViolation {
                operation: "select",
                state: self.state,
            });
        }
        if !self.is_possible() {
            return Err(CraftingError::Unsatisfiable {
                missing: self.missing(),
            });
        }
        for complex in &mut self.complex_reqs {
            complex.select(world, catalog, chooser);
        }
        self.refresh_time_factor();
        self.state = SolutionState::Selected;
        info!(tool_time_factor = %self.tool_time_factor, "Selected solution");
        Ok(())
    }

    pub(crate) fn refresh_time_factor(&mut self) {
        self.tool_time_factor = self
            .complex_reqs
            .iter()
            .filter_map(ComplexRequirement::selected_time_modifier)
            .max()
            .unwrap_or(Decimal::ONE);
    }

    /// Borrow a simple requirement by reference.
    pub fn simple(&self, at: SimpleRef) -> Option<&crate::simple::SimpleRequirement> {
        simple_ref(&self.complex_reqs, at)
    }
}

impl core::fmt::Display for Solution {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (ci, complex) in self.complex_reqs.iter().enumerate() {
            let role = if complex.is_tool { "tool" } else { "component" };
            writeln!(f, "{role} #{ci}: {}", complex.describe_alternatives())?;
            let selected = complex.selection.as_ref().map(|s| s.index);
            for (si, simple) in complex.simple_reqs.iter().enumerate() {
                let marker = if selected == Some(si) { '*' } else { ' ' };
                writeln!(
                    f,
                    "  {marker} {simple}: {:?} (player {}, map {})",
                    simple.availability, simple.count_on_player, simple.count_on_map
                )?;
                if !simple.overlaps.is_empty() {
                    let partners: Vec<String> = simple
                        .overlaps
                        .iter()
                        .map(|p| format!("#{}.{}", p.complex, p.simple))
                        .collect();
                    writeln!(f, "      overlaps {}", partners.join(", "))?;
                }
                for candidate in &simple.candidates {
                    writeln!(f, "      found {} at {:?}", candidate.available, candidate.locator)?;
                }
            }
        }
        for set in &self.unresolvable {
            let names: Vec<String> = set.iter().map(ToString::to_string).collect();
            writeln!(f, "unresolvable: {}", names.join(" OR "))?;
        }
        write!(f, "tool time factor: {}", self.tool_time_factor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use workbench_types::{Availability, Item, Point};
    use workbench_world::{GameMap, Player, standard_registry, workshop_world};

    use super::*;
    use crate::chooser::{FirstOption, ScriptedChooser};
    use crate::config::CraftingConfig;

    fn solution(world: &World, reqs: &RequirementSet) -> Solution {
        let mut table = FunctionalityTable::new();
        Solution::init(reqs, &world.registry, &mut table).unwrap()
    }

    #[test]
    fn empty_sets_are_dropped() {
        let world = workshop_world().unwrap();
        let reqs = RequirementSet::new()
            .tool(vec![])
            .component(vec![RequirementSpec::new("nail", 10)]);
        let sol = solution(&world, &reqs);
        assert_eq!(sol.complex_reqs.len(), 1);
        assert!(sol.unresolvable.is_empty());
        assert_eq!(sol.state(), SolutionState::Init);
    }

    #[test]
    fn select_requires_stored_gather() {
        let world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new().component(vec![RequirementSpec::new("nail", 10)]);
        let mut sol = solution(&world, &reqs);
        assert!(matches!(
            sol.select(&world, &catalog, &mut FirstOption),
            Err(CraftingError::PhaseViolation { .. })
        ));
        sol.gather(&world, &catalog, false).unwrap();
        assert!(sol.is_possible());
        assert!(matches!(
            sol.select(&world, &catalog, &mut FirstOption),
            Err(CraftingError::PhaseViolation { .. })
        ));
        sol.gather(&world, &catalog, true).unwrap();
        sol.select(&world, &catalog, &mut FirstOption).unwrap();
        assert_eq!(sol.state(), SolutionState::Selected);
    }

    #[test]
    fn shared_stock_is_split_when_it_suffices() {
        let world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new()
            .component(vec![RequirementSpec::new("nail", 60)])
            .component(vec![RequirementSpec::new("nail", 70)]);
        let mut sol = solution(&world, &reqs);
        sol.gather(&world, &catalog, true).unwrap();
        assert!(sol.is_possible());
        let totals: Vec<i64> = sol
            .complex_reqs
            .iter()
            .filter_map(|c| c.simple_reqs.first())
            .map(|s| s.total())
            .collect();
        assert!(totals.iter().sum::<i64>() <= 140);
        assert!(totals.first().is_some_and(|t| *t >= 60));
        assert!(totals.get(1).is_some_and(|t| *t >= 70));
    }

    #[test]
    fn over_demand_disables_the_later_requirement() {
        let world = workshop_world().unwrap();
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new()
            .component(vec![RequirementSpec::new("nail", 100)])
            .component(vec![RequirementSpec::new("nail", 100)]);
        let mut sol = solution(&world, &reqs);
        sol.gather(&world, &catalog, true).unwrap();
        assert!(!sol.is_possible());
        let states: Vec<Availability> = sol
            .complex_reqs
            .iter()
            .filter_map(|c| c.simple_reqs.first())
            .map(|s| s.availability)
            .collect();
        assert_eq!(states, vec![Availability::Available, Availability::Disabled]);
        assert_eq!(sol.missing(), vec!["nail (100)".to_owned()]);
    }

    fn carrying(items: &[Item]) -> World {
        let mut world =
            World::new(standard_registry(), GameMap::new(), Player::new(Point::new(0, 0)));
        for item in items {
            world.player.inventory.push(vec![item.clone()]);
        }
        world
    }

    fn states(sol: &Solution) -> Vec<Vec<Availability>> {
        sol.complex_reqs
            .iter()
            .map(|c| c.simple_reqs.iter().map(|s| s.availability).collect())
            .collect()
    }

    fn selected_types(sol: &Solution) -> Vec<String> {
        sol.complex_reqs
            .iter()
            .filter_map(ComplexRequirement::selected)
            .map(|s| s.requirement.item_type.to_string())
            .collect()
    }

    #[test]
    fn charge_claim_pushes_amount_claim_to_its_alternative() {
        let world = carrying(&[Item::new("welder").with_charges(40), Item::new("hammer")]);
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new()
            .tool(vec![RequirementSpec::new("welder", -1), RequirementSpec::new("hammer", -1)])
            .tool(vec![RequirementSpec::new("welder", 30)]);
        let mut sol = solution(&world, &reqs);
        sol.gather(&world, &catalog, true).unwrap();

        assert!(sol.is_possible());
        assert!(sol.missing().is_empty());
        // Alternatives are ordered hammer, welder.
        assert_eq!(
            states(&sol),
            vec![
                vec![Availability::Available, Availability::Disabled],
                vec![Availability::Available],
            ]
        );

        let mut chooser = ScriptedChooser::new(vec![]);
        sol.select(&world, &catalog, &mut chooser).unwrap();
        assert!(chooser.prompts.is_empty());
        assert_eq!(selected_types(&sol), vec!["hammer".to_owned(), "welder".to_owned()]);
    }

    #[test]
    fn same_kind_claim_pushes_partner_to_its_alternative() {
        let world = carrying(&[Item::new("saw"), Item::new("hatchet")]);
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new()
            .tool(vec![RequirementSpec::new("saw", -1), RequirementSpec::new("hatchet", -1)])
            .tool(vec![RequirementSpec::new("saw", -1)]);
        let mut sol = solution(&world, &reqs);
        sol.gather(&world, &catalog, true).unwrap();

        assert!(sol.is_possible());
        // Alternatives are ordered hatchet, saw.
        assert_eq!(
            states(&sol),
            vec![
                vec![Availability::Available, Availability::Disabled],
                vec![Availability::Available],
            ]
        );
        sol.select(&world, &catalog, &mut FirstOption).unwrap();
        assert_eq!(selected_types(&sol), vec!["hatchet".to_owned(), "saw".to_owned()]);
    }

    #[test]
    fn partner_without_alternative_keeps_its_claim() {
        let world = carrying(&[Item::new("welder").with_charges(40)]);
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new()
            .tool(vec![RequirementSpec::new("welder", -1)])
            .tool(vec![RequirementSpec::new("welder", 30)]);
        let mut sol = solution(&world, &reqs);
        sol.gather(&world, &catalog, true).unwrap();

        assert!(!sol.is_possible());
        assert_eq!(
            states(&sol),
            vec![vec![Availability::Available], vec![Availability::Disabled]]
        );
        assert_eq!(sol.missing(), vec!["welder (30)".to_owned()]);
    }

    #[test]
    fn time_factor_is_worst_selected_tool() {
        let world = carrying(&[Item::new("rock"), Item::new("saw")]);
        let catalog = SourceCatalog::new(&world, Some(6), &CraftingConfig::default());
        let reqs = RequirementSet::new()
            .tool(vec![RequirementSpec::new("func:hammer", -1)])
            .tool(vec![RequirementSpec::new("func:saw", -1)]);
        let mut sol = solution(&world, &reqs);
        sol.gather(&world, &catalog, true).unwrap();
        sol.select(&world, &catalog, &mut FirstOption).unwrap();
        assert_eq!(sol.tool_time_factor, Decimal::TWO);
        let dump = sol.to_string();
        assert!(dump.contains("* rock x1 for func:hammer"));
        assert!(dump.ends_with("tool time factor: 2"));
    }
}
