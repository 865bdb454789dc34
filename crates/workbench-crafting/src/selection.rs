//! Selection: narrowing a complex requirement to one alternative and the
//! exact candidates to use.
//!
//! Preference order:
//!
//! 1. An environment pseudo item (fire, water) that covers the need alone.
//! 2. For tools, any alternative that needs no charges, taking the lowest
//!    time modifier among them; the chooser is asked only when different
//!    types tie.
//! 3. Otherwise the only possible alternative, or the chooser's pick.
//!
//! Candidates are then taken greedily in catalog order when they are all
//! alike. When they differ, the chooser gets a coarse menu first, and its
//! answer becomes one [`Strategy`] applied to the candidate list.

use rust_decimal::Decimal;
use tracing::{debug, info};
use workbench_types::{RequirementKind, SourceKind};
use workbench_world::World;

use crate::candidate::{Candidate, SourceMask};
use crate::chooser::{Chooser, clamp_choice};
use crate::complex::{ComplexRequirement, Selection};
use crate::simple::SimpleRequirement;
use crate::source::SourceCatalog;

/// How candidates are picked once an alternative is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Take candidates in catalog order until the need is covered.
    UseAll,
    /// Prefer candidates from these sources, then fall back to the rest.
    FilterBySource(SourceMask),
    /// Ask the chooser for each candidate in turn.
    AskItemByItem,
}

impl Strategy {
    /// Pick candidates from `simple` summing exactly to its need, as far as
    /// they go.
    pub fn apply(
        self,
        simple: &SimpleRequirement,
        world: &World,
        catalog: &SourceCatalog,
        chooser: &mut dyn Chooser,
    ) -> Vec<Candidate> {
        let need = simple.requirement.count;
        match self {
            Self::UseAll => take_greedy(simple.candidates.iter(), need),
            Self::FilterBySource(mask) => {
                let preferred = simple.candidates.iter().filter(|c| mask.includes(c.kind()));
                let others = simple.candidates.iter().filter(|c| !mask.includes(c.kind()));
                take_greedy(preferred.chain(others), need)
            }
            Self::AskItemByItem => {
                let name = world.item_name(&simple.requirement.item_type);
                let prompt = format!("Which {name} to use?");
                let mut pool = simple.candidates.clone();
                let mut remaining = need;
                let mut picked = Vec::new();
                while remaining > 0 && !pool.is_empty() {
                    let options: Vec<String> = pool
                        .iter()
                        .map(|c| {
                            let place = catalog.describe(world, &c.locator);
                            format!("{name} ({}) {place}", c.available)
                        })
                        .collect();
                    let choice = clamp_choice(chooser.choose(&prompt, &options), pool.len());
                    let mut candidate = pool.remove(choice);
                    candidate.available = candidate.available.min(remaining);
                    remaining = remaining.saturating_sub(candidate.available);
                    picked.push(candidate);
                }
                picked
            }
        }
    }
}

/// Take candidates in order until `need` is covered, capping the last one.
pub fn take_greedy<'a>(
    candidates: impl Iterator<Item = &'a Candidate>,
    need: i64,
) -> Vec<Candidate> {
    let mut remaining = need;
    let mut picked = Vec::new();
    for candidate in candidates {
        if remaining <= 0 {
            break;
        }
        let mut share = candidate.clone();
        share.available = share.available.min(remaining);
        remaining = remaining.saturating_sub(share.available);
        picked.push(share);
    }
    picked
}

/// Whether the player could not tell the candidates apart.
fn indistinguishable(simple: &SimpleRequirement, world: &World, catalog: &SourceCatalog) -> bool {
    let mut keys = simple.candidates.iter().map(|c| {
        catalog
            .resolve(world, &c.locator)
            .map(|item| (item.type_id.clone(), item.damage, item.charges))
    });
    let Some(first) = keys.next() else {
        return true;
    };
    first.is_some() && keys.all(|k| k == first)
}

fn choose_strategy(
    simple: &SimpleRequirement,
    world: &World,
    catalog: &SourceCatalog,
    chooser: &mut dyn Chooser,
) -> Strategy {
    if simple.candidates.len() <= 1 || indistinguishable(simple, world, catalog) {
        return Strategy::UseAll;
    }
    let need = simple.requirement.count;
    let name = world.item_name(&simple.requirement.item_type);
    let mut menu: Vec<(String, Strategy)> = Vec::new();
    if simple.count_on_player >= need {
        menu.push((
            format!("Use {name} from your inventory ({})", simple.count_on_player),
            Strategy::FilterBySource(SourceMask::PLAYER),
        ));
    }
    if simple.count_on_map >= need {
        menu.push((
            format!("Use {name} from nearby ({})", simple.count_on_map),
            Strategy::FilterBySource(SourceMask::NEARBY),
        ));
    }
    if simple.count_on_player > 0 && simple.count_on_map > 0 {
        menu.push((
            format!("Use {name} from both ({})", simple.total()),
            Strategy::UseAll,
        ));
    }
    menu.push((format!("Choose each {name} yourself"), Strategy::AskItemByItem));

    let labels: Vec<String> = menu.iter().map(|(label, _)| label.clone()).collect();
    let prompt = format!("Where should {name} come from?");
    let choice = clamp_choice(chooser.choose(&prompt, &labels), menu.len());
    let strategy = menu.get(choice).map_or(Strategy::UseAll, |(_, s)| *s);
    debug!(item = %simple.requirement.item_type, ?strategy, "Chooser picked candidate strategy");
    strategy
}

impl ComplexRequirement {
    /// Narrow to one alternative and the candidates to use.
    ///
    /// # Panics
    ///
    /// Panics if no alternative is available; callers must check
    /// [`ComplexRequirement::is_possible`] first.
    pub fn select(&mut self, world: &World, catalog: &SourceCatalog, chooser: &mut dyn Chooser) {
        let possible: Vec<usize> = self
            .simple_reqs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_possible())
            .map(|(i, _)| i)
            .collect();
        assert!(!possible.is_empty(), "selecting a requirement with no available alternative");

        if let Some(selection) = self.free_environment_source(&possible) {
            info!(index = selection.index, "Selected environment source");
            self.selection = Some(selection);
            return;
        }

        let chargeless: Vec<usize> = if self.is_tool {
            possible
                .iter()
                .copied()
                .filter(|i| {
                    self.simple_reqs
                        .get(*i)
                        .is_some_and(|s| s.requirement.kind == RequirementKind::Amount)
                })
                .collect()
        } else {
            Vec::new()
        };
        let chargeless_tool = !chargeless.is_empty();

        let index = if chargeless_tool {
            self.best_tool(&chargeless, world, chooser)
        } else if let [only] = possible.as_slice() {
            *only
        } else {
            let options: Vec<String> = possible
                .iter()
                .filter_map(|i| self.simple_reqs.get(*i))
                .map(|s| {
                    format!(
                        "{} ({} carried, {} nearby)",
                        world.item_name(&s.requirement.item_type),
                        s.count_on_player,
                        s.count_on_map
                    )
                })
                .collect();
            let prompt = format!("Use which of {}?", self.describe_alternatives());
            let choice = clamp_choice(chooser.choose(&prompt, &options), possible.len());
            possible.get(choice).copied().unwrap_or_default()
        };

        let Some(simple) = self.simple_reqs.get(index) else {
            return;
        };
        let strategy = if chargeless_tool {
            Strategy::UseAll
        } else {
            choose_strategy(simple, world, catalog, chooser)
        };
        let candidates = strategy.apply(simple, world, catalog, chooser);
        assert!(
            simple.requirement.count == 0 || !candidates.is_empty(),
            "available requirement selected with no candidates"
        );
        info!(
            requirement = %simple,
            ?strategy,
            candidates = candidates.len(),
            "Selected requirement"
        );
        self.selection = Some(Selection { index, candidates });
    }

    fn free_environment_source(&self, possible: &[usize]) -> Option<Selection> {
        possible.iter().find_map(|&index| {
            let simple = self.simple_reqs.get(index)?;
            let need = simple.requirement.count;
            simple
                .candidates
                .iter()
                .find(|c| c.kind() == SourceKind::Environment && c.available >= need)
                .map(|c| {
                    let mut share = c.clone();
                    share.available = need;
                    Selection {
                        index,
                        candidates: vec![share],
                    }
                })
        })
    }

    fn best_tool(&self, possible: &[usize], world: &World, chooser: &mut dyn Chooser) -> usize {
        let modifier = |i: &usize| {
            self.simple_reqs
                .get(*i)
                .map_or(Decimal::MAX, |s| s.time_modifier)
        };
        let best = possible.iter().map(modifier).min().unwrap_or(Decimal::ONE);
        let tied: Vec<usize> = possible.iter().copied().filter(|i| modifier(i) == best).collect();
        if let [only] = tied.as_slice() {
            return *only;
        }
        let options: Vec<String> = tied
            .iter()
            .filter_map(|i| self.simple_reqs.get(*i))
            .map(|s| world.item_name(&s.requirement.item_type).to_owned())
            .collect();
        let prompt = format!("Which tool for {}?", self.describe_alternatives());
        let choice = clamp_choice(chooser.choose(&prompt, &options), tied.len());
        tied.get(choice).copied().unwrap_or_default()
    }

    /// Time modifier of the selected alternative, if this is a tool.
    pub fn selected_time_modifier(&self) -> Option<Decimal> {
        if !self.is_tool {
            return None;
        }
        self.selected().map(|s| s.time_modifier)
    }
}
