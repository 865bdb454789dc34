//! Simple requirements: one concrete requirement and what was found for it.

use rust_decimal::Decimal;
use tracing::debug;
use workbench_types::{Availability, ItemTypeId};
use workbench_world::World;

use crate::candidate::{Candidate, SourceMask, split_counts, total_available};
use crate::requirement::Requirement;
use crate::source::SourceCatalog;

/// Position of a simple requirement inside a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleRef {
    /// Index of the complex requirement.
    pub complex: usize,
    /// Index of the simple requirement inside it.
    pub simple: usize,
}

impl SimpleRef {
    /// Create a reference.
    pub const fn new(complex: usize, simple: usize) -> Self {
        Self { complex, simple }
    }
}

/// One concrete requirement derived from an alternative, with its candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRequirement {
    /// The concrete need.
    pub requirement: Requirement,
    /// The id the caller wrote (a functionality tag or the type itself).
    pub origin: ItemTypeId,
    /// Activity time multiplier when this alternative is used as a tool.
    pub time_modifier: Decimal,
    /// Candidates found at gather time.
    pub candidates: Vec<Candidate>,
    /// Units or charges found around the player.
    pub count_on_map: i64,
    /// Units or charges found on the player.
    pub count_on_player: i64,
    /// Result of gathering and overlap resolution.
    pub availability: Availability,
    /// Other simple requirements drawing on the same item type.
    pub overlaps: Vec<SimpleRef>,
}

impl SimpleRequirement {
    /// A simple requirement that has not been gathered yet.
    pub const fn new(requirement: Requirement, origin: ItemTypeId, time_modifier: Decimal) -> Self {
        Self {
            requirement,
            origin,
            time_modifier,
            candidates: Vec::new(),
            count_on_map: 0,
            count_on_player: 0,
            availability: Availability::Unknown,
            overlaps: Vec::new(),
        }
    }

    /// Look up every candidate and compute availability.
    pub fn gather(&mut self, world: &World, catalog: &SourceCatalog) {
        let (_, candidates) =
            catalog.collect_candidates(world, &self.requirement, SourceMask::ALL);
        self.set_candidates(candidates);
        self.availability = if self.total() >= self.requirement.count {
            Availability::Available
        } else {
            Availability::Unavailable
        };
        debug!(
            requirement = %self.requirement,
            on_player = self.count_on_player,
            on_map = self.count_on_map,
            availability = ?self.availability,
            "Gathered simple requirement"
        );
    }

    /// Replace the candidate list and recompute the counts.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        let (player, map) = split_counts(&candidates);
        self.count_on_player = player;
        self.count_on_map = map;
        self.candidates = candidates;
    }

    /// Mark as claimed by an overlapping requirement.
    pub fn disable(&mut self) {
        self.availability = Availability::Disabled;
        self.candidates.clear();
    }

    /// Forget gathered state, keeping overlap links.
    pub fn reset(&mut self) {
        self.availability = Availability::Unknown;
        self.candidates.clear();
        self.count_on_map = 0;
        self.count_on_player = 0;
    }

    /// Whether the requirement can be selected.
    pub const fn is_possible(&self) -> bool {
        self.availability.is_available()
    }

    /// Everything found, on the player and around.
    pub const fn total(&self) -> i64 {
        self.count_on_map.saturating_add(self.count_on_player)
    }

    /// Whether the candidates alone cover the requirement.
    pub fn candidates_suffice(&self) -> bool {
        total_available(&self.candidates) >= self.requirement.count
    }

    /// Whether this could still be satisfied if nothing else claimed its
    /// items.
    pub fn could_be_possible(&self, world: &World, catalog: &SourceCatalog) -> bool {
        match self.availability {
            Availability::Available => true,
            Availability::Unavailable | Availability::Disabled => false,
            Availability::Unknown => {
                let need = self.requirement.count;
                catalog.count(world, &self.requirement, SourceMask::ALL, Some(need)) >= need
            }
        }
    }
}

impl core::fmt::Display for SimpleRequirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.requirement)?;
        if self.origin != self.requirement.item_type {
            write!(f, " for {}", self.origin)?;
        }
        Ok(())
    }
}
