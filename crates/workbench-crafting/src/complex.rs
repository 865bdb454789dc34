//! Complex requirements: one caller alternative-set, expanded.
//!
//! Expansion turns every entry of the set into concrete [`Requirement`]s.
//! Functionality tags become one simple requirement per providing type, each
//! converted by that type's charge factor. A concrete type that shows up
//! twice with the same counting discipline is merged into the larger count,
//! and a type named explicitly takes over from a functionality tag; the same
//! type counted both ways stays as two alternatives.
//!
//! Alternatives are ordered amount first, then by ascending count, then by
//! type. That order decides which alternative is found first.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tracing::debug;
use workbench_types::{ItemTypeId, RequirementKind};
use workbench_world::{ItemRegistry, World};

use crate::candidate::Candidate;
use crate::error::CraftingError;
use crate::functionality::FunctionalityTable;
use crate::requirement::{Requirement, RequirementSpec};
use crate::simple::SimpleRequirement;
use crate::source::SourceCatalog;

/// The narrowed choice of a complex requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index of the chosen simple requirement.
    pub index: usize,
    /// The candidates to use, summing exactly to the need.
    pub candidates: Vec<Candidate>,
}

/// One alternative-set, expanded into concrete simple requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexRequirement {
    /// Concrete alternatives, never empty once built.
    pub simple_reqs: Vec<SimpleRequirement>,
    /// Whether this is a tool (not consumed by amount) or a component.
    pub is_tool: bool,
    /// The alternative-set as the caller wrote it.
    pub alternatives: Vec<RequirementSpec>,
    /// The choice made by selection or restored from a persisted blob.
    pub selection: Option<Selection>,
}

/// Tools: non-positive counts mean one unit, positive counts charges.
const fn tool_request(count: i64) -> (RequirementKind, i64) {
    if count <= 0 {
        (RequirementKind::Amount, 1)
    } else {
        (RequirementKind::Charges, count)
    }
}

/// Components: charges only for positive counts of count-by-charges types.
const fn component_request(count: i64, count_by_charges: bool) -> (RequirementKind, i64) {
    if count > 0 && count_by_charges {
        (RequirementKind::Charges, count)
    } else {
        (RequirementKind::Amount, count.saturating_abs())
    }
}

impl ComplexRequirement {
    /// Expand an alternative-set.
    ///
    /// The result may have no simple requirements if every entry expanded to
    /// nothing usable; the caller decides what that means.
    ///
    /// # Errors
    ///
    /// Returns [`CraftingError::UnknownItemType`] if an entry names a type or
    /// functionality the registry does not know.
    pub fn expand(
        alternatives: &[RequirementSpec],
        is_tool: bool,
        registry: &ItemRegistry,
        functions: &mut FunctionalityTable,
    ) -> Result<Self, CraftingError> {
        let mut complex = Self {
            simple_reqs: Vec::new(),
            is_tool,
            alternatives: alternatives.to_vec(),
            selection: None,
        };
        let request = |count: i64, item_type: &ItemTypeId| {
            if is_tool {
                tool_request(count)
            } else {
                let by_charges = registry.get(item_type).is_some_and(|t| t.count_by_charges);
                component_request(count, by_charges)
            }
        };

        for spec in alternatives {
            if !registry.knows(&spec.type_id) {
                return Err(CraftingError::UnknownItemType(spec.type_id.clone()));
            }
            if spec.type_id.is_functionality() {
                for provider in functions.providers(registry, &spec.type_id) {
                    let (kind, requested) = request(spec.count, &provider.item_type);
                    if let Some((kind, count)) = provider.converts(kind, requested) {
                        complex.push(SimpleRequirement::new(
                            Requirement::new(kind, provider.item_type.clone(), count),
                            spec.type_id.clone(),
                            provider.functionality.time_modifier,
                        ));
                    }
                }
            } else {
                let (kind, count) = request(spec.count, &spec.type_id);
                complex.push(SimpleRequirement::new(
                    Requirement::new(kind, spec.type_id.clone(), count),
                    spec.type_id.clone(),
                    Decimal::ONE,
                ));
            }
        }
        complex
            .simple_reqs
            .sort_by(|a, b| by_preference(&a.requirement, &b.requirement));
        debug!(
            alternatives = alternatives.len(),
            simple = complex.simple_reqs.len(),
            is_tool,
            "Expanded alternative-set"
        );
        Ok(complex)
    }

    fn push(&mut self, simple: SimpleRequirement) {
        let existing = self.simple_reqs.iter_mut().find(|s| {
            s.requirement.item_type == simple.requirement.item_type
                && s.requirement.kind == simple.requirement.kind
        });
        match existing {
            Some(kept) => {
                kept.requirement.count = kept.requirement.count.max(simple.requirement.count);
                if kept.origin.is_functionality() && !simple.origin.is_functionality() {
                    kept.origin = simple.origin;
                }
            }
            None => self.simple_reqs.push(simple),
        }
    }

    /// Gather every alternative independently.
    pub fn gather(&mut self, world: &World, catalog: &SourceCatalog) {
        for simple in &mut self.simple_reqs {
            simple.gather(world, catalog);
        }
    }

    /// Whether any alternative is available.
    pub fn is_possible(&self) -> bool {
        self.simple_reqs.iter().any(SimpleRequirement::is_possible)
    }

    /// Whether an alternative other than `except` is, or could be, satisfied.
    pub fn has_other_possible(
        &self,
        except: usize,
        world: &World,
        catalog: &SourceCatalog,
    ) -> bool {
        self.simple_reqs
            .iter()
            .enumerate()
            .any(|(i, s)| i != except && s.could_be_possible(world, catalog))
    }

    /// The selected simple requirement.
    pub fn selected(&self) -> Option<&SimpleRequirement> {
        self.selection
            .as_ref()
            .and_then(|sel| self.simple_reqs.get(sel.index))
    }

    /// Forget gathered state and any selection.
    pub fn reset(&mut self) {
        self.selection = None;
        for simple in &mut self.simple_reqs {
            simple.reset();
        }
    }

    /// The alternative-set as written, for "missing" listings.
    pub fn describe_alternatives(&self) -> String {
        self.alternatives
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

/// Amount before charges, then fewer before more, then by type.
fn by_preference(a: &Requirement, b: &Requirement) -> Ordering {
    let charged = |r: &Requirement| r.kind != RequirementKind::Amount;
    charged(a)
        .cmp(&charged(b))
        .then(a.count.cmp(&b.count))
        .then_with(|| a.item_type.cmp(&b.item_type))
}
