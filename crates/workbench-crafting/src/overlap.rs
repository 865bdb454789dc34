//! Overlap resolution between simple requirements sharing an item type.
//!
//! Two simple requirements overlap when they target the same concrete type,
//! so one physical item could be counted for both. Each pair is examined once,
//! when the later of the two becomes available (the trigger). The result is
//! either a separation of their candidate lists into disjoint shares or the
//! disabling of one side.
//!
//! Same counting discipline: the earlier requirement (the partner) claims its
//! share first, smallest stock first; if what remains still covers the
//! trigger, both keep their shares. Mixed disciplines: the amount side claims
//! whole items, preferring items without charges and then items with the
//! fewest charges; those items are removed from the charge side, and each
//! side is then checked on its own.
//!
//! When only one side can be satisfied the tie-break is first-found: if the
//! partner's alternative-set has another possible alternative, the partner
//! is disabled; otherwise the trigger is. Which side came up short does not
//! matter.

use tracing::{debug, info};
use workbench_types::RequirementKind;
use workbench_world::World;

use crate::candidate::{Candidate, total_available};
use crate::complex::ComplexRequirement;
use crate::simple::{SimpleRef, SimpleRequirement};
use crate::source::SourceCatalog;

/// Outcome of examining one overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapOutcome {
    /// The partner was not available; nothing to do.
    NoConflict,
    /// Both sides keep disjoint shares.
    Separated,
    /// One side was disabled.
    Disabled(SimpleRef),
    /// Neither side can be satisfied from its share; both were disabled.
    BothDisabled,
}

/// Record symmetric overlap links between every pair of simple requirements
/// targeting the same concrete type.
pub fn link_overlaps(complexes: &mut [ComplexRequirement]) {
    let mut refs: Vec<(SimpleRef, workbench_types::ItemTypeId)> = Vec::new();
    for (ci, complex) in complexes.iter().enumerate() {
        for (si, simple) in complex.simple_reqs.iter().enumerate() {
            refs.push((SimpleRef::new(ci, si), simple.requirement.item_type.clone()));
        }
    }
    for (a, a_type) in &refs {
        for (b, b_type) in &refs {
            if a != b && a.complex != b.complex && a_type == b_type {
                if let Some(simple) = simple_mut(complexes, *a) {
                    simple.overlaps.push(*b);
                }
            }
        }
    }
}

/// Borrow a simple requirement.
pub fn simple_ref(complexes: &[ComplexRequirement], at: SimpleRef) -> Option<&SimpleRequirement> {
    complexes
        .get(at.complex)
        .and_then(|c| c.simple_reqs.get(at.simple))
}

/// Borrow a simple requirement mutably.
pub fn simple_mut(
    complexes: &mut [ComplexRequirement],
    at: SimpleRef,
) -> Option<&mut SimpleRequirement> {
    complexes
        .get_mut(at.complex)
        .and_then(|c| c.simple_reqs.get_mut(at.simple))
}

/// Examine the overlap between a freshly available `trigger` and an earlier
/// `partner`.
pub fn resolve_pair(
    complexes: &mut [ComplexRequirement],
    trigger: SimpleRef,
    partner: SimpleRef,
    world: &World,
    catalog: &SourceCatalog,
) -> OverlapOutcome {
    let (Some(t), Some(p)) = (
        simple_ref(complexes, trigger).cloned(),
        simple_ref(complexes, partner).cloned(),
    ) else {
        return OverlapOutcome::NoConflict;
    };
    if !p.is_possible() || !t.is_possible() {
        return OverlapOutcome::NoConflict;
    }

    if t.requirement.kind == p.requirement.kind {
        let claimed = claim_smallest_first(&p.candidates, p.requirement.count);
        let rest = subtract(&t.candidates, &claimed);
        if total_available(&rest) >= t.requirement.count {
            debug!(
                item = %t.requirement.item_type,
                trigger = %t.requirement,
                partner = %p.requirement,
                "Combined demand fits; separating shared stock"
            );
            store(complexes, partner, claimed);
            store(complexes, trigger, rest);
            return OverlapOutcome::Separated;
        }
        info!(
            item = %t.requirement.item_type,
            trigger = %t.requirement,
            partner = %p.requirement,
            "Combined demand exceeds stock"
        );
        return tie_break(complexes, partner, trigger, world, catalog);
    }

    let (amount_at, amount, charge_at, charge) = if t.requirement.kind == RequirementKind::Amount {
        (trigger, &t, partner, &p)
    } else {
        (partner, &p, trigger, &t)
    };
    let claimed =
        claim_least_charged(&amount.candidates, &charge.candidates, amount.requirement.count);
    let remaining: Vec<Candidate> = charge
        .candidates
        .iter()
        .filter(|c| !claimed.iter().any(|a| a.locator == c.locator))
        .cloned()
        .collect();
    let amount_ok = total_available(&claimed) >= amount.requirement.count;
    let charge_ok = total_available(&remaining) >= charge.requirement.count;
    debug!(
        item = %t.requirement.item_type,
        amount_ok,
        charge_ok,
        "Separated amount and charge requirements"
    );

    match (amount_ok, charge_ok) {
        (true, true) => {
            store(complexes, amount_at, claimed);
            store(complexes, charge_at, remaining);
            OverlapOutcome::Separated
        }
        (false, false) => {
            info!(
                item = %t.requirement.item_type,
                "Neither overlapping requirement fits; disabling both"
            );
            disable(complexes, amount_at);
            disable(complexes, charge_at);
            OverlapOutcome::BothDisabled
        }
        (true, false) | (false, true) => tie_break(complexes, partner, trigger, world, catalog),
    }
}

fn tie_break(
    complexes: &mut [ComplexRequirement],
    partner: SimpleRef,
    trigger: SimpleRef,
    world: &World,
    catalog: &SourceCatalog,
) -> OverlapOutcome {
    let partner_has_alternative = complexes
        .get(partner.complex)
        .is_some_and(|c| c.has_other_possible(partner.simple, world, catalog));
    let victim = if partner_has_alternative { partner } else { trigger };
    info!(
        complex = victim.complex,
        simple = victim.simple,
        partner_has_alternative,
        "Overlap tie-break disabled requirement"
    );
    disable(complexes, victim);
    OverlapOutcome::Disabled(victim)
}

fn store(complexes: &mut [ComplexRequirement], at: SimpleRef, candidates: Vec<Candidate>) {
    if let Some(simple) = simple_mut(complexes, at) {
        simple.set_candidates(candidates);
    }
}

fn disable(complexes: &mut [ComplexRequirement], at: SimpleRef) {
    if let Some(simple) = simple_mut(complexes, at) {
        simple.disable();
    }
}

/// Take candidates smallest stock first until `need` is covered, splitting
/// the last one. The claimed share is returned in catalog order.
pub fn claim_smallest_first(candidates: &[Candidate], need: i64) -> Vec<Candidate> {
    let mut order: Vec<&Candidate> = candidates.iter().collect();
    order.sort_by_key(|c| c.available);
    let mut remaining = need;
    let mut claimed = Vec::new();
    for candidate in order {
        if remaining <= 0 {
            break;
        }
        let take = candidate.available.min(remaining);
        remaining = remaining.saturating_sub(take);
        let mut share = candidate.clone();
        share.available = take;
        claimed.push(share);
    }
    claimed.sort_by(|a, b| a.locator.cmp(&b.locator));
    claimed
}

/// Take whole items for an amount requirement, items without charges first,
/// then ascending charges.
fn claim_least_charged(amount: &[Candidate], charges: &[Candidate], need: i64) -> Vec<Candidate> {
    let charge_at = |c: &Candidate| {
        charges
            .iter()
            .find(|other| other.locator == c.locator)
            .map(|other| other.available)
    };
    let mut order: Vec<&Candidate> = amount.iter().collect();
    order.sort_by_key(|c| charge_at(*c));
    let mut remaining = need;
    let mut claimed = Vec::new();
    for candidate in order {
        if remaining <= 0 {
            break;
        }
        remaining = remaining.saturating_sub(candidate.available);
        claimed.push(candidate.clone());
    }
    claimed.sort_by(|a, b| a.locator.cmp(&b.locator));
    claimed
}

/// Remove claimed shares from a candidate list.
fn subtract(candidates: &[Candidate], claimed: &[Candidate]) -> Vec<Candidate> {
    candidates
        .iter()
        .filter_map(|c| {
            let taken = claimed
                .iter()
                .filter(|k| k.locator == c.locator)
                .map(|k| k.available)
                .fold(0_i64, i64::saturating_add);
            let left = c.available.saturating_sub(taken);
            (left > 0).then(|| {
                let mut rest = c.clone();
                rest.available = left;
                rest
            })
        })
        .collect()
}
