//! The per-tick propagation step.
//!
//! ```text
//! seeds      = every member infected before the tick
//! for seed in seeds:
//!     candidates = healthy members of seed's 3×3 block
//!     k          = uniform in [1, min(infection_factor, |candidates|)]
//!     chosen     = k candidates, without replacement, random order
//! result     = union of all `chosen`
//! ```
//!
//! Candidates are drawn only from members that were healthy before the
//! tick, so the result never re-signals an existing infection and a seed
//! with at least one healthy neighbor always contributes at least one
//! member.  Two seeds may pick the same candidate; the union absorbs it.
//!
//! Members infected *during* a tick do not act as seeds until the next one.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use vs_core::{MemberId, SimParams};

use crate::{GridGeometry, MAX_NEIGHBORS};

/// Parameters the propagation step depends on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpreadParams {
    /// Per-seed upper bound on newly infected neighbors per tick.
    pub infection_factor: usize,
    /// Members per grid row.
    pub elements_in_row:  usize,
}

impl From<&SimParams> for SpreadParams {
    fn from(params: &SimParams) -> Self {
        Self {
            infection_factor: params.infection_factor,
            elements_in_row:  params.elements_in_row,
        }
    }
}

/// Indices of all currently infected members, ascending.
pub fn infected_seeds(status: &[bool]) -> impl Iterator<Item = MemberId> + '_ {
    status
        .iter()
        .enumerate()
        .filter(|&(_, &infected)| infected)
        .map(|(i, _)| MemberId(i as u32))
}

/// Compute the members that become infected this tick.
///
/// `status[i]` is `true` when member `i` is infected.  The returned set is
/// disjoint from the members already infected in `status`.
///
/// A zero `infection_factor` or `elements_in_row`, or an empty population,
/// yields an empty set; the simulation core rejects such configurations
/// before any tick runs.
pub fn propagate<R: Rng>(status: &[bool], params: SpreadParams, rng: &mut R) -> BTreeSet<MemberId> {
    let mut result = BTreeSet::new();
    if params.infection_factor == 0 {
        return result;
    }
    let Ok(geometry) = GridGeometry::new(status.len(), params.elements_in_row) else {
        return result;
    };

    let mut candidates = Vec::with_capacity(MAX_NEIGHBORS);
    for seed in infected_seeds(status) {
        let chosen = spread_from(seed, status, &geometry, params.infection_factor, rng, &mut candidates);
        result.extend(chosen.iter().copied());
    }
    result
}

/// Draw the members `seed` infects this tick.
///
/// `scratch` is cleared and reused as the candidate buffer; the returned
/// slice borrows from it.  Empty when every neighbor of `seed` is already
/// infected.
pub fn spread_from<'a, R: Rng>(
    seed:             MemberId,
    status:           &[bool],
    geometry:         &GridGeometry,
    infection_factor: usize,
    rng:              &mut R,
    scratch:          &'a mut Vec<MemberId>,
) -> &'a [MemberId] {
    debug_assert_eq!(status.len(), geometry.group_size());
    scratch.clear();
    geometry.neighbors_into(seed, scratch);
    scratch.retain(|near| !status[near.index()]);

    let cap = infection_factor.min(scratch.len());
    if cap == 0 {
        return &[];
    }
    let k = rng.gen_range(1..=cap);
    let (chosen, _) = scratch.partial_shuffle(rng, k);
    chosen
}
