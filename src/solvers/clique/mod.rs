use rand::Rng;

use crate::color::{ColoringInstance, VertexId};
use crate::timer::StoppingCriterion;

/// greedy that finds a clique of "large" size
pub mod greedy_clique;

/// swap-based tabu search for the clique problem
pub mod clique_swap;

/** finds a large clique (greedy, then improved by swaps until a clique of size target is found
or the stopping criterion is met). */
pub fn max_clique<Stop:StoppingCriterion, R:Rng>(
    inst:&dyn ColoringInstance, target:usize, stopping_criterion:&Stop, rng:&mut R
) -> Vec<VertexId> {
    let initial = greedy_clique::greedy_clique(inst);
    if initial.len() >= target { return initial; }
    clique_swap::clique_swaps(inst, initial, target, stopping_criterion, rng)
}
