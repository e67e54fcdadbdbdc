use bit_set::BitSet;
use rand::Rng;

use crate::color::{ColoringInstance, VertexId};
use crate::timer::StoppingCriterion;


/** simple tabu tenure that stores the insertions of vertices */
#[derive(Debug)]
pub struct CliqueSwapTenure {
    /// tabu fixed size
    l: usize,
    /// tabu dynamic size
    lambda: f64,
    /// number of iterations since the beginning of the search
    nb_iter: usize,
    /// decisions[v]: last iteration in which vertex v was inserted
    decisions: Vec<Option<usize>>,
}

impl CliqueSwapTenure {
    /** creates a tabu tenure given:
     - l: fixed tabu size
     - λ: variable tabu size
     - n: nb vertices
    */
    pub fn new(l:usize, lambda:f64, n:usize) -> Self {
        Self { l, lambda, nb_iter: 0, decisions: vec![None ; n] }
    }

    fn insert(&mut self, v:VertexId) {
        self.decisions[v] = Some(self.nb_iter);
        self.nb_iter += 1;
    }

    fn contains<R:Rng>(&self, clique_size:usize, v:VertexId, rng:&mut R) -> bool {
        match self.decisions[v] {
            None => false,
            Some(i) => {
                let threshold = rng.gen_range(0..=self.l) + (self.lambda * clique_size as f64) as usize;
                i + threshold >= self.nb_iter
            }
        }
    }
}


/** Implementation of a swap tabu search procedure.
Starts by an initial clique. Inserts the vertex outside the clique that sees the most clique
vertices (break ties by degree), and removes the clique vertices it does not see.
Stops when a clique of size target is found, or when the stopping criterion is met.
*/
pub fn clique_swaps<Stop:StoppingCriterion, R:Rng>(
    inst:&dyn ColoringInstance, sol:Vec<VertexId>, target:usize,
    stopping_criterion:&Stop, rng:&mut R
) -> Vec<VertexId> {
    let n = inst.nb_vertices();
    let mut best = sol.clone();
    let mut current_clique = sol;
    let mut inside_clique:BitSet = current_clique.iter().cloned().collect();
    // for each vertex, maintain the number of vertices in the clique it sees
    let mut nb_clique_see:Vec<usize> = vec![0 ; n];
    for u in &current_clique {
        for v in inst.neighbors(*u) {
            nb_clique_see[*v] += 1;
        }
    }
    let mut tabu = CliqueSwapTenure::new(n/5, 0.5, n);
    while best.len() < target && !stopping_criterion.is_finished() {
        let clique_size = current_clique.len();
        // only consider non added vertices and non-tabu (with a simple aspiration criterion)
        let u = match inst.vertices()
            .filter(|u| !inside_clique.contains(*u) && inst.degree(*u) >= best.len())
            .filter(|u| nb_clique_see[*u] == clique_size || !tabu.contains(clique_size, *u, rng))
            .max_by(|u,v| nb_clique_see[*u].cmp(&nb_clique_see[*v])
                .then_with(|| inst.degree(*u).cmp(&inst.degree(*v)))
            ) {
            None => break,
            Some(u) => u,
        };
        // remove vertices in the clique that do not see u
        let to_remove:Vec<VertexId> = current_clique.iter()
            .filter(|v| !inst.are_adjacent(u, **v)).cloned().collect();
        // perform move (adding u)
        inside_clique.insert(u);
        current_clique.push(u);
        tabu.insert(u);
        for v in inst.neighbors(u) {
            nb_clique_see[*v] += 1;
        }
        // perform move (remove v ∈ to_remove)
        for v in &to_remove {
            inside_clique.remove(*v);
            for w in inst.neighbors(*v) {
                nb_clique_see[*w] -= 1;
            }
        }
        current_clique.retain(|v| inside_clique.contains(*v));
        if current_clique.len() > best.len() {
            best = current_clique.clone();
            log::trace!("new best clique! ({})", best.len());
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::compact_instance::CompactInstance;
    use crate::timer::Timer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_grows_to_complete() {
        // K4 on {0,1,2,3} plus a pendant vertex 4 attached to 0
        let inst = CompactInstance::from_edges(5, &[
            (0,1),(0,2),(0,3),(1,2),(1,3),(2,3),(0,4)
        ]);
        let mut rng = StdRng::seed_from_u64(2);
        let clique = clique_swaps(&inst, vec![0,4], 4, &Timer::new(1.), &mut rng);
        assert_eq!(clique.len(), 4);
        for a in &clique {
            for b in &clique {
                if a < b { assert!(inst.are_adjacent(*a, *b)); }
            }
        }
    }
}
