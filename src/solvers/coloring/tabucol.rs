use fastrand::Rng;

use crate::color::{ColoringInstance, VertexId};
use crate::solvers::coloring::greedy_dsatur::greedy_dsatur_colors;
use crate::timer::StoppingCriterion;


/** implements a specific tabu tenure for the graph coloring
Is parametrized by:
 - L: minimum size of the tabu tenure (example value: 10). We use a random number between 0 and L.
 - λ: (example value: 0.6)
a move giving back color c to vertex v stays forbidden L+λ.F iterations after v left c,
where F is the number of conflicts at that time.
*/
#[derive(Debug)]
pub struct TabuColTenure {
    /// tabu fixed size
    l: usize,
    /// tabu dynamic size
    lambda: f64,
    /// number of iterations since the beginning of the search
    nb_iter: usize,
    /// tabu_until[v][c]: first iteration in which v can get color c back
    tabu_until: Vec<Vec<usize>>,
}

impl TabuColTenure {
    /** creates a tabucol tenure given:
     - l: fixed tabu size
     - λ: variable tabu size
     - n: the number of vertices in the graph
     - k: the number of colors
    */
    pub fn new(l:usize, lambda:f64, n:usize, k:usize) -> Self {
        Self { l, lambda, nb_iter: 0, tabu_until: vec![vec![0 ; k] ; n] }
    }

    /// v just left color c_prev while nb_conflicts conflicts remain
    fn insert(&mut self, v:VertexId, c_prev:usize, nb_conflicts:usize, rng:&mut Rng) {
        let threshold = rng.usize(0..=self.l) + (self.lambda * nb_conflicts as f64) as usize;
        self.tabu_until[v][c_prev] = self.nb_iter + threshold;
        self.nb_iter += 1;
    }

    fn contains(&self, v:VertexId, c:usize) -> bool {
        self.tabu_until[v][c] > self.nb_iter
    }
}


/** conflict minimization state of the k-coloring local search */
#[derive(Debug)]
struct SearchState<'a> {
    /// reference instance
    inst: &'a dyn ColoringInstance,
    /// colors[v]: color of the vertex v
    colors: Vec<usize>,
    /// nb_neigh_colors[v][c]: number of neighbors of v that are assigned color c
    nb_neigh_colors: Vec<Vec<usize>>,
    /// number of conflicting edges
    nb_conflicts: usize,
}

impl<'a> SearchState<'a> {
    fn new(inst:&'a dyn ColoringInstance, colors:Vec<usize>, k:usize) -> Self {
        let mut nb_neigh_colors = vec![vec![0 ; k] ; inst.nb_vertices()];
        let mut nb_conflicts = 0;
        for u in inst.vertices() {
            for v in inst.neighbors(u) {
                nb_neigh_colors[*v][colors[u]] += 1;
                if u < *v && colors[u] == colors[*v] { nb_conflicts += 1; }
            }
        }
        Self { inst, colors, nb_neigh_colors, nb_conflicts }
    }

    /// change in the number of conflicts if v takes color c
    fn delta(&self, v:VertexId, c:usize) -> i64 {
        self.nb_neigh_colors[v][c] as i64 - self.nb_neigh_colors[v][self.colors[v]] as i64
    }

    fn apply(&mut self, v:VertexId, c:usize) {
        let previous_color = self.colors[v];
        self.nb_conflicts = self.nb_conflicts + self.nb_neigh_colors[v][c]
            - self.nb_neigh_colors[v][previous_color];
        for neigh in self.inst.neighbors(v) {
            self.nb_neigh_colors[*neigh][previous_color] -= 1;
            self.nb_neigh_colors[*neigh][c] += 1;
        }
        self.colors[v] = c;
    }

    fn is_conflicting(&self, v:VertexId) -> bool {
        self.nb_neigh_colors[v][self.colors[v]] > 0
    }
}


/**
TabuCol local search (see https://doi.org/10.1016/j.cor.2005.07.028) for the k-coloring.
Starts from a greedy DSATUR solution in which the vertices using colors ≥ k are recolored at random,
then repeatedly recolors an endpoint of a conflicting edge with the best non-tabu color
(a tabu move is allowed if it removes every conflict).

returns colors[v] of a proper coloring using at most k colors, None if the stopping
criterion is reached first.
*/
pub fn tabucol<Stop:StoppingCriterion>(
    inst:&dyn ColoringInstance, k:usize, stopping_criterion:&Stop, rng:&mut Rng
) -> Option<Vec<usize>> {
    let n = inst.nb_vertices();
    let mut colors = greedy_dsatur_colors(inst);
    if colors.iter().all(|c| *c < k) { return Some(colors); }
    if k <= 1 { return None; } // greedy DSATUR is optimal with 0 or 1 color
    for c in colors.iter_mut().filter(|c| **c >= k) {
        *c = rng.usize(0..k);
    }
    let mut state = SearchState::new(inst, colors, k);
    let mut tabu = TabuColTenure::new(10, 0.6, n, k);
    while state.nb_conflicts > 0 {
        if stopping_criterion.is_finished() { return None; }
        let mut best_move:Option<(VertexId, usize)> = None;
        let mut best_delta = i64::MAX;
        let mut nb_ties:usize = 0;
        for v in inst.vertices().filter(|v| state.is_conflicting(*v)) {
            for c in (0..k).filter(|c| *c != state.colors[v]) {
                let delta = state.delta(v, c);
                let aspiration = state.nb_conflicts as i64 + delta == 0;
                if tabu.contains(v, c) && !aspiration { continue; }
                if delta < best_delta {
                    best_delta = delta;
                    best_move = Some((v,c));
                    nb_ties = 1;
                } else if delta == best_delta {
                    nb_ties += 1;
                    if rng.usize(0..nb_ties) == 0 { best_move = Some((v,c)); }
                }
            }
        }
        let (v, c) = match best_move {
            Some(m) => m,
            None => { // every move is tabu: random recoloring of a conflicting vertex
                let conflicting:Vec<VertexId> = inst.vertices()
                    .filter(|v| state.is_conflicting(*v)).collect();
                let v = conflicting[rng.usize(0..conflicting.len())];
                let c = (state.colors[v] + 1 + rng.usize(0..k-1)) % k;
                (v, c)
            }
        };
        let c_prev = state.colors[v];
        state.apply(v, c);
        tabu.insert(v, c_prev, state.nb_conflicts, rng);
    }
    Some(state.colors)
}

/** heuristic upper bound of the chromatic number: greedy DSATUR, then TabuCol with one
color less until it fails (or reaches the lower bound).
*/
pub fn color_heuristically<Stop:StoppingCriterion>(
    inst:&dyn ColoringInstance, lower_bound:usize, stopping_criterion:&Stop, rng:&mut Rng
) -> usize {
    let mut best = greedy_dsatur_colors(inst).iter().map(|c| c+1).max().unwrap_or(0);
    while best > lower_bound && best > 1 {
        match tabucol(inst, best-1, stopping_criterion, rng) {
            Some(_) => {
                best -= 1;
                log::debug!("tabucol: {} colors", best);
            }
            None => break,
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, colors_to_solution, CheckerResult};
    use crate::compact_instance::CompactInstance;
    use crate::timer::Timer;

    #[test]
    fn test_three_colors_myciel3_fails() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let mut rng = Rng::with_seed(1);
        assert!(tabucol(&inst, 3, &Timer::new(0.2), &mut rng).is_none());
    }

    #[test]
    fn test_four_colors_myciel3() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let mut rng = Rng::with_seed(1);
        let colors = tabucol(&inst, 4, &Timer::new(5.), &mut rng).unwrap();
        assert!(colors.iter().all(|c| *c < 4));
        assert!(matches!(checker(&inst, &colors_to_solution(&colors)), CheckerResult::Ok(_)));
    }

    #[test]
    fn test_even_cycle() {
        let inst = CompactInstance::from_file("insts/c6.col").unwrap();
        let mut rng = Rng::with_seed(5);
        let colors = tabucol(&inst, 2, &Timer::new(5.), &mut rng).unwrap();
        assert_eq!(checker(&inst, &colors_to_solution(&colors)), CheckerResult::Ok(2));
        assert_eq!(color_heuristically(&inst, 0, &Timer::new(1.), &mut rng), 2);
    }

    #[test]
    fn test_odd_cycle_with_pendant_vertex() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let mut rng = Rng::with_seed(11);
        let colors = tabucol(&inst, 3, &Timer::new(5.), &mut rng).unwrap();
        assert!(matches!(checker(&inst, &colors_to_solution(&colors)), CheckerResult::Ok(c) if c <= 3));
        assert!(tabucol(&inst, 2, &Timer::new(0.1), &mut rng).is_none());
    }
}
