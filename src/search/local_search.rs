use rand::Rng;

use crate::color::VertexId;
use crate::params::Params;
use crate::search::subgraph::Subgraph;
use crate::search::util::reservoir::ReservoirSampling;
use crate::search::util::tabu_list::TabuList;
use crate::timer::StoppingCriterion;


/**
Tabu search maximizing the number of edges of a fixed-size subgraph by swapping a member
with a non-member.

The scan of the moves starts where the previous one stopped (round-robin cursors over the
non-members and the members, kept from one call to the next) and stops at the first improving
move. Without improving move, the best non-improving one is applied. After `max_nonimpr`
consecutive moves that do not improve the current subgraph, `p` random swaps perturb it,
`p` growing from `pmin` by `pstep` at each perturbation. The same happens once the moves since the
last new best exceed `max_nonimpr·n`. The search stops when `p` exceeds `pmax`, when no move is
admissible, or when the stopping criterion is met.
*/
#[derive(Debug, Clone)]
pub struct LocalSearch {
    /// number of colors
    k: usize,
    /// tabu tenure
    tenure: usize,
    /// maximum number of consecutive non-improving moves
    max_nonimpr: usize,
    /// maximum number of moves without new best
    max_without_best: usize,
    /// initial perturbation strength
    pmin: usize,
    /// maximum perturbation strength
    pmax: usize,
    /// perturbation strength increase
    pstep: usize,
    /// skip moves bringing a vertex that cannot belong to a k-critical subgraph
    brooks_pruning: bool,
    /// cursor over the non-members
    cursor_out: usize,
    /// cursor over the members
    cursor_in: usize,
}

impl LocalSearch {
    /// local search configured by the parameters, on subgraphs of an n-vertex graph
    pub fn new(params:&Params, n:usize) -> Self {
        Self {
            k: params.k,
            tenure: params.tenure(n),
            max_nonimpr: params.max_nonimpr,
            max_without_best: params.max_nonimpr.saturating_mul(n).max(1),
            pmin: params.pmin,
            pmax: params.pmax(n),
            pstep: params.pstep,
            brooks_pruning: params.brooks_pruning,
            cursor_out: usize::MAX,
            cursor_in: usize::MAX,
        }
    }

    /// a vertex with at most k-2 neighbors in the subgraph cannot belong to a k-critical one
    fn pruned(&self, nb_neighbors:usize) -> bool {
        self.brooks_pruning && nb_neighbors + 2 <= self.k
    }

    /// best admissible move (outside index, member index), the scan stops at the first improving one
    fn scan<R:Rng>(
        &mut self, sg:&Subgraph, outside:&[VertexId], tabu:&TabuList, rng:&mut R
    ) -> Option<(usize, usize)> {
        let inst = sg.inst();
        if self.cursor_out >= outside.len() { self.cursor_out = rng.gen_range(0..outside.len()); }
        if self.cursor_in >= sg.size() { self.cursor_in = rng.gen_range(0..sg.size()); }
        let current = sg.nb_edges();
        let mut best:Option<(usize, usize, usize)> = None;
        let mut reservoir = ReservoirSampling::default();
        for _ in 0..outside.len() {
            let i = self.cursor_out;
            self.cursor_out = (self.cursor_out + 1) % outside.len();
            let v = outside[i];
            if tabu.contains(v) || self.pruned(sg.deg(v)) { continue; }
            for _ in 0..sg.size() {
                let j = self.cursor_in;
                self.cursor_in = (self.cursor_in + 1) % sg.size();
                let u = sg.members()[j];
                let adj = if inst.are_adjacent(u, v) { 1 } else { 0 };
                if tabu.contains(u) || self.pruned(sg.deg(v) - adj) { continue; }
                let nb_edges = sg.edges_after_swap(j, v);
                match best {
                    Some((_,_,b)) if nb_edges < b => {},
                    Some((_,_,b)) if nb_edges == b => {
                        if reservoir.consider(rng) { best = Some((i, j, nb_edges)); }
                    },
                    _ => {
                        best = Some((i, j, nb_edges));
                        reservoir.reset();
                        reservoir.consider(rng);
                    }
                }
                if nb_edges > current {
                    return Some((i, j));
                }
            }
        }
        best.map(|(i, j, _)| (i, j))
    }

    /** improves the subgraph in place, leaves it in the best state met (most edges).
    Returns the number of moves applied (perturbation swaps included). */
    pub fn run<Stop:StoppingCriterion, R:Rng>(
        &mut self, sg:&mut Subgraph, stopping_criterion:&Stop, rng:&mut R
    ) -> usize {
        let inst = sg.inst();
        let n = inst.nb_vertices();
        let mut outside:Vec<VertexId> = inst.vertices().filter(|v| !sg.contains(*v)).collect();
        if outside.is_empty() || sg.size() == 0 { return 0; }
        let mut tabu = TabuList::new(n, self.tenure);
        let mut pcur = self.pmin;
        let mut nonimpr = 0;
        let mut without_best = 0;
        let mut nb_moves = 0;
        let mut best_edges = sg.nb_edges();
        let mut best_members = sg.members().to_vec();
        while !stopping_criterion.is_finished() {
            let (i, j) = match self.scan(sg, &outside, &tabu, rng) {
                None => break,
                Some(m) => m,
            };
            let current = sg.nb_edges();
            apply_move(sg, &mut outside, &mut tabu, i, j);
            nb_moves += 1;
            without_best += 1;
            if sg.nb_edges() > best_edges {
                best_edges = sg.nb_edges();
                best_members = sg.members().to_vec();
                without_best = 0;
            }
            if sg.nb_edges() > current {
                nonimpr = 0;
            } else {
                nonimpr += 1;
            }
            if nonimpr >= self.max_nonimpr || without_best >= self.max_without_best { // perturbation
                if pcur > self.pmax { break; }
                for _ in 0..pcur {
                    let i = rng.gen_range(0..outside.len());
                    let j = rng.gen_range(0..sg.size());
                    apply_move(sg, &mut outside, &mut tabu, i, j);
                }
                nb_moves += pcur;
                pcur += self.pstep;
                nonimpr = 0;
                without_best = 0;
            }
        }
        if sg.nb_edges() < best_edges {
            sg.set_members(best_members);
        }
        nb_moves
    }
}

/// swaps the j-th member with the i-th non-member, both become tabu
fn apply_move(sg:&mut Subgraph, outside:&mut [VertexId], tabu:&mut TabuList, i:usize, j:usize) {
    let u = sg.members()[j];
    let v = outside[i];
    tabu.insert(u);
    tabu.insert(v);
    tabu.next_iter();
    sg.swap(j, v);
    outside[i] = u;
}
