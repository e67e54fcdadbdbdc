use bit_set::BitSet;

use crate::color::{ColoringInstance, VertexId};
use crate::solvers::coloring::greedy_dsatur::greedy_dsatur_colors;
use crate::timer::StoppingCriterion;


/** outcome of an exact colorability test. Timing out is an outcome, not an error. */
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ExactOutcome {
    /// colors[v] of a proper coloring using at most k colors
    Colorable(Vec<usize>),
    /// proven: no coloring with at most k colors exists
    NotColorable,
    /// the stopping criterion was met before the end of the search
    TimedOut,
}

/** represents a decision (assigning color c to vertex v) */
#[derive(Debug, Clone)]
struct Decision {
    v: VertexId,
    c: usize,
}

/// either a decision, either a commit
#[derive(Debug)]
enum BacktrackEvent {
    Commit(Decision), // decision to commit
    Restore(Decision) // decision taken
}

/// the stopping criterion is polled every time this many events are processed
const POLLING_PERIOD:usize = 256;


/**
Implements a backtracking search space for DSATUR that decides whether the instance
can be colored using at most k colors.
*/
#[derive(Debug)]
pub struct BacktrackingDsaturSpace<'a> {
    /// instance
    inst: &'a dyn ColoringInstance,
    /// set of uncolored vertices
    uncolored: BitSet,
    /// dsat[v]: saturation degree of vertex v
    dsat: Vec<usize>,
    /// colors[i]: color assigned to vertex i
    colors: Vec<Option<usize>>,
    /// number of colors in the search state
    nb_colors: usize,
    /// nb_adj_colored[v][c]: number of vertices adjacent to v colored with c
    nb_adj_colored: Vec<Vec<usize>>,
    /// color_nb_vertices[c]: number of vertices using color c
    color_nb_vertices: Vec<usize>,
    /// maximum number of colors allowed
    k: usize,
    /// decision history
    decisions: Vec<BacktrackEvent>,
    /// number of colored vertices
    nb_vertices_colored: usize,
    /// number of expanded nodes
    nb_expanded: usize,
}


impl<'a> BacktrackingDsaturSpace<'a> {
    /** creates a new backtracking Dsatur search space.
    The vertices of initial_clique (if any) are colored with colors 0,1,...
    (requires initial_clique.len() <= k)
    */
    pub fn new(inst:&'a dyn ColoringInstance, initial_clique:&[VertexId], k:usize) -> Self {
        assert!(initial_clique.len() <= k);
        let n = inst.nb_vertices();
        let mut res = Self {
            inst,
            uncolored: inst.vertices().collect(),
            dsat: vec![0 ; n],
            colors: vec![None ; n],
            nb_colors: 0,
            nb_adj_colored: vec![vec![0 ; k] ; n],
            color_nb_vertices: vec![0 ; k],
            k,
            decisions: Vec::with_capacity(n),
            nb_vertices_colored: 0,
            nb_expanded: 0,
        };
        for (i,v) in initial_clique.iter().enumerate() { // color clique vertices
            res.commit(Decision { v:*v, c:i });
        }
        res
    }

    /// number of expanded nodes so far
    pub fn nb_expanded(&self) -> usize { self.nb_expanded }

    /// finds the next vertex to color (maximum saturation degree, break ties by degree)
    fn next_vertex(&self) -> Option<VertexId> {
        self.uncolored.iter().max_by(|a,b| {
            self.dsat[*a].cmp(&self.dsat[*b])
                .then_with(|| self.inst.degree(*a).cmp(&self.inst.degree(*b)))
                .then_with(|| b.cmp(a))
        })
    }

    /// returns the next vertex and possible colorings for it.
    fn next_decisions(&self) -> Option<(VertexId, Vec<usize>)> {
        let v = self.next_vertex()?;
        // compute candidate colors (non-adjacent colors)
        let mut candidate_colors:Vec<usize> = (0..self.nb_colors)
            .filter(|c| self.nb_adj_colored[v][*c] == 0).collect();
        // if possible, color the vertex with a new color
        if self.nb_colors < self.k {
            candidate_colors.push(self.nb_colors);
        }
        Some((v, candidate_colors))
    }

    /// applies a decision to the search space
    fn commit(&mut self, decision:Decision) {
        self.color_nb_vertices[decision.c] += 1;
        self.nb_vertices_colored += 1;
        if decision.c == self.nb_colors {
            self.nb_colors += 1;
        }
        debug_assert!(self.colors[decision.v].is_none());
        self.colors[decision.v] = Some(decision.c);
        for u in self.inst.neighbors(decision.v) {
            self.nb_adj_colored[*u][decision.c] += 1;
            // update dsat value of u
            if self.nb_adj_colored[*u][decision.c] == 1 {
                self.dsat[*u] += 1;
            }
        }
        self.uncolored.remove(decision.v);
    }

    /// restores the search space from a decision (does not pop self.decisions)
    fn restore(&mut self, decision:Decision) {
        self.color_nb_vertices[decision.c] -= 1;
        self.nb_vertices_colored -= 1;
        // change nb_colors if the last color is removed (c should be the last color)
        if self.color_nb_vertices[decision.c] == 0 {
            debug_assert_eq!(decision.c, self.nb_colors-1);
            self.nb_colors -= 1;
        }
        debug_assert!(self.colors[decision.v].is_some());
        self.colors[decision.v] = None;
        for u in self.inst.neighbors(decision.v) {
            self.nb_adj_colored[*u][decision.c] -= 1;
            if self.nb_adj_colored[*u][decision.c] == 0 {
                self.dsat[*u] -= 1;
            }
        }
        self.uncolored.insert(decision.v);
    }

    fn push_next_decisions(&mut self) {
        if let Some((v, colors)) = self.next_decisions() {
            for c in colors.iter().rev() {
                let decision = Decision { v, c:*c };
                self.decisions.push(BacktrackEvent::Restore(decision.clone())); // prepare to backtrack
                self.decisions.push(BacktrackEvent::Commit(decision)); // decision to apply
            }
            self.nb_expanded += 1;
        }
    }

    fn current_coloring(&self) -> Vec<usize> {
        self.colors.iter().map(|c| c.unwrap_or(0)).collect()
    }

    /// backtracking search
    ///
    /// Stores the decisions to be taken in a stack.
    /// pops each decision, try to apply it
    /// stops as soon as all vertices are assigned
    pub fn dfs_search<Stop:StoppingCriterion>(&mut self, stopping_criterion:&Stop) -> ExactOutcome {
        if self.nb_vertices_colored == self.inst.nb_vertices() {
            return ExactOutcome::Colorable(self.current_coloring());
        }
        if stopping_criterion.is_finished() { return ExactOutcome::TimedOut; }
        // populate decisions with the root node children
        self.push_next_decisions();
        let mut nb_events:usize = 0;
        while let Some(event) = self.decisions.pop() {
            nb_events += 1;
            if nb_events % POLLING_PERIOD == 0 && stopping_criterion.is_finished() {
                return ExactOutcome::TimedOut;
            }
            match event {
                BacktrackEvent::Restore(decision) => { // restore the state
                    self.restore(decision);
                },
                BacktrackEvent::Commit(decision) => { // apply the decision and generate children
                    self.commit(decision);
                    if self.nb_vertices_colored == self.inst.nb_vertices() {
                        return ExactOutcome::Colorable(self.current_coloring());
                    }
                    self.push_next_decisions();
                }
            }
        }
        ExactOutcome::NotColorable
    }
}


/** decides if inst is k-colorable (uses the greedy DSATUR first, then the backtracking) */
pub fn is_k_colorable_exact<Stop:StoppingCriterion>(
    inst:&dyn ColoringInstance, k:usize, stopping_criterion:&Stop
) -> ExactOutcome {
    let greedy = greedy_dsatur_colors(inst);
    if greedy.iter().all(|c| *c < k) {
        return ExactOutcome::Colorable(greedy);
    }
    if k == 0 { return ExactOutcome::NotColorable; } // non-empty instance at this point
    let mut space = BacktrackingDsaturSpace::new(inst, &[], k);
    let outcome = space.dfs_search(stopping_criterion);
    log::trace!("backtracking: {} nodes expanded (n={}, k={})", space.nb_expanded(), inst.nb_vertices(), k);
    outcome
}

/** computes the chromatic number given a lower bound.
returns None if the stopping criterion is met before the proof.
*/
pub fn chromatic_number<Stop:StoppingCriterion>(
    inst:&dyn ColoringInstance, lower_bound:usize, stopping_criterion:&Stop
) -> Option<usize> {
    let upper_bound = greedy_dsatur_colors(inst).iter().map(|c| c+1).max().unwrap_or(0);
    let mut best = upper_bound;
    while best > lower_bound {
        match is_k_colorable_exact(inst, best-1, stopping_criterion) {
            ExactOutcome::Colorable(_) => best -= 1,
            ExactOutcome::NotColorable => return Some(best),
            ExactOutcome::TimedOut => return None,
        }
    }
    Some(best)
}
