use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::color::{ColoringInstance, VertexId};
use crate::error::KvcsError;
use crate::params::Params;
use crate::search::construction::Constructor;
use crate::search::criticality::Reduction;
use crate::search::incumbent::{Candidate, Incumbent};
use crate::search::local_search::LocalSearch;
use crate::search::oracle::ColoringOracle;
use crate::solvers::clique::max_clique;
use crate::stats::Stats;
use crate::timer::Timer;


/** final answer of a search */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// the graph is (k-1)-colorable, so it contains no k-VCS
    Infeasible,
    /// the time limit was reached before deciding if the graph is (k-1)-colorable
    Undecided,
    /// best candidate found
    Found(Candidate),
}


/**
Iterated search of a small k-vertex-critical subgraph.

The first global iteration grows the candidate size from k+2 until a subset of that size is not
(k-1)-colorable, then binary searches a smaller size. Later iterations scan down from
⌈ξ·|best generated|⌉, reusing the subsets found for each size in earlier iterations. Every
candidate is then reduced vertex by vertex while it stays not (k-1)-colorable.
*/
#[derive(Debug)]
pub struct KvcsSearch<'a> {
    /// reference instance
    pub(crate) inst: &'a dyn ColoringInstance,
    /// parameters
    pub(crate) params: Params,
    /// global timer
    pub(crate) timer: Timer,
    /// random number generator of the search
    pub(crate) rng: StdRng,
    /// colorability oracle
    pub(crate) oracle: ColoringOracle<'a>,
    /// constructive algorithms
    pub(crate) constructor: Constructor<'a>,
    /// tabu search on fixed size subgraphs
    pub(crate) local_search: LocalSearch,
    /// best candidates
    pub(crate) incumbent: Incumbent,
    /// statistics
    pub(crate) stats: Stats,
    /// sureness of "the whole graph is not (k-1)-colorable"
    pub(crate) full_sure: bool,
    /// current global iteration
    pub(crate) global_iter: usize,
}

impl<'a> KvcsSearch<'a> {
    /// search on inst, bounded by the timer
    pub fn new(inst:&'a dyn ColoringInstance, params:Params, timer:Timer) -> Result<Self, KvcsError> {
        params.validate()?;
        let seed = params.seed_or_clock();
        log::debug!("seed: {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let oracle = ColoringOracle::new(inst, &params, rng.gen());
        let constructor = Constructor::new(inst, params.construction, params.alpha, params.k);
        let local_search = LocalSearch::new(&params, inst.nb_vertices());
        Ok(Self {
            inst,
            params,
            timer,
            rng,
            oracle,
            constructor,
            local_search,
            incumbent: Incumbent::new(inst.nb_vertices()),
            stats: Stats::default(),
            full_sure: false,
            global_iter: 0,
        })
    }

    /// statistics collected so far
    pub fn stats(&self) -> &Stats { &self.stats }

    /// best candidates found so far
    pub fn incumbent(&self) -> &Incumbent { &self.incumbent }

    /// offers a candidate to the incumbent
    pub(crate) fn offer(&mut self, members:&[VertexId], chroma:bool, crit:bool) -> bool {
        let elapsed = self.timer.elapsed_secs();
        self.incumbent.offer(members, chroma, crit, self.global_iter, elapsed)
    }

    fn outcome(&mut self) -> SearchOutcome {
        self.stats.iter_to_best = self.incumbent.last_improvement_iter();
        self.stats.time_to_best = self.incumbent.time_to_best();
        self.stats.max_iter_diff = self.incumbent.max_iter_diff();
        self.stats.min_size_exact_timeout = self.oracle.min_size_exact_timeout();
        self.stats.time = self.timer.elapsed_secs();
        match self.incumbent.best() {
            None => SearchOutcome::Undecided,
            Some(best) => SearchOutcome::Found(best.clone()),
        }
    }

    /** runs the whole search: initial clique, check that the graph is not (k-1)-colorable,
    then the iterated search. */
    pub fn run(&mut self) -> SearchOutcome {
        let k = self.params.k;
        let n = self.inst.nb_vertices();
        if n < k {
            log::info!("fewer than {} vertices: no {}-VCS", k, k);
            self.stats.infeasible = true;
            return SearchOutcome::Infeasible;
        }
        if self.clique_answer() {
            return self.outcome();
        }
        let all:Vec<VertexId> = self.inst.vertices().collect();
        let verdict = self.oracle.check_colorability(k-1, &all, &self.timer, &mut self.stats);
        if verdict.colorable {
            if verdict.sure {
                log::info!("the graph is {}-colorable: no {}-VCS", k-1, k);
                self.stats.infeasible = true;
                return SearchOutcome::Infeasible;
            }
            log::warn!("timed out before testing whether the graph contains a {}-VCS", k);
            return SearchOutcome::Undecided;
        }
        self.full_sure = verdict.sure;
        self.offer(&all, self.full_sure, false);
        self.refine();
        self.outcome()
    }

    /** looks for a k-clique, offers it if found. */
    fn clique_answer(&mut self) -> bool {
        let k = self.params.k;
        let clique_timer = self.timer.child(self.params.clique_time);
        let clique = max_clique(self.inst, k, &clique_timer, &mut self.rng);
        self.stats.initial_clique_size = clique.len();
        log::info!("initial clique: {}", clique.len());
        if clique.len() >= k {
            self.offer(&clique[..k], true, true);
            return true;
        }
        false
    }

    /** only reduces the (shuffled) whole vertex set, unless a k-clique is found. */
    pub fn run_reduction_only(&mut self) -> SearchOutcome {
        if self.clique_answer() {
            return self.outcome();
        }
        let mut all:Vec<VertexId> = self.inst.vertices().collect();
        all.shuffle(&mut self.rng);
        self.global_iter = 1;
        let reduction = self.reduce(all, false);
        self.offer(&reduction.members, reduction.chroma, reduction.crit);
        self.outcome()
    }

    /// scans sizes down from ub while they succeed, returns the smallest success
    fn scan_down(&mut self, ub:usize, cache:&mut HashMap<usize, (Vec<VertexId>, bool)>) -> Option<(Vec<VertexId>, bool)> {
        let k = self.params.k;
        let mut found = None;
        for (i,size) in (k+2..=ub).rev().enumerate() {
            if self.timer.timed_out() { break; }
            log::debug!("trying size {} (iteration {}.{})", size, self.global_iter, i+1);
            if let Some(hit) = cache.get(&size) {
                log::debug!("already cached (sure: {})", hit.1);
                found = Some(hit.clone());
                continue;
            }
            let timer = self.timer;
            match self.find_k_vcs_fixed_size(size, &timer) {
                Some(res) => {
                    log::debug!("found a candidate of size {} (sure: {})", size, res.1);
                    cache.insert(size, res.clone());
                    found = Some(res);
                }
                None => break,
            }
        }
        found
    }

    /// records a generated candidate, reduces it, and offers the result
    fn process_generated(&mut self, mut subset:Vec<VertexId>, chroma:bool) {
        subset.sort_unstable();
        let generated_size = subset.len();
        self.incumbent.offer_generated(&subset, chroma);
        self.offer(&subset, chroma, false);
        let (mut members, mut final_chroma, mut crit) = (subset, chroma, false);
        if self.params.postprocess {
            let Reduction { members:reduced, chroma:reduced_chroma, crit:reduced_crit, .. } =
                self.reduce(members.clone(), chroma);
            if (!reduced_chroma, !reduced_crit, reduced.len()) < (!final_chroma, true, members.len()) {
                members = reduced;
                final_chroma = reduced_chroma;
                crit = reduced_crit;
            }
        }
        self.offer(&members, final_chroma, crit);
        log::info!(">> global iteration #{}: generated {} (best {}), final {} (best {}), chroma: {}, crit: {}",
            self.global_iter, generated_size, self.incumbent.best_gen_size(),
            members.len(), self.incumbent.best_size(), final_chroma, crit);
    }

    /** iterated search (after the initial checks).
    A first phase ending on the whole vertex set still gets one reduction before the loop stops. */
    fn refine(&mut self) {
        let n = self.inst.nb_vertices();
        let k = self.params.k;
        let mut cache:HashMap<usize, (Vec<VertexId>, bool)> = HashMap::new();
        self.global_iter = 1;
        while self.global_iter <= self.params.max_iter && !self.timer.timed_out() {
            let timer = self.timer;
            let generated = if self.global_iter == 1 {
                if self.params.first_phase {
                    Some(self.find_k_vcs(&timer))
                } else {
                    Some((self.inst.vertices().collect(), self.full_sure))
                }
            } else {
                if self.global_iter - self.incumbent.last_improvement_iter() > self.params.imax {
                    break;
                }
                let ub = n.min((self.params.xi * self.incumbent.best_gen_size() as f64).ceil() as usize);
                if k+2 <= ub && ub <= n {
                    self.scan_down(ub, &mut cache)
                } else {
                    Some(self.find_k_vcs(&timer))
                }
            };
            match generated {
                None => log::info!(">> global iteration #{}: nothing generated (best {})",
                    self.global_iter, self.incumbent.best_size()),
                Some((subset, chroma)) => {
                    cache.remove(&subset.len());
                    let full = subset.len() == n;
                    self.process_generated(subset, chroma);
                    if self.global_iter == 1 {
                        self.stats.gen_best_first_phase = self.incumbent.best_gen_size();
                        self.stats.fin_best_first_phase = self.incumbent.best_size();
                        if full && self.params.first_phase { break; }
                    }
                }
            }
            if self.incumbent.best_size() <= k+2 { break; }
            self.global_iter += 1;
        }
        self.stats.global_iter = self.global_iter;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::compact_instance::CompactInstance;

    fn run_on(inst:&CompactInstance, params:Params) -> (SearchOutcome, Stats) {
        let mut search = KvcsSearch::new(inst, params, Timer::new(20.)).unwrap();
        let outcome = search.run();
        (outcome, search.stats().clone())
    }

    #[test]
    fn test_invalid_params() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        let params = Params { k: 0, ..Params::default() };
        assert!(KvcsSearch::new(&inst, params, Timer::new(1.)).is_err());
    }

    #[test]
    fn test_clique_answer() {
        let inst = CompactInstance::from_file("insts/k4.col").unwrap();
        let (outcome, stats) = run_on(&inst, Params { k: 3, seed: 1, ..Params::default() });
        match outcome {
            SearchOutcome::Found(c) => {
                assert_eq!(c.members.len(), 3);
                assert!(c.chroma && c.crit);
            }
            _ => panic!("expected a triangle"),
        }
        assert_eq!(stats.initial_clique_size, 3);
    }

    #[test]
    fn test_bipartite_infeasible() {
        let inst = CompactInstance::from_file("insts/c6.col").unwrap();
        let (outcome, stats) = run_on(&inst, Params { k: 3, seed: 1, ..Params::default() });
        assert_eq!(outcome, SearchOutcome::Infeasible);
        assert!(stats.infeasible);
    }

    #[test]
    fn test_myciel3() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let params = Params { k: 4, seed: 3, max_iter: 5, ..Params::default() };
        let (outcome, stats) = run_on(&inst, params);
        match outcome {
            SearchOutcome::Found(c) => {
                // the Grötzsch graph is 4-critical
                assert_eq!(c.members.len(), 11);
                assert!(c.chroma);
                assert!(c.crit);
            }
            _ => panic!("expected a candidate"),
        }
        assert!(stats.global_iter >= 1);
        assert!(stats.nb_coloring_calls > 0);
    }

    #[test]
    fn test_exact_timeouts_reported() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let params = Params { k: 4, seed: 3, exact_time: 0., heuristic_time: 0.05, max_iter: 1, ..Params::default() };
        let (outcome, stats) = run_on(&inst, params);
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert!(stats.nb_exact_timeouts > 0);
        // the whole graph times out first, smaller subsets may lower the bound
        assert!(stats.min_size_exact_timeout.map_or(false, |s| s <= 11));
    }

    #[test]
    fn test_reduction_only() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let mut search = KvcsSearch::new(&inst, Params { k: 3, seed: 2, ..Params::default() }, Timer::new(10.)).unwrap();
        match search.run_reduction_only() {
            SearchOutcome::Found(c) => {
                assert_eq!(c.members.len(), 5);
                assert!(c.chroma && c.crit);
            }
            o => panic!("unexpected outcome {:?}", o),
        }
    }
}
