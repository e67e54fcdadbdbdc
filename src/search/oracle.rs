use crate::color::{checker, colors_to_solution, CheckerResult, ColoringInstance, VertexId};
use crate::compact_instance::CompactInstance;
use crate::params::Params;
use crate::solvers::coloring::backtracking_dsatur::{is_k_colorable_exact, ExactOutcome};
use crate::solvers::coloring::tabucol::tabucol;
use crate::stats::Stats;
use crate::timer::Timer;


/** answer of the coloring oracle */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// the subset is believed to be k-colorable
    pub colorable: bool,
    /// the verdict is proven (exact answer, or coloring found)
    pub sure: bool,
    /// witness[i]: color of the i-th vertex of the subset (when a coloring was found)
    pub witness: Option<Vec<usize>>,
}

impl Verdict {
    fn unsure(colorable:bool) -> Self { Self { colorable, sure: false, witness: None } }
}


/**
Colorability oracle over subsets of the instance vertices. Runs the exact solver under its own
time budget, then falls back to the heuristic solver. Remembers the smallest subset size on which
the exact solver timed out, and skips it on subsets at least as large.
*/
#[derive(Debug)]
pub struct ColoringOracle<'a> {
    /// reference instance
    inst: &'a dyn ColoringInstance,
    /// use the exact solver
    use_exact: bool,
    /// use the heuristic solver
    use_heuristic: bool,
    /// time budget of each exact call
    exact_time: f64,
    /// time budget of each heuristic call
    heuristic_time: f64,
    /// smallest subset size for which the exact solver timed out
    min_size_exact_timeout: usize,
    /// random number generator of the heuristic solver
    rng: fastrand::Rng,
}

impl<'a> ColoringOracle<'a> {
    /// oracle over the subsets of inst
    pub fn new(inst:&'a dyn ColoringInstance, params:&Params, seed:u64) -> Self {
        Self {
            inst,
            use_exact: params.use_exact,
            use_heuristic: params.use_heuristic,
            exact_time: params.exact_time,
            heuristic_time: params.heuristic_time,
            min_size_exact_timeout: usize::MAX,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// smallest subset size on which the exact solver timed out (if any)
    pub fn min_size_exact_timeout(&self) -> Option<usize> {
        if self.min_size_exact_timeout == usize::MAX { None } else { Some(self.min_size_exact_timeout) }
    }

    /** decides whether the subgraph induced by subset is k-colorable.
    If the timer is already expired, answers (colorable, unsure).
    */
    pub fn check_colorability(
        &mut self, k:usize, subset:&[VertexId], timer:&Timer, stats:&mut Stats
    ) -> Verdict {
        stats.nb_coloring_calls += 1;
        if timer.timed_out() { return Verdict::unsure(true); }
        let clock = Timer::unlimited();
        let sub = CompactInstance::induced(self.inst, subset);
        let verdict = self.run_solvers(&sub, k, timer, stats);
        stats.coloring_time += clock.elapsed_secs();
        log::trace!("oracle: |S|={} k={} colorable:{} sure:{}",
            subset.len(), k, verdict.colorable, verdict.sure);
        match verdict.witness {
            Some(ref witness) if !is_valid_witness(&sub, k, witness) => {
                stats.nb_invalid_witnesses += 1;
                log::warn!("oracle: discarding an invalid {}-coloring witness", k);
                Verdict::unsure(true)
            }
            _ => verdict,
        }
    }

    fn run_solvers(&mut self, sub:&CompactInstance, k:usize, timer:&Timer, stats:&mut Stats) -> Verdict {
        let size = sub.nb_vertices();
        if self.use_exact && size < self.min_size_exact_timeout {
            match is_k_colorable_exact(sub, k, &timer.child(self.exact_time)) {
                ExactOutcome::Colorable(witness) => {
                    stats.nb_exact_colorable += 1;
                    return Verdict { colorable: true, sure: true, witness: Some(witness) };
                }
                ExactOutcome::NotColorable => {
                    stats.nb_exact_not_colorable += 1;
                    return Verdict { colorable: false, sure: true, witness: None };
                }
                ExactOutcome::TimedOut => {
                    stats.nb_exact_timeouts += 1;
                    if !timer.timed_out() {
                        self.min_size_exact_timeout = size;
                    }
                }
            }
        }
        if self.use_heuristic {
            match tabucol(sub, k, &timer.child(self.heuristic_time), &mut self.rng) {
                Some(witness) => {
                    stats.nb_heuristic_colorable += 1;
                    return Verdict { colorable: true, sure: true, witness: Some(witness) };
                }
                None => stats.nb_heuristic_failures += 1,
            }
        }
        // no proof either way: believed not colorable only if the heuristic had its chance
        Verdict::unsure(timer.timed_out() || !self.use_heuristic)
    }

    /// (subset is not (k-1)-colorable, sureness of the answer)
    pub fn is_k_vcs(&mut self, k:usize, subset:&[VertexId], timer:&Timer, stats:&mut Stats) -> (bool, bool) {
        assert!(k >= 1);
        let verdict = self.check_colorability(k-1, subset, timer, stats);
        (!verdict.colorable, verdict.sure)
    }
}

/// true iff witness is a proper coloring of inst with at most k colors
fn is_valid_witness(inst:&dyn ColoringInstance, k:usize, witness:&[usize]) -> bool {
    witness.len() == inst.nb_vertices()
        && witness.iter().all(|c| *c < k)
        && matches!(checker(inst, &colors_to_solution(witness)), CheckerResult::Ok(_))
}
