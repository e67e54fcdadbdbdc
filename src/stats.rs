use serde::Serialize;

/** counters collected during a run (exported as JSON) */
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    /// fixed-size searches started
    pub nb_size_attempts: usize,
    /// fixed-size searches that found a candidate
    pub nb_size_successes: usize,
    /// subsets generated (construction or random BFS)
    pub nb_generated_subsets: usize,
    /// local searches run
    pub nb_local_searches: usize,
    /// moves applied by the local searches
    pub nb_local_search_moves: usize,
    /// sum of the edge counts of the constructed subgraphs
    pub total_construction_edges: usize,
    /// calls to the coloring oracle
    pub nb_coloring_calls: usize,
    /// exact calls that found a coloring
    pub nb_exact_colorable: usize,
    /// exact calls that proved no coloring exists
    pub nb_exact_not_colorable: usize,
    /// exact calls that timed out
    pub nb_exact_timeouts: usize,
    /// heuristic calls that found a coloring
    pub nb_heuristic_colorable: usize,
    /// smallest subset size on which the exact solver timed out
    pub min_size_exact_timeout: Option<usize>,
    /// heuristic calls that failed
    pub nb_heuristic_failures: usize,
    /// time spent in the coloring algorithms (seconds)
    pub coloring_time: f64,
    /// witnesses that did not match the subset they color
    pub nb_invalid_witnesses: usize,
    /// vertices marked critical by the forced color argument
    pub nb_trivially_critical: usize,
    /// post-processing runs
    pub nb_postprocessing: usize,
    /// vertices removed by post-processing
    pub postprocessing_reduced: usize,
    /// time spent in post-processing (seconds)
    pub postprocessing_time: f64,
    /// global iterations run
    pub global_iter: usize,
    /// time to best (seconds)
    pub time_to_best: f64,
    /// iteration of the best
    pub iter_to_best: usize,
    /// largest number of iterations between two improvements
    pub max_iter_diff: usize,
    /// size of the best generated subset after the first phase
    pub gen_best_first_phase: usize,
    /// size of the best final subset after the first phase
    pub fin_best_first_phase: usize,
    /// size of the initial clique
    pub initial_clique_size: usize,
    /// the instance has no k-VCS
    pub infeasible: bool,
    /// chromatic number ≥ k confirmed at the end
    pub confirmed_chroma: bool,
    /// criticality confirmed at the end
    pub confirmed_crit: bool,
    /// time of the chromatic number confirmation (seconds)
    pub confirm_chroma_time: f64,
    /// time of the criticality confirmation (seconds)
    pub confirm_crit_time: f64,
    /// total running time (seconds)
    pub time: f64,
}
