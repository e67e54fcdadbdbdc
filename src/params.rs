//! Parameters of the k-VCS search (defaults follow the values tuned for the DIMACS benchmarks).

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::KvcsError;

/// how subgraphs of a target size are built
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConstructionAlgorithm {
    /// grow from a seed vertex
    Add,
    /// shrink from the full vertex set
    Drop,
    /// add near the lower end of the size range, drop near the upper end
    AddDrop,
}

impl std::str::FromStr for ConstructionAlgorithm {
    type Err = KvcsError;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "drop" => Ok(Self::Drop),
            "adddrop" => Ok(Self::AddDrop),
            _ => Err(KvcsError::InvalidParameter {
                name: "consalg",
                reason: format!("{} not in [add,drop,adddrop]", s),
            }),
        }
    }
}

/// All tunable controls of the search.
#[derive(Debug, Clone)]
pub struct Params {
    /// number of colors k (the search looks for a k-VCS)
    pub k: usize,
    /// global time limit (seconds)
    pub time_limit: f64,
    /// time limit of each heuristic coloring call (seconds)
    pub heuristic_time: f64,
    /// time limit of each exact coloring call (seconds)
    pub exact_time: f64,
    /// time limit of the initial clique search (seconds)
    pub clique_time: f64,
    /// maximum number of global iterations
    pub max_iter: usize,
    /// multiplicative size growth of the first phase (> 1)
    pub mu: f64,
    /// subgraphs generated per size attempt
    pub nb_trials: usize,
    /// relaxation factor of the later phases (upper bound = ⌈ξ·|best generated|⌉)
    pub xi: f64,
    /// maximum number of global iterations without improvement
    pub imax: usize,
    /// constructive algorithm
    pub construction: ConstructionAlgorithm,
    /// randomness of the constructive algorithms, in [0,1]
    pub alpha: f64,
    /// tabu tenure, relative to n
    pub tenure_mult: f64,
    /// maximum number of non-improving local search moves before a perturbation
    pub max_nonimpr: usize,
    /// initial perturbation strength
    pub pmin: usize,
    /// maximum perturbation strength, relative to n
    pub pmax_mult: f64,
    /// perturbation strength increase
    pub pstep: usize,
    /// use the exact coloring algorithm
    pub use_exact: bool,
    /// use the heuristic coloring algorithm
    pub use_heuristic: bool,
    /// reduce every accepted candidate vertex by vertex
    pub postprocess: bool,
    /// run the first (exponential + binary search) phase
    pub first_phase: bool,
    /// build candidates by construction + local search (otherwise by random BFS)
    pub dense_search: bool,
    /// skip local search moves bringing a vertex of degree ≤ k-2 in the subgraph
    pub brooks_pruning: bool,
    /// after the search, confirm criticality with the exact algorithm
    pub confirm_criticality: bool,
    /// run the confirmation even if already proven during the search
    pub force_confirm: bool,
    /// time limit of the confirmation (seconds)
    pub confirm_time: f64,
    /// random seed (0: derived from the clock)
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            k:                   3,
            time_limit:          600.,
            heuristic_time:      0.5,
            exact_time:          1.,
            clique_time:         2.,
            max_iter:            usize::MAX,
            mu:                  1.5,
            nb_trials:           200,
            xi:                  1.08,
            imax:                usize::MAX,
            construction:        ConstructionAlgorithm::AddDrop,
            alpha:               0.1,
            tenure_mult:         0.1,
            max_nonimpr:         10,
            pmin:                1,
            pmax_mult:           1.,
            pstep:               20,
            use_exact:           true,
            use_heuristic:       true,
            postprocess:         true,
            first_phase:         true,
            dense_search:        true,
            brooks_pruning:      true,
            confirm_criticality: false,
            force_confirm:       false,
            confirm_time:        60.,
            seed:                0,
        }
    }
}

impl Params {
    /// checks that the parameters can be used by the search
    pub fn validate(&self) -> Result<(), KvcsError> {
        let invalid = |name:&'static str, reason:&str| -> Result<(), KvcsError> {
            Err(KvcsError::InvalidParameter { name, reason: reason.to_string() })
        };
        if self.k == 0 { return invalid("k", "must be at least 1"); }
        if !(0. ..=1.).contains(&self.alpha) { return invalid("alpha", "must be in [0,1]"); }
        if self.mu <= 1. { return invalid("mu", "must be greater than 1"); }
        if self.nb_trials == 0 { return invalid("R", "must be positive"); }
        if !self.use_exact && !self.use_heuristic {
            return invalid("noheu/noexact", "cannot disable both coloring algorithms");
        }
        if self.time_limit < 0. || self.heuristic_time < 0. || self.exact_time < 0. {
            return invalid("time", "time limits must be non-negative");
        }
        Ok(())
    }

    /// tabu tenure for a graph of n vertices
    pub fn tenure(&self, n:usize) -> usize {
        ((n as f64 * self.tenure_mult) as usize).max(1)
    }

    /// random seed, derived from the clock if 0
    pub fn seed_or_clock(&self) -> u64 {
        if self.seed != 0 { return self.seed; }
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or(1)
    }

    /// maximum perturbation strength for a graph of n vertices
    pub fn pmax(&self, n:usize) -> usize {
        (n as f64 * self.pmax_mult) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = Params::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.nb_trials, 200);
        assert_eq!(p.construction, ConstructionAlgorithm::AddDrop);
        assert_eq!(p.tenure(100), 10);
        assert_eq!(p.tenure(3), 1);
        assert_eq!(p.pmax(50), 50);
    }

    #[test]
    fn invalid_params() {
        let p = Params { k: 0, ..Params::default() };
        assert!(p.validate().is_err());
        let p = Params { alpha: 1.5, ..Params::default() };
        assert!(p.validate().is_err());
        let p = Params { use_exact: false, use_heuristic: false, ..Params::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn parse_construction() {
        assert_eq!("drop".parse::<ConstructionAlgorithm>().unwrap(), ConstructionAlgorithm::Drop);
        assert!("greedy".parse::<ConstructionAlgorithm>().is_err());
    }
}
