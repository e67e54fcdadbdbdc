use crate::color::VertexId;
use crate::search::construction::random_bfs;
use crate::search::refinement::KvcsSearch;
use crate::search::subgraph::Subgraph;
use crate::timer::Timer;

impl<'a> KvcsSearch<'a> {
    /** generates up to R subsets of the given size (construction + local search, or random BFS)
    and returns the first one that is not (k-1)-colorable, with the sureness of the verdict.
    The full vertex set is returned with the sureness of the initial check.
    */
    pub fn find_k_vcs_fixed_size(&mut self, size:usize, timer:&Timer) -> Option<(Vec<VertexId>, bool)> {
        let n = self.inst.nb_vertices();
        let k = self.params.k;
        assert!(k+2 <= size && size <= n, "size {} outside [{},{}]", size, k+2, n);
        if size == n {
            return Some((self.inst.vertices().collect(), self.full_sure));
        }
        self.stats.nb_size_attempts += 1;
        for _ in 0..self.params.nb_trials {
            if timer.timed_out() { break; }
            self.stats.nb_generated_subsets += 1;
            let subset = if self.params.dense_search {
                let members = self.constructor.generate(size, &mut self.rng);
                let mut sg = Subgraph::new(self.inst, members);
                self.stats.total_construction_edges += sg.nb_edges();
                self.stats.nb_local_search_moves += self.local_search.run(&mut sg, timer, &mut self.rng);
                self.stats.nb_local_searches += 1;
                let mut members = sg.into_members();
                members.sort_unstable();
                members
            } else {
                random_bfs(self.inst, size, &mut self.rng)
            };
            let (is_vcs, sure) = self.oracle.is_k_vcs(k, &subset, timer, &mut self.stats);
            if is_vcs {
                self.stats.nb_size_successes += 1;
                return Some((subset, sure));
            }
        }
        None
    }

    /** searches a small subset that is not (k-1)-colorable: tries sizes k+2, then growing by
    a factor mu until a success, then binary searches between the last failing size and the
    success. Returns the full vertex set if no smaller size succeeds.
    */
    pub fn find_k_vcs(&mut self, timer:&Timer) -> (Vec<VertexId>, bool) {
        let n = self.inst.nb_vertices();
        let k = self.params.k;
        let mut size = k+2;
        let mut last = k;
        while size <= n && !timer.timed_out() {
            log::debug!("trying size {}", size);
            if let Some((mut best, mut best_sure)) = self.find_k_vcs_fixed_size(size, timer) {
                log::debug!("found a candidate of size {} (sure: {})", best.len(), best_sure);
                self.offer(&best, best_sure, false);
                let mut lo = (last+1).max(k+2);
                let mut hi = size-1;
                while lo <= hi && !timer.timed_out() {
                    let mid = (lo+hi) / 2;
                    log::debug!("trying size {} (binary search)", mid);
                    match self.find_k_vcs_fixed_size(mid, timer) {
                        Some((subset, sure)) => {
                            hi = mid-1;
                            if subset.len() < best.len() {
                                log::debug!("reduced size to {} (sure: {})", subset.len(), sure);
                                best = subset;
                                best_sure = sure;
                                self.offer(&best, best_sure, false);
                            }
                        }
                        None => lo = mid+1,
                    }
                }
                return (best, best_sure);
            }
            if size == n { break; }
            last = size;
            size = n.min((size+1).max((size as f64 * self.params.mu).ceil() as usize));
        }
        (self.inst.vertices().collect(), self.full_sure)
    }
}


#[cfg(test)]
mod tests {
    use crate::compact_instance::CompactInstance;
    use crate::params::Params;
    use crate::search::refinement::KvcsSearch;
    use crate::timer::Timer;

    fn search_on(inst:&CompactInstance, k:usize) -> KvcsSearch {
        let params = Params { k, seed: 5, ..Params::default() };
        KvcsSearch::new(inst, params, Timer::new(20.)).unwrap()
    }

    #[test]
    fn test_fixed_size_returns_verified_subset() {
        // 5-cycle plus a vertex adjacent to two of its vertices
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let mut search = search_on(&inst, 3);
        let timer = Timer::new(10.);
        let (subset, _) = search.find_k_vcs_fixed_size(5, &timer).unwrap();
        assert_eq!(subset.len(), 5);
        let (is_vcs, sure) = search.oracle.is_k_vcs(3, &subset, &Timer::unlimited(), &mut search.stats);
        assert!(is_vcs && sure);
        assert!(search.stats.nb_size_successes >= 1);
    }

    #[test]
    fn test_fixed_size_full_set() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        let mut search = search_on(&inst, 3);
        let (subset, _) = search.find_k_vcs_fixed_size(5, &Timer::new(1.)).unwrap();
        assert_eq!(subset, vec![0,1,2,3,4]);
    }

    #[test]
    fn test_fixed_size_fails_on_bipartite_sizes() {
        // no 5 vertices of a 6-cycle induce an odd cycle
        let inst = CompactInstance::from_file("insts/c6.col").unwrap();
        let mut search = search_on(&inst, 3);
        assert!(search.find_k_vcs_fixed_size(5, &Timer::new(5.)).is_none());
        assert_eq!(search.stats.nb_size_attempts, 1);
    }

    #[test]
    fn test_find_odd_cycle() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        let mut search = search_on(&inst, 3);
        search.full_sure = true;
        let (subset, sure) = search.find_k_vcs(&Timer::new(5.));
        assert_eq!(subset.len(), 5);
        assert!(sure);
    }

    #[test]
    fn test_find_in_larger_graph() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let mut search = search_on(&inst, 3);
        let (subset, sure) = search.find_k_vcs(&Timer::new(10.));
        assert_eq!(subset.len(), 5);
        assert!(sure);
    }
}
