use bit_set::BitSet;
use rand::Rng;

use crate::color::{ColoringInstance, VertexId};
use crate::compact_instance::CompactInstance;
use crate::params::Params;
use crate::search::refinement::KvcsSearch;
use crate::search::util::reservoir::ReservoirSampling;
use crate::solvers::coloring::backtracking_dsatur::{is_k_colorable_exact, ExactOutcome};
use crate::timer::Timer;


/**
Marks critical the vertices that are the only "forced" vertex of their color.
A vertex is forced if its neighborhood in the subset sees every other color of the k-coloring.
All the other vertices of its color can be recolored at once, so removing it leaves a
(k-1)-coloring.

colors[i] is the color of subset[i]. Returns the number of newly marked vertices.
*/
pub fn mark_trivially_critical(
    inst:&dyn ColoringInstance, subset:&[VertexId], colors:&[usize], k:usize, critical:&mut BitSet
) -> usize {
    let mut position:Vec<Option<usize>> = vec![None ; inst.nb_vertices()];
    for (i,v) in subset.iter().enumerate() { position[*v] = Some(i); }
    let mut nb_forced = vec![0 ; k];
    let mut forced:Vec<Option<VertexId>> = vec![None ; k];
    let mut seen = BitSet::with_capacity(k);
    for (i,u) in subset.iter().enumerate() {
        seen.clear();
        for w in inst.neighbors(*u) {
            if let Some(j) = position[*w] { seen.insert(colors[j]); }
        }
        let can_change = (0..k).any(|c| c != colors[i] && !seen.contains(c));
        if !can_change {
            nb_forced[colors[i]] += 1;
            forced[colors[i]] = Some(*u);
        }
    }
    let mut nb_marked = 0;
    for c in 0..k {
        if nb_forced[c] == 1 {
            if let Some(u) = forced[c] {
                if critical.insert(u) { nb_marked += 1; }
            }
        }
    }
    if nb_marked > 0 {
        log::trace!("marked {} new vertices as critical (total: {})", nb_marked, critical.len());
    }
    nb_marked
}

/**
Chooses the next vertex to try removing: the non-critical vertex minimizing the number of its
neighbors in the subset, critical neighbors weighing as much as all the edges. Ties are broken
uniformly. Returns its position in subset, None if every vertex is critical.
*/
pub fn choose_vertex<R:Rng>(
    inst:&dyn ColoringInstance, subset:&[VertexId], critical:&BitSet, rng:&mut R
) -> Option<usize> {
    let inside:BitSet = subset.iter().cloned().collect();
    let heavy = inst.nb_edges().max(1);
    let mut best:Option<(usize, usize)> = None;
    let mut reservoir = ReservoirSampling::default();
    for (i,u) in subset.iter().enumerate().filter(|(_,u)| !critical.contains(**u)) {
        let score:usize = inst.neighbors(*u).iter()
            .filter(|w| inside.contains(**w))
            .map(|w| if critical.contains(*w) { heavy } else { 1 })
            .sum();
        match best {
            Some((_, b)) if score > b => {},
            Some((_, b)) if score == b => {
                if reservoir.consider(rng) { best = Some((i, score)); }
            },
            _ => {
                best = Some((i, score));
                reservoir.reset();
                reservoir.consider(rng);
            }
        }
    }
    best.map(|(i,_)| i)
}


/** result of the reduction of a candidate */
#[derive(Debug, Clone)]
pub struct Reduction {
    /// remaining vertices
    pub members: Vec<VertexId>,
    /// the remaining vertices are proven not (k-1)-colorable
    pub chroma: bool,
    /// every remaining vertex is proven critical
    pub crit: bool,
    /// vertices proven critical
    pub critical: BitSet,
    /// every remaining vertex was either removed or proven critical before the time limit
    pub completed: bool,
}


impl<'a> KvcsSearch<'a> {
    /** reduces a subset believed not (k-1)-colorable: repeatedly removes a non-critical
    vertex, keeps it out if the remainder is still not (k-1)-colorable, marks it critical otherwise.
    */
    pub fn reduce(&mut self, members:Vec<VertexId>, chroma:bool) -> Reduction {
        let k = self.params.k;
        let timer = self.timer;
        let clock = Timer::unlimited();
        let initial_size = members.len();
        self.stats.nb_postprocessing += 1;
        log::debug!("trying to reduce a subset of size {} (chroma: {})", initial_size, chroma);
        if members.len() <= k {
            let critical = members.iter().cloned().collect();
            return Reduction { members, chroma: true, crit: true, critical, completed: true };
        }
        let mut subset = members;
        let mut critical = BitSet::with_capacity(self.inst.nb_vertices());
        if let Some(colors) = self.oracle.check_colorability(k, &subset, &timer, &mut self.stats).witness {
            self.stats.nb_trivially_critical +=
                mark_trivially_critical(self.inst, &subset, &colors, k, &mut critical);
        }
        let mut chroma = chroma;
        let mut all_sure = true;
        let mut completed = false;
        while !timer.timed_out() {
            let i = match choose_vertex(self.inst, &subset, &critical, &mut self.rng) {
                None => { completed = true; break; }
                Some(i) => i,
            };
            let v = subset.swap_remove(i);
            let verdict = self.oracle.check_colorability(k-1, &subset, &timer, &mut self.stats);
            if timer.timed_out() || verdict.colorable {
                // v stays, at its position
                subset.push(v);
                let last = subset.len()-1;
                subset.swap(i, last);
                if timer.timed_out() { break; }
                all_sure &= verdict.sure;
                if let Some(colors) = verdict.witness {
                    let mut remainder = subset.clone();
                    remainder.swap_remove(i);
                    self.stats.nb_trivially_critical +=
                        mark_trivially_critical(self.inst, &remainder, &colors, k-1, &mut critical);
                }
                critical.insert(v);
            } else {
                all_sure &= verdict.sure;
                chroma = verdict.sure;
                log::debug!("removed {} (chroma: {}), size {} -> {}", v, chroma, subset.len()+1, subset.len());
                self.offer(&subset, chroma, false);
            }
        }
        let crit = completed && all_sure;
        self.stats.postprocessing_reduced += initial_size - subset.len();
        self.stats.postprocessing_time += clock.elapsed_secs();
        self.offer(&subset, chroma, crit);
        Reduction { members: subset, chroma, crit, critical, completed }
    }
}


/** result of the final confirmation */
#[derive(Debug, Clone, Default)]
pub struct Confirmation {
    /// the candidate is proven not (k-1)-colorable
    pub chroma: bool,
    /// every vertex of the candidate is proven critical
    pub crit: bool,
    /// time spent confirming the chromatic number (seconds)
    pub chroma_time: f64,
    /// time spent confirming the criticality (seconds)
    pub crit_time: f64,
}

/**
Confirms with the exact solver that the candidate is not (k-1)-colorable, then that removing
any of its vertices makes it (k-1)-colorable. Runs only if asked (confirm_criticality) or
forced (force_confirm); otherwise reports what the search already proved.
n is the number of vertices of the searched graph (the whole graph is known not (k-1)-colorable).
*/
pub fn confirm_criticality(
    inst:&dyn ColoringInstance, n:usize, members:&[VertexId], chroma:bool, crit:bool, params:&Params
) -> Confirmation {
    let k = params.k;
    let chroma = chroma || members.len() == n || members.len() == k;
    let crit = crit || members.len() == k;
    let mut res = Confirmation { chroma, crit: chroma && crit, ..Confirmation::default() };
    if !(params.force_confirm || (params.confirm_criticality && members.len() >= k)) {
        return res;
    }
    log::info!("confirming the criticality of a subset of size {} ({}s)", members.len(), params.confirm_time);
    let chroma_timer = Timer::new(params.confirm_time);
    if params.force_confirm || !chroma {
        let sub = CompactInstance::induced(inst, members);
        res.chroma = is_k_colorable_exact(&sub, k-1, &chroma_timer) == ExactOutcome::NotColorable;
    }
    res.chroma_time = chroma_timer.elapsed_secs();
    res.crit = crit;
    let crit_timer = Timer::new(params.confirm_time);
    if params.force_confirm || (res.chroma && !crit) {
        let per_vertex_time = (members.len() as f64 / params.confirm_time).max(0.5);
        res.crit = true;
        for i in 0..members.len() {
            if crit_timer.timed_out() {
                res.crit = false;
                break;
            }
            let mut remainder = members.to_vec();
            remainder.remove(i);
            let sub = CompactInstance::induced(inst, &remainder);
            let outcome = is_k_colorable_exact(&sub, k-1, &Timer::new(per_vertex_time));
            if !matches!(outcome, ExactOutcome::Colorable(_)) {
                res.crit = false;
                break;
            }
        }
    }
    res.crit_time = crit_timer.elapsed_secs();
    log::info!("solution {} critical, and {} chromatic number >= {} ({:.2}s + {:.2}s)",
        if res.crit { "is" } else { "may not be" },
        if res.chroma { "has" } else { "may not have" },
        k, res.chroma_time, res.crit_time);
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn search_on(inst:&CompactInstance, k:usize) -> KvcsSearch {
        let params = Params { k, seed: 9, ..Params::default() };
        KvcsSearch::new(inst, params, Timer::new(20.)).unwrap()
    }

    #[test]
    fn test_forced_color() {
        // triangle 0-1-2 plus pendant 3 on 0, colored 0:0 1:1 2:2 3:1
        let inst = CompactInstance::from_edges(4, &[(0,1),(1,2),(0,2),(0,3)]);
        let mut critical = BitSet::new();
        let nb = mark_trivially_critical(&inst, &[0,1,2,3], &[0,1,2,1], 3, &mut critical);
        // 0, 1 and 2 see both other colors, 3 can take color 2
        assert_eq!(nb, 3);
        assert!(critical.contains(0) && critical.contains(1) && critical.contains(2));
        assert!(!critical.contains(3));
        let nb = mark_trivially_critical(&inst, &[0,1,2,3], &[0,1,2,1], 3, &mut critical);
        assert_eq!(nb, 0);
    }

    #[test]
    fn test_choose_vertex() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let all:Vec<VertexId> = inst.vertices().collect();
        let mut critical = BitSet::new();
        for v in &[0,2,3,4] { critical.insert(*v); }
        // 1 and 5 both see two critical vertices
        let i = choose_vertex(&inst, &all, &critical, &mut rng).unwrap();
        assert!(all[i] == 1 || all[i] == 5);
        critical.insert(1);
        critical.insert(5);
        assert_eq!(choose_vertex(&inst, &all, &critical, &mut rng), None);
    }

    #[test]
    fn test_reduce_to_odd_cycle() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let mut search = search_on(&inst, 3);
        let reduction = search.reduce(inst.vertices().collect(), true);
        assert_eq!(reduction.members.len(), 5);
        assert!(reduction.chroma);
        assert!(reduction.crit);
        assert!(reduction.completed);
        for v in &reduction.members {
            assert!(reduction.critical.contains(*v));
        }
        assert_eq!(search.stats.postprocessing_reduced, 1);
    }

    #[test]
    fn test_reduce_every_remaining_vertex_accounted() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let mut search = search_on(&inst, 4);
        let reduction = search.reduce(inst.vertices().collect(), true);
        assert_eq!(reduction.members.len(), 11);
        assert!(reduction.completed && reduction.crit);
        let sub = CompactInstance::induced(&inst, &reduction.members);
        for i in 0..reduction.members.len() {
            let mut remainder = reduction.members.clone();
            remainder.remove(i);
            let sub_i = CompactInstance::induced(&inst, &remainder);
            assert!(matches!(is_k_colorable_exact(&sub_i, 3, &Timer::unlimited()), ExactOutcome::Colorable(_)));
        }
        assert_eq!(is_k_colorable_exact(&sub, 3, &Timer::unlimited()), ExactOutcome::NotColorable);
    }

    #[test]
    fn test_reduce_with_expired_timer() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let params = Params { k: 3, seed: 9, ..Params::default() };
        let mut search = KvcsSearch::new(&inst, params, Timer::new(0.)).unwrap();
        let reduction = search.reduce(inst.vertices().collect(), true);
        assert_eq!(reduction.members.len(), 6);
        assert!(!reduction.completed);
        assert!(!reduction.crit);
    }

    #[test]
    fn test_confirmation() {
        let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
        let params = Params { k: 3, force_confirm: true, confirm_time: 10., ..Params::default() };
        let c = confirm_criticality(&inst, 6, &[0,1,2,3,4], false, false, &params);
        assert!(c.chroma && c.crit);
        // the whole graph is not critical: removing 1 leaves an odd cycle
        let c = confirm_criticality(&inst, 7, &[0,1,2,3,4,5], false, false, &params);
        assert!(c.chroma && !c.crit);
        let params = Params { k: 3, ..Params::default() };
        let c = confirm_criticality(&inst, 6, &[0,1,2,3,4], true, false, &params);
        assert!(c.chroma && !c.crit);
    }
}
