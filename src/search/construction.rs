use bit_set::BitSet;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::color::{ColoringInstance, VertexId};
use crate::params::ConstructionAlgorithm;
use crate::search::util::degree_sampler::DegreeSampler;
use crate::search::util::reservoir::ReservoirSampling;


/// relative distance between a degree and the extreme degree (0 if equal)
fn slack(deg:usize, extreme:usize, reference:usize) -> f64 {
    if deg == extreme { 0. } else { (deg as f64 - extreme as f64).abs() / reference as f64 }
}

/** randomized greedy construction by addition.
Starts from the seed vertex, then adds, until size vertices are chosen, a vertex chosen
uniformly among the non-members whose number of neighbors among the members is within
the relative slack alpha of the best one.
*/
pub fn cons_add<R:Rng>(
    inst:&dyn ColoringInstance, size:usize, seed:VertexId, alpha:f64, rng:&mut R
) -> Vec<VertexId> {
    assert!(size <= inst.nb_vertices());
    let mut chosen = BitSet::with_capacity(inst.nb_vertices());
    let mut deg = vec![0 ; inst.nb_vertices()];
    let mut res = Vec::with_capacity(size);
    let mut next = seed;
    let mut reservoir = ReservoirSampling::default();
    while res.len() < size {
        res.push(next);
        chosen.insert(next);
        for v in inst.neighbors(next) { deg[*v] += 1; }
        if res.len() == size { break; }
        let best = match inst.vertices().filter(|v| !chosen.contains(*v)).map(|v| deg[v]).max() {
            None => break,
            Some(d) => d,
        };
        reservoir.reset();
        for v in inst.vertices().filter(|v| !chosen.contains(*v)) {
            if slack(deg[v], best, best) < alpha || deg[v] == best {
                if reservoir.consider(rng) { next = v; }
            }
        }
    }
    res
}

/** randomized greedy construction by removal.
Starts from all the vertices, then removes, until size vertices remain, a vertex chosen
uniformly among the members whose number of neighbors among the members is within
the relative slack alpha of the minimum one.
*/
pub fn cons_drop<R:Rng>(
    inst:&dyn ColoringInstance, size:usize, alpha:f64, rng:&mut R
) -> Vec<VertexId> {
    let mut res:Vec<VertexId> = inst.vertices().collect();
    let mut deg:Vec<usize> = inst.vertices().map(|v| inst.degree(v)).collect();
    let mut reservoir = ReservoirSampling::default();
    while res.len() > size {
        let worst = res.iter().map(|v| deg[*v]).min().unwrap_or(0);
        reservoir.reset();
        let mut pos = 0;
        for (i,v) in res.iter().enumerate() {
            if (deg[*v] == worst || slack(deg[*v], worst, deg[*v]) < alpha)
                && reservoir.consider(rng) {
                pos = i;
            }
        }
        let removed = res.swap_remove(pos);
        for v in inst.neighbors(removed) { deg[*v] -= 1; }
    }
    res
}

/** random breadth-first sample: starting from a random vertex, repeatedly extracts a random
vertex of the frontier. If the connected component is too small, returns a uniform sample. */
pub fn random_bfs<R:Rng>(inst:&dyn ColoringInstance, size:usize, rng:&mut R) -> Vec<VertexId> {
    let n = inst.nb_vertices();
    assert!(size <= n);
    let start = rng.gen_range(0..n);
    let mut visited = BitSet::with_capacity(n);
    visited.insert(start);
    let mut frontier = vec![start];
    let mut res = Vec::with_capacity(size);
    while !frontier.is_empty() {
        let v = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        res.push(v);
        if res.len() >= size { return res; }
        for u in inst.neighbors(v) {
            if visited.insert(*u) { frontier.push(*u); }
        }
    }
    let mut all:Vec<VertexId> = inst.vertices().collect();
    all.shuffle(rng);
    all.truncate(size);
    all
}


/** chooses the constructive algorithm for each target size */
#[derive(Debug)]
pub struct Constructor<'a> {
    /// reference instance
    inst: &'a dyn ColoringInstance,
    /// constructive algorithm
    algorithm: ConstructionAlgorithm,
    /// randomness of the construction
    alpha: f64,
    /// smallest size worth constructing (k+2)
    min_size: usize,
    /// seed sampler for the addition
    sampler: DegreeSampler,
}

impl<'a> Constructor<'a> {
    /// constructor for the k-VCS search with k colors
    pub fn new(inst:&'a dyn ColoringInstance, algorithm:ConstructionAlgorithm, alpha:f64, k:usize) -> Self {
        Self { inst, algorithm, alpha, min_size: k+2, sampler: DegreeSampler::new(inst) }
    }

    /** in adddrop mode, sizes below lo are built by addition, above hi by removal,
    and in between by removal with a probability growing with the size. */
    fn use_drop<R:Rng>(&self, size:usize, rng:&mut R) -> bool {
        match self.algorithm {
            ConstructionAlgorithm::Add => false,
            ConstructionAlgorithm::Drop => true,
            ConstructionAlgorithm::AddDrop => {
                let range = self.inst.nb_vertices().saturating_sub(self.min_size) as f64;
                let lo = self.min_size + (0.25 * range) as usize;
                let hi = self.min_size + (0.75 * range) as usize;
                if size < lo { false }
                else if size > hi { true }
                else { rng.gen_range(lo..=hi) < size }
            }
        }
    }

    /// builds a subset of the given size
    pub fn generate<R:Rng>(&self, size:usize, rng:&mut R) -> Vec<VertexId> {
        if self.use_drop(size, rng) {
            cons_drop(self.inst, size, self.alpha, rng)
        } else {
            let seed = self.sampler.sample(rng);
            cons_add(self.inst, size, seed, self.alpha, rng)
        }
    }
}
