use rand::Rng;

use crate::color::{ColoringInstance, VertexId};

/** draws vertices with a probability proportional to their degree (uniformly if no edge) */
#[derive(Debug, Clone)]
pub struct DegreeSampler {
    /// cumulated[i]: sum of the degrees of the vertices 0..=i
    cumulated: Vec<usize>,
}

impl DegreeSampler {
    /// builds the sampler of the instance
    pub fn new(inst:&dyn ColoringInstance) -> Self {
        let cumulated = inst.vertices()
            .scan(0, |acc, v| { *acc += inst.degree(v); Some(*acc) })
            .collect();
        Self { cumulated }
    }

    /// draws a vertex (requires a non-empty instance)
    pub fn sample<R:Rng>(&self, rng:&mut R) -> VertexId {
        let total = self.cumulated.last().copied().unwrap_or(0);
        if total == 0 {
            return rng.gen_range(0..self.cumulated.len());
        }
        let r = rng.gen_range(0..total);
        self.cumulated.partition_point(|c| *c <= r)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::compact_instance::CompactInstance;

    #[test]
    fn test_isolated_never_drawn() {
        // star centered on 0 plus an isolated vertex 4
        let inst = CompactInstance::from_edges(5, &[(0,1),(0,2),(0,3)]);
        let sampler = DegreeSampler::new(&inst);
        let mut rng = StdRng::seed_from_u64(3);
        let mut nb_center = 0;
        for _ in 0..600 {
            let v = sampler.sample(&mut rng);
            assert_ne!(v, 4);
            if v == 0 { nb_center += 1; }
        }
        assert!(nb_center > 200 && nb_center < 400);
    }

    #[test]
    fn test_no_edges() {
        let inst = CompactInstance::from_edges(3, &[]);
        let sampler = DegreeSampler::new(&inst);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 { assert!(sampler.sample(&mut rng) < 3); }
    }
}
