use rand::Rng;

/**
Reservoir sampling over a stream of equally good candidates: the i-th candidate considered
replaces the current choice with probability 1/i, so that every candidate is finally kept
with the same probability.
*/
#[derive(Debug, Clone, Default)]
pub struct ReservoirSampling {
    /// number of candidates considered since the last reset
    num: usize,
}

impl ReservoirSampling {
    /// returns true iff the new candidate should replace the current one
    pub fn consider<R:Rng>(&mut self, rng:&mut R) -> bool {
        self.num += 1;
        rng.gen_range(0..self.num) == 0
    }

    /// forgets the candidates seen so far
    pub fn reset(&mut self) { self.num = 0; }
}
