use crate::color::VertexId;

/** candidate k-VCS */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// vertices of the candidate
    pub members: Vec<VertexId>,
    /// proven not (k-1)-colorable
    pub chroma: bool,
    /// proven that every vertex is critical
    pub crit: bool,
}

impl Candidate {
    /// ordering key: sure before unsure, critical before non-critical, then smaller first
    fn key(&self) -> (bool, bool, usize) {
        (!self.chroma, !self.crit, self.members.len())
    }
}


/**
Best candidates of the search: the best final one (after reduction), and the best generated one
(before reduction, ordered by sureness then size). Also records when the final one improved.
*/
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// number of vertices of the instance
    n: usize,
    /// best final candidate
    best: Option<Candidate>,
    /// best generated candidate and its sureness
    best_gen: Option<(Vec<VertexId>, bool)>,
    /// global iteration of the last improvement
    last_improvement_iter: usize,
    /// time of the last improvement (seconds)
    time_to_best: f64,
    /// largest number of iterations between two improvements
    max_iter_diff: usize,
}

impl Incumbent {
    /// empty incumbent for an instance of n vertices
    pub fn new(n:usize) -> Self {
        Self {
            n,
            best: None,
            best_gen: None,
            last_improvement_iter: 0,
            time_to_best: 0.,
            max_iter_diff: 0,
        }
    }

    /** offers a final candidate found at global iteration iter and time elapsed.
    A candidate as large as the instance is replaced by any smaller one.
    Returns true iff it becomes the best. */
    pub fn offer(&mut self, members:&[VertexId], chroma:bool, crit:bool, iter:usize, elapsed:f64) -> bool {
        let candidate = Candidate { members: members.to_vec(), chroma, crit };
        let better = match &self.best {
            None => true,
            Some(best) => {
                (best.members.len() == self.n && !members.is_empty() && members.len() < self.n)
                    || candidate.key() < best.key()
            }
        };
        if better {
            log::info!("new best: |S|={} chroma:{} crit:{} (iteration {}, {:.2}s)",
                members.len(), chroma, crit, iter, elapsed);
            self.max_iter_diff = self.max_iter_diff.max(iter - self.last_improvement_iter.min(iter));
            self.last_improvement_iter = iter;
            self.time_to_best = elapsed;
            self.best = Some(candidate);
        }
        better
    }

    /// offers a generated candidate, returns true iff it becomes the best generated one
    pub fn offer_generated(&mut self, members:&[VertexId], sure:bool) -> bool {
        let better = match &self.best_gen {
            None => true,
            Some((best, best_sure)) => {
                best.len() == self.n || (!sure, members.len()) < (!*best_sure, best.len())
            }
        };
        if better {
            self.best_gen = Some((members.to_vec(), sure));
        }
        better
    }

    /// best final candidate
    pub fn best(&self) -> Option<&Candidate> { self.best.as_ref() }

    /// size of the best final candidate (n if none)
    pub fn best_size(&self) -> usize { self.best.as_ref().map_or(self.n, |c| c.members.len()) }

    /// size of the best generated candidate (n if none)
    pub fn best_gen_size(&self) -> usize { self.best_gen.as_ref().map_or(self.n, |(m,_)| m.len()) }

    /// global iteration of the last improvement
    pub fn last_improvement_iter(&self) -> usize { self.last_improvement_iter }

    /// time of the last improvement (seconds)
    pub fn time_to_best(&self) -> f64 { self.time_to_best }

    /// largest number of iterations between two improvements
    pub fn max_iter_diff(&self) -> usize { self.max_iter_diff }
}
