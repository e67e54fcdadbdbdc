use crate::color::VertexId;

/**
Vertex-based tabu list. A vertex moved at iteration i cannot be moved again before
iteration i+tenure. The iteration counter is advanced explicitly by the search.
*/
#[derive(Debug, Clone)]
pub struct TabuList {
    /// tabu_until[v]: first iteration in which v can be moved again
    tabu_until: Vec<usize>,
    /// current iteration
    nb_iter: usize,
    /// number of iterations a moved vertex stays tabu
    tenure: usize,
}

impl TabuList {
    /// tabu list over n vertices
    pub fn new(n:usize, tenure:usize) -> Self {
        Self { tabu_until: vec![0 ; n], nb_iter: 0, tenure }
    }

    /// true iff v cannot be moved in the current iteration
    pub fn contains(&self, v:VertexId) -> bool { self.tabu_until[v] > self.nb_iter }

    /// forbids moving v for the next `tenure` iterations
    pub fn insert(&mut self, v:VertexId) { self.tabu_until[v] = self.nb_iter + self.tenure; }

    /// moves to the next iteration
    pub fn next_iter(&mut self) { self.nb_iter += 1; }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration() {
        let mut tabu = TabuList::new(3, 2);
        tabu.insert(1);
        assert!(tabu.contains(1));
        assert!(!tabu.contains(0));
        tabu.next_iter();
        assert!(tabu.contains(1));
        tabu.next_iter();
        assert!(!tabu.contains(1));
        tabu.insert(2);
        tabu.insert(1);
        tabu.next_iter();
        assert!(tabu.contains(1) && tabu.contains(2));
    }
}
