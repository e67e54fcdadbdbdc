use bit_set::BitSet;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of a graph coloring problem
(represented as a partition).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** read-only graph seen by the search and by the coloring solvers */
pub trait ColoringInstance: std::fmt::Debug {
    /// number of vertices
    fn nb_vertices(&self) -> usize;

    /// number of edges
    fn nb_edges(&self) -> usize;

    /// list of vertices adjacent to u
    fn neighbors(&self, u:VertexId) -> &[VertexId];

    /// degree of u
    fn degree(&self, u:VertexId) -> usize { self.neighbors(u).len() }

    /// true iff u and v are adjacent
    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool;

    /// iterator over the vertices
    fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.nb_vertices() }

    /// logs statistics of the instance
    fn display_statistics(&self) {
        log::info!("\t{} \t vertices", self.nb_vertices());
        log::info!("\t{} \t edges", self.nb_edges());
        let min_degree = self.vertices().map(|u| self.degree(u)).min().unwrap_or(0);
        let max_degree = self.vertices().map(|u| self.degree(u)).max().unwrap_or(0);
        log::info!("\t{} \t min degree", min_degree);
        log::info!("\t{} \t max degree", max_degree);
    }
}

/** result of the coloring checker */
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CheckerResult {
    /// valid coloring using that many colors
    Ok(usize),
    /// vertex never colored
    MissingVertex(VertexId),
    /// vertex colored more than once
    DuplicateVertex(VertexId),
    /// vertex outside the instance
    UnknownVertex(VertexId),
    /// two adjacent vertices share a color
    Conflict(VertexId, VertexId),
}

/**
checks that the solution is a proper coloring of the instance.
returns the number of non-empty colors if it is the case.
*/
pub fn checker(inst:&dyn ColoringInstance, sol:&[Vec<VertexId>]) -> CheckerResult {
    // check that all vertices are added exactly once
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    for c in sol {
        for v in c {
            if *v >= inst.nb_vertices() { return CheckerResult::UnknownVertex(*v); }
            if visited.contains(*v) { return CheckerResult::DuplicateVertex(*v); }
            visited.insert(*v);
        }
    }
    if let Some(v) = inst.vertices().find(|v| !visited.contains(*v)) {
        return CheckerResult::MissingVertex(v);
    }
    // check conflicts
    for c in sol {
        for (i,v1) in c.iter().enumerate() {
            for v2 in &c[i+1..] {
                if inst.are_adjacent(*v1, *v2) { return CheckerResult::Conflict(*v1, *v2); }
            }
        }
    }
    CheckerResult::Ok(sol.iter().filter(|c| !c.is_empty()).count())
}

/** converts colors[v] (color of the vertex v) into color classes */
pub fn colors_to_solution(colors:&[usize]) -> Solution {
    let nb_colors = colors.iter().max().map_or(0, |c| c+1);
    let mut res = vec![vec![] ; nb_colors];
    for (v,c) in colors.iter().enumerate() {
        res[*c].push(v);
    }
    res
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact_instance::CompactInstance;

    fn square() -> CompactInstance {
        CompactInstance::from_edges(4, &[(0,1),(1,2),(2,3),(3,0)])
    }

    #[test]
    fn test_checker_ok() {
        let inst = square();
        assert_eq!(checker(&inst, &[vec![0,2], vec![1,3]]), CheckerResult::Ok(2));
    }

    #[test]
    fn test_checker_errors() {
        let inst = square();
        assert_eq!(checker(&inst, &[vec![0,1], vec![2,3]]), CheckerResult::Conflict(0,1));
        assert_eq!(checker(&inst, &[vec![0,2], vec![1]]), CheckerResult::MissingVertex(3));
        assert_eq!(checker(&inst, &[vec![0,2], vec![1,3,0]]), CheckerResult::DuplicateVertex(0));
    }

    #[test]
    fn test_colors_to_solution() {
        assert_eq!(colors_to_solution(&[0,1,0,2]), vec![vec![0,2], vec![1], vec![3]]);
    }
}
