use bit_set::BitSet;

use crate::dimacs::{read_from_file, read_from_str};
use crate::color::{ColoringInstance, VertexId};
use crate::error::KvcsError;

/** models a Graph Coloring instance (adjacency lists and adjacency matrix).  */
#[derive(Debug, Clone)]
pub struct CompactInstance {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl ColoringInstance for CompactInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn nb_edges(&self) -> usize { self.m }

    fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool { self.adj_matrix[u].contains(v) }
}


impl CompactInstance {

    /** constructor using an adjacency list (assumed symmetric, without duplicates) */
    pub fn new(adj_list:Vec<Vec<usize>>) -> Self {
        let n = adj_list.len();
        // compute nb edges
        let mut m = 0;
        for e in &adj_list { // at the end: m = ∑ d(v)
            m += e.len();
        }
        m /= 2; // m = (∑ d(v)) / 2
        let mut adj_matrix = vec![BitSet::with_capacity(n); n];
        for (a,row) in adj_matrix.iter_mut().enumerate() {
            for b in &adj_list[a] {
                row.insert(*b);
            }
        }
        Self { n, m, adj_list, adj_matrix }
    }

    /** constructor from an edge list (0-based, duplicates and self-loops ignored) */
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId)]) -> Self {
        let mut seen = vec![BitSet::with_capacity(n); n];
        let mut adj_list = vec![Vec::new(); n];
        for (u,v) in edges {
            if u != v && !seen[*u].contains(*v) {
                seen[*u].insert(*v);
                seen[*v].insert(*u);
                adj_list[*u].push(*v);
                adj_list[*v].push(*u);
            }
        }
        Self::new(adj_list)
    }

    /// creates an instance from a DIMACS file
    pub fn from_file(filename:&str) -> Result<Self, KvcsError> {
        let (_,_,adj_list) = read_from_file(filename)?;
        Ok(Self::new(adj_list))
    }

    /// creates an instance from DIMACS text
    pub fn from_dimacs_str(content:&str) -> Result<Self, KvcsError> {
        let (_,_,adj_list) = read_from_str(content)?;
        Ok(Self::new(adj_list))
    }

    /** subgraph induced by `subset`: vertex i of the result is subset[i] */
    pub fn induced(inst:&dyn ColoringInstance, subset:&[VertexId]) -> Self {
        let mut position = vec![usize::MAX ; inst.nb_vertices()];
        for (i,v) in subset.iter().enumerate() { position[*v] = i; }
        let adj_list = subset.iter().map(|v| {
            inst.neighbors(*v).iter()
                .map(|u| position[*u])
                .filter(|i| *i != usize::MAX)
                .collect()
        }).collect();
        Self::new(adj_list)
    }

    /**
    repeatedly removes the vertices with degree < min_degree until none is left.
    returns the remaining graph and its vertex map (vmap[i]: vertex of self that became i).
    */
    pub fn peel_low_degree(&self, min_degree:usize) -> (Self, Vec<VertexId>) {
        let mut removed = BitSet::with_capacity(self.n);
        let mut degrees:Vec<usize> = self.vertices().map(|u| self.degree(u)).collect();
        let mut stack:Vec<VertexId> = self.vertices().filter(|u| degrees[*u] < min_degree).collect();
        for u in &stack { removed.insert(*u); }
        while let Some(u) = stack.pop() {
            for v in self.neighbors(u) {
                if removed.contains(*v) { continue; }
                degrees[*v] -= 1;
                if degrees[*v] < min_degree {
                    removed.insert(*v);
                    stack.push(*v);
                }
            }
        }
        let vmap:Vec<VertexId> = self.vertices().filter(|u| !removed.contains(*u)).collect();
        (Self::induced(self, &vmap), vmap)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        assert_eq!(inst.nb_vertices(), 5);
        assert_eq!(inst.nb_edges(), 5);
        assert!(inst.are_adjacent(0, 4));
        assert!(!inst.are_adjacent(0, 2));
    }

    #[test]
    fn test_induced() {
        // 0-1-2-3 path plus chord 0-2
        let inst = CompactInstance::from_edges(4, &[(0,1),(1,2),(2,3),(0,2)]);
        let sub = CompactInstance::induced(&inst, &[2,0,3]);
        assert_eq!(sub.nb_vertices(), 3);
        assert_eq!(sub.nb_edges(), 2);
        assert!(sub.are_adjacent(0, 1)); // 2-0
        assert!(sub.are_adjacent(0, 2)); // 2-3
        assert!(!sub.are_adjacent(1, 2));
    }

    #[test]
    fn test_peel_low_degree() {
        // triangle 0,1,2 with a pendant path 2-3-4
        let inst = CompactInstance::from_edges(5, &[(0,1),(1,2),(0,2),(2,3),(3,4)]);
        let (peeled, vmap) = inst.peel_low_degree(2);
        assert_eq!(vmap, vec![0,1,2]);
        assert_eq!(peeled.nb_edges(), 3);
        let (empty, vmap) = inst.peel_low_degree(3);
        assert_eq!(empty.nb_vertices(), 0);
        assert!(vmap.is_empty());
    }
}
