use bit_set::BitSet;

use crate::color::{ColoringInstance, VertexId};

/** implements a greedy algorithm that finds a "large" size clique.
The algorithm chooses the vertex with the largest degree. It marks as "candidates" its neighbors.
Then, while the set of candidates is not empty, choose the candidate with the largest degree.
*/
pub fn greedy_clique(inst:&dyn ColoringInstance) -> Vec<VertexId> {
    let mut candidates:BitSet = inst.vertices().collect();
    let mut res = Vec::new();
    while let Some(current_vertex) = candidates.iter().max_by_key(|v| inst.degree(*v)) {
        // insert the current vertex as part of the clique solution
        res.push(current_vertex);
        // only its neighbors remain candidates
        let neighbors:BitSet = inst.neighbors(current_vertex).iter().cloned().collect();
        candidates.intersect_with(&neighbors);
    }
    log::debug!("greedy clique: {}", res.len());
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::compact_instance::CompactInstance;

    #[test]
    fn test_complete_graph() {
        let inst = CompactInstance::from_file("insts/k4.col").unwrap();
        let mut clique = greedy_clique(&inst);
        clique.sort_unstable();
        assert_eq!(clique, vec![0,1,2,3]);
    }

    #[test]
    fn test_odd_cycle() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        let clique = greedy_clique(&inst);
        assert_eq!(clique.len(), 2);
        assert!(inst.are_adjacent(clique[0], clique[1]));
    }
}
