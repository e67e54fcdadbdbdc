use std::cmp::{Ordering, max, Ord};

use priority_queue::PriorityQueue;
use bit_set::BitSet;

use crate::color::{ColoringInstance, Solution, VertexId};

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a greedy DSATUR algorithm.
    1. choose an uncolored node that sees the most colors (break ties by the largest degree)
    2. add the vertex to the first color available
    3. mark all its neighbors seeing this color
    4. repeat until a proper coloring is found

returns colors[v]: color assigned to vertex v
*/
pub fn greedy_dsatur_colors(inst:&dyn ColoringInstance) -> Vec<usize> {
    let n:usize = inst.nb_vertices();
    let mut remaining_vertices:PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for i in 0..n {
        remaining_vertices.push(i, DSatInfo { dsat:0, degree:inst.degree(i)});
    }
    let mut colors:Vec<Option<usize>> = vec![None ; n]; // colors[v] -> color assigned to vertex v
    let mut adj_colors:Vec<BitSet> = vec![BitSet::default() ; n]; // adj_colors[n] -> colors n sees
    while let Some((current_vertex, _)) = remaining_vertices.pop() {
        // assign it a color
        let mut color:usize = 0;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = Some(color);
        // update saturation degree information
        for conflict_vertex in inst.neighbors(current_vertex).iter()
        .filter(|conflict_vertex| colors[**conflict_vertex].is_none()) {
            if !adj_colors[*conflict_vertex].contains(color) {
                adj_colors[*conflict_vertex].insert(color);
                remaining_vertices.change_priority_by(conflict_vertex, |p| {p.dsat += 1;} );
            }
        }
    }
    colors.into_iter().map(|c| c.unwrap_or(0)).collect()
}

/** greedy DSATUR, returns the color classes */
pub fn greedy_dsatur(inst:&dyn ColoringInstance) -> Solution {
    let colors = greedy_dsatur_colors(inst);
    let nb_colors = colors.iter().fold(0, |acc, c| max(acc, c+1));
    let mut res = vec![vec![] ; nb_colors];
    for (i,c) in colors.iter().enumerate() {
        res[*c].push(i);
    }
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::{checker, CheckerResult};
    use crate::compact_instance::CompactInstance;

    #[test]
    fn test_odd_cycle() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        let solution = greedy_dsatur(&inst);
        assert_eq!(checker(&inst, &solution), CheckerResult::Ok(3));
    }

    #[test]
    fn test_even_cycle() {
        let inst = CompactInstance::from_file("insts/c6.col").unwrap();
        let solution = greedy_dsatur(&inst);
        assert_eq!(checker(&inst, &solution), CheckerResult::Ok(2));
    }

    #[test]
    fn test_myciel3() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let solution = greedy_dsatur(&inst);
        assert!(matches!(checker(&inst, &solution), CheckerResult::Ok(c) if c >= 4));
    }

    #[test]
    fn test_empty() {
        let inst = CompactInstance::new(vec![]);
        assert!(greedy_dsatur(&inst).is_empty());
    }
}
