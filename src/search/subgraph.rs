use bit_set::BitSet;

use crate::color::{ColoringInstance, VertexId};

/**
Induced subgraph of an instance. Maintains for every vertex of the instance (member or not)
its number of neighbors inside the subgraph, and the number of edges of the subgraph.
*/
#[derive(Debug, Clone)]
pub struct Subgraph<'a> {
    /// reference instance
    inst: &'a dyn ColoringInstance,
    /// members of the subgraph
    members: Vec<VertexId>,
    /// inside.contains(v) iff v is a member
    inside: BitSet,
    /// deg[v]: number of neighbors of v that are members
    deg: Vec<usize>,
    /// number of edges with both endpoints in the subgraph
    nb_edges: usize,
}

impl<'a> Subgraph<'a> {
    /// subgraph induced by the given (distinct) vertices
    pub fn new(inst:&'a dyn ColoringInstance, members:Vec<VertexId>) -> Self {
        let mut res = Self {
            inst,
            members: Vec::new(),
            inside: BitSet::with_capacity(inst.nb_vertices()),
            deg: vec![0 ; inst.nb_vertices()],
            nb_edges: 0,
        };
        res.set_members(members);
        res
    }

    /// replaces all members (recomputes the degrees and the number of edges)
    pub fn set_members(&mut self, members:Vec<VertexId>) {
        self.inside.clear();
        for v in &members {
            assert!(*v < self.inst.nb_vertices(), "vertex {} outside the instance", v);
            assert!(self.inside.insert(*v), "vertex {} given twice", v);
        }
        for d in self.deg.iter_mut() { *d = 0; }
        for u in &members {
            for v in self.inst.neighbors(*u) {
                self.deg[*v] += 1;
            }
        }
        self.nb_edges = members.iter().map(|u| self.deg[*u]).sum::<usize>() / 2;
        self.members = members;
    }

    /// number of edges of the subgraph if the i-th member was replaced by v
    pub fn edges_after_swap(&self, i:usize, v:VertexId) -> usize {
        let u = self.members[i];
        let adj = if self.inst.are_adjacent(u, v) { 1 } else { 0 };
        self.nb_edges + self.deg[v] - self.deg[u] - adj
    }

    /// replaces the i-th member by the non-member v
    pub fn swap(&mut self, i:usize, v:VertexId) {
        assert!(!self.inside.contains(v), "vertex {} already in the subgraph", v);
        let u = self.members[i];
        self.nb_edges = self.edges_after_swap(i, v);
        for w in self.inst.neighbors(u) { self.deg[*w] -= 1; }
        for w in self.inst.neighbors(v) { self.deg[*w] += 1; }
        self.inside.remove(u);
        self.inside.insert(v);
        self.members[i] = v;
    }

    /// members of the subgraph
    pub fn members(&self) -> &[VertexId] { &self.members }

    /// consumes the subgraph, returns its members
    pub fn into_members(self) -> Vec<VertexId> { self.members }

    /// number of members
    pub fn size(&self) -> usize { self.members.len() }

    /// number of neighbors of v in the subgraph (v may be a non-member)
    pub fn deg(&self, v:VertexId) -> usize { self.deg[v] }

    /// number of edges of the subgraph
    pub fn nb_edges(&self) -> usize { self.nb_edges }

    /// true iff v is a member
    pub fn contains(&self, v:VertexId) -> bool { self.inside.contains(v) }

    /// reference instance
    pub fn inst(&self) -> &'a dyn ColoringInstance { self.inst }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    use crate::compact_instance::CompactInstance;

    fn check_invariant(sg:&Subgraph) {
        let inst = sg.inst();
        for v in inst.vertices() {
            let expected = inst.neighbors(v).iter().filter(|w| sg.members().contains(w)).count();
            assert_eq!(sg.deg(v), expected);
        }
        let sum:usize = sg.members().iter().map(|v| sg.deg(*v)).sum();
        assert_eq!(sg.nb_edges(), sum / 2);
    }

    #[test]
    fn test_create() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let sg = Subgraph::new(&inst, vec![0,1,2,3,4]);
        assert_eq!(sg.size(), 5);
        check_invariant(&sg);
        let full = Subgraph::new(&inst, inst.vertices().collect());
        assert_eq!(full.nb_edges(), 20);
    }

    #[test]
    fn test_random_swaps_keep_invariant() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let mut sg = Subgraph::new(&inst, vec![0,2,4,6,8,10]);
        for _ in 0..200 {
            let i = rng.gen_range(0..sg.size());
            let outside:Vec<VertexId> = inst.vertices().filter(|v| !sg.contains(*v)).collect();
            let v = outside[rng.gen_range(0..outside.len())];
            let predicted = sg.edges_after_swap(i, v);
            sg.swap(i, v);
            assert_eq!(sg.nb_edges(), predicted);
            check_invariant(&sg);
        }
        sg.set_members(vec![1,3,5]);
        check_invariant(&sg);
    }

    #[test]
    fn test_swap_back_restores_state() {
        let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
        let mut sg = Subgraph::new(&inst, vec![0,1,2,3,4,5]);
        let before_members = sg.members().to_vec();
        let before_deg:Vec<usize> = inst.vertices().map(|v| sg.deg(v)).collect();
        let before_edges = sg.nb_edges();
        sg.swap(2, 9);
        sg.swap(2, 2);
        assert_eq!(sg.members(), &before_members[..]);
        assert_eq!(inst.vertices().map(|v| sg.deg(v)).collect::<Vec<_>>(), before_deg);
        assert_eq!(sg.nb_edges(), before_edges);
    }

    #[test]
    #[should_panic]
    fn test_duplicate_member() {
        let inst = CompactInstance::from_file("insts/c5.col").unwrap();
        Subgraph::new(&inst, vec![0,1,1]);
    }
}
