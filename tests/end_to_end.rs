use kvcs::color::{ColoringInstance, VertexId};
use kvcs::compact_instance::CompactInstance;
use kvcs::params::Params;
use kvcs::search::oracle::ColoringOracle;
use kvcs::search::refinement::{KvcsSearch, SearchOutcome};
use kvcs::stats::Stats;
use kvcs::timer::Timer;
use kvcs::util::remap;


fn params(k:usize, seed:u64) -> Params {
    Params { k, seed, clique_time: 0.1, ..Params::default() }
}

fn run(inst:&CompactInstance, params:Params) -> SearchOutcome {
    let mut search = KvcsSearch::new(inst, params, Timer::new(30.)).unwrap();
    search.run()
}

fn is_k_vcs(inst:&CompactInstance, k:usize, subset:&[VertexId]) -> (bool, bool) {
    let mut oracle = ColoringOracle::new(inst, &Params::default(), 7);
    oracle.is_k_vcs(k, subset, &Timer::unlimited(), &mut Stats::default())
}

#[test]
fn odd_cycle_is_its_own_answer() {
    let inst = CompactInstance::from_file("insts/c5.col").unwrap();
    match run(&inst, params(3, 1)) {
        SearchOutcome::Found(best) => {
            assert_eq!(best.members, vec![0,1,2,3,4]);
            assert!(best.chroma && best.crit);
        }
        o => panic!("unexpected outcome {:?}", o),
    }
}

#[test]
fn complete_graph_answered_by_clique() {
    let inst = CompactInstance::from_file("insts/k4.col").unwrap();
    match run(&inst, params(4, 1)) {
        SearchOutcome::Found(best) => {
            let mut members = best.members.clone();
            members.sort_unstable();
            assert_eq!(members, vec![0,1,2,3]);
            assert!(best.chroma && best.crit);
        }
        o => panic!("unexpected outcome {:?}", o),
    }
}

#[test]
fn bipartite_graph_is_infeasible() {
    let inst = CompactInstance::from_file("insts/c6.col").unwrap();
    let all:Vec<VertexId> = inst.vertices().collect();
    assert_eq!(is_k_vcs(&inst, 3, &all), (false, true));
    assert_eq!(run(&inst, params(3, 1)), SearchOutcome::Infeasible);
}

#[test]
fn extra_vertex_is_reduced_away() {
    let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
    match run(&inst, params(3, 4)) {
        SearchOutcome::Found(best) => {
            assert_eq!(best.members.len(), 5);
            assert!(best.chroma && best.crit);
            assert_eq!(is_k_vcs(&inst, 3, &best.members), (true, true));
        }
        o => panic!("unexpected outcome {:?}", o),
    }
}

#[test]
fn reduction_disabled_keeps_generated_candidate_valid() {
    let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
    let p = Params { postprocess: false, max_iter: 3, ..params(4, 2) };
    match run(&inst, p) {
        SearchOutcome::Found(best) => {
            assert!(best.chroma);
            assert_eq!(is_k_vcs(&inst, 4, &best.members), (true, true));
        }
        o => panic!("unexpected outcome {:?}", o),
    }
}

#[test]
fn fixed_size_candidates_pass_a_fresh_check() {
    let inst = CompactInstance::from_file("insts/c5_extra.col").unwrap();
    let mut search = KvcsSearch::new(&inst, params(3, 11), Timer::new(30.)).unwrap();
    let (subset, sure) = search.find_k_vcs_fixed_size(5, &Timer::new(10.)).unwrap();
    assert_eq!(subset.len(), 5);
    assert!(sure);
    assert_eq!(is_k_vcs(&inst, 3, &subset), (true, true));
    assert!(search.stats().nb_size_attempts >= 1);
}

#[test]
fn sure_verdicts_agree_across_deadlines() {
    let inst = CompactInstance::from_file("insts/myciel3.col").unwrap();
    let subsets:Vec<Vec<VertexId>> = vec![
        inst.vertices().collect(),
        (0..10).collect(),
        (1..11).collect(),
    ];
    for subset in &subsets {
        let reference = is_k_vcs(&inst, 4, subset);
        assert!(reference.1);
        for limit in &[0., 0.0005, 0.01, 1.] {
            let mut oracle = ColoringOracle::new(&inst, &Params::default(), 3);
            let (is_vcs, sure) = oracle.is_k_vcs(4, subset, &Timer::new(*limit), &mut Stats::default());
            assert!(!sure || is_vcs == reference.0);
        }
    }
}

#[test]
fn preprocessing_maps_back_to_input_vertices() {
    // 5-cycle on vertices 2 to 6, with a pendant path 0-1-2
    let inst = CompactInstance::from_edges(7, &[(2,3),(3,4),(4,5),(5,6),(6,2),(0,1),(1,2)]);
    let (peeled, vmap) = inst.peel_low_degree(2);
    assert_eq!(vmap, vec![2,3,4,5,6]);
    match run(&peeled, params(3, 5)) {
        SearchOutcome::Found(best) => {
            let mut solution = remap(&vmap, &best.members);
            solution.sort_unstable();
            assert_eq!(solution, vec![2,3,4,5,6]);
        }
        o => panic!("unexpected outcome {:?}", o),
    }
}

#[test]
fn malformed_instance_is_an_error() {
    assert!(CompactInstance::from_dimacs_str("p edge 3 1\ne 1 4\n").is_err());
    assert!(CompactInstance::from_file("insts/missing.col").is_err());
}
