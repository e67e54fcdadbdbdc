//! Search of small k-vertex-critical subgraphs.

/// helper data structures (reservoir sampling, tabu list, degree-weighted sampling)
pub mod util;

/// fixed-size subgraph with incremental degrees and edge count
pub mod subgraph;

/// constructive algorithms building dense subgraphs of a given size
pub mod construction;

/// tabu search maximizing the number of edges of a fixed-size subgraph
pub mod local_search;

/// k-colorability oracle (exact solver, then heuristic fallback)
pub mod oracle;

/// best candidates bookkeeping
pub mod incumbent;

/// search of a not (k-1)-colorable subgraph of a given size, and over sizes
pub mod size_search;

/// vertex by vertex reduction and criticality confirmation
pub mod criticality;

/// iterated search (top-level driver)
pub mod refinement;
