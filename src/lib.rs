//! Search of small k-vertex-critical subgraphs of a graph

// #![warn(clippy::all, clippy::pedantic)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// coloring instance base trait, solutions and checker
pub mod color;

/// read DIMACS col files
pub mod dimacs;

/// compact instance (adjacency lists and matrix), induced subgraphs
pub mod compact_instance;

/// errors
pub mod error;

/// search parameters
pub mod params;

/// run statistics
pub mod stats;

/// timers and stopping criteria
pub mod timer;

/// helper methods for the executable
pub mod util;

/// coloring and clique solvers
pub mod solvers;

/// k-VCS search
pub mod search;
