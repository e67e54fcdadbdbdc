//! Coloring and clique solvers used by the k-VCS search.

/// Maximum clique solvers
pub mod clique;

/// Vertex Coloring problem solvers
pub mod coloring;
