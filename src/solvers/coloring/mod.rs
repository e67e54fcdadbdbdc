/// greedy DSATUR algorithm
pub mod greedy_dsatur;

/// backtracking DSATUR for the k-coloring decision problem
pub mod backtracking_dsatur;

/// TABUCOL implementation for the k-coloring problem
pub mod tabucol;
