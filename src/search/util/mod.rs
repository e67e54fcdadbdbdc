/// uniform choice among equally good candidates
pub mod reservoir;

/// vertex-based tabu list
pub mod tabu_list;

/// degree-proportional vertex sampling
pub mod degree_sampler;
