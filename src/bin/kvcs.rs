use clap::{App, load_yaml};
use rand::SeedableRng;
use rand::rngs::StdRng;

use kvcs::color::ColoringInstance;
use kvcs::compact_instance::CompactInstance;
use kvcs::search::criticality::confirm_criticality;
use kvcs::search::refinement::{KvcsSearch, SearchOutcome};
use kvcs::solvers::clique::max_clique;
use kvcs::solvers::coloring::backtracking_dsatur::chromatic_number;
use kvcs::solvers::coloring::tabucol::color_heuristically;
use kvcs::timer::Timer;
use kvcs::util::{export_results, read_params, remap, RunConfig, RunMode};


/// warnings only by default, -v: info, -vv: debug, -vvv: trace (RUST_LOG takes precedence)
fn init_logger(verbosity:u64) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .init();
}

/// prints "name time colors" for the chromatic number modes
fn color_only(config:&RunConfig, inst:&CompactInstance, timer:&Timer) {
    let params = &config.params;
    let seed = params.seed_or_clock();
    let mut rng = StdRng::seed_from_u64(seed);
    let clique = max_clique(inst, params.k, &timer.child(params.clique_time), &mut rng);
    let lb = params.k.max(clique.len());
    let colors = if config.mode == RunMode::ExactColoring {
        match chromatic_number(inst, lb, timer) {
            Some(c) => c.to_string(),
            None => {
                log::warn!("time limit reached before proving the chromatic number");
                "?".to_string()
            }
        }
    } else {
        let mut tabu_rng = fastrand::Rng::with_seed(seed);
        color_heuristically(inst, lb, timer, &mut tabu_rng).to_string()
    };
    println!("{} {} {}", config.inst_filename, timer.elapsed_secs(), colors);
}


/** searches a small k-vertex-critical subgraph */
pub fn main() -> anyhow::Result<()> {
    // parse arguments
    let yaml = load_yaml!("kvcs.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let config = read_params(&main_args)?;
    init_logger(config.verbosity);
    let timer = Timer::new(config.params.time_limit);
    let k = config.params.k;

    // read the instance
    let original = CompactInstance::from_file(&config.inst_filename)?;
    log::info!("instance {}", config.inst_filename);
    original.display_statistics();
    if matches!(config.mode, RunMode::ExactColoring | RunMode::HeuristicColoring) {
        color_only(&config, &original, &timer);
        return Ok(());
    }

    // vertices of degree < k-1 belong to no k-critical subgraph
    let (inst, vmap) = original.peel_low_degree(k.saturating_sub(1));
    log::info!("preprocessing removed {} vertices ({} left)",
        original.nb_vertices() - inst.nb_vertices(), inst.nb_vertices());

    // search
    let mut search = KvcsSearch::new(&inst, config.params.clone(), timer)?;
    let outcome = if inst.nb_vertices() == 0 {
        log::info!("no vertex left: no {}-VCS", k);
        SearchOutcome::Infeasible
    } else if config.mode == RunMode::ReductionOnly {
        search.run_reduction_only()
    } else {
        search.run()
    };
    let mut stats = search.stats().clone();
    stats.infeasible |= outcome == SearchOutcome::Infeasible;
    let solution = match outcome {
        SearchOutcome::Infeasible => {
            println!("the graph is {}-colorable: it contains no {}-vertex-critical subgraph", k-1, k);
            Vec::new()
        }
        SearchOutcome::Undecided => {
            println!("unable to decide whether the graph is {}-colorable", k-1);
            Vec::new()
        }
        SearchOutcome::Found(best) => {
            let confirmation = confirm_criticality(
                &inst, inst.nb_vertices(), &best.members, best.chroma, best.crit, &config.params
            );
            stats.confirmed_chroma = confirmation.chroma;
            stats.confirmed_crit = confirmation.crit;
            stats.confirm_chroma_time = confirmation.chroma_time;
            stats.confirm_crit_time = confirmation.crit_time;
            println!("found a subgraph of size {} (chromatic number >= {}: {}, critical: {})",
                best.members.len(), k, confirmation.chroma, confirmation.crit);
            remap(&vmap, &best.members)
        }
    };
    stats.time = timer.elapsed_secs();

    // export results
    export_results(&solution, &stats, config.perf_file.as_deref(), config.sol_file.as_deref())?;
    Ok(())
}
