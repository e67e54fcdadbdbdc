use std::fs::File;
use std::io::Write;
use std::str::FromStr;

use clap::ArgMatches;

use crate::{
    color::VertexId,
    error::KvcsError,
    params::Params,
    stats::Stats,
};

/** what the executable does once the instance is read */
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunMode {
    /// full k-VCS search
    Search,
    /// reduces the whole vertex set vertex by vertex
    ReductionOnly,
    /// computes the chromatic number with the exact solver
    ExactColoring,
    /// bounds the chromatic number with the heuristic solver
    HeuristicColoring,
}

/** command line input of the executable */
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// instance file name
    pub inst_filename: String,
    /// search parameters
    pub params: Params,
    /// what to run
    pub mode: RunMode,
    /// where to write the solution
    pub sol_file: Option<String>,
    /// where to write the statistics (JSON)
    pub perf_file: Option<String>,
    /// number of -v flags
    pub verbosity: u64,
}

/// parses the value of an option, or returns the default if absent
fn parse_arg<T:FromStr>(main_args:&ArgMatches, name:&'static str, default:T) -> Result<T, KvcsError> {
    match main_args.value_of(name) {
        None => Ok(default),
        Some(s) => s.parse::<T>().map_err(|_| KvcsError::InvalidParameter {
            name,
            reason: format!("unable to parse {:?}", s),
        }),
    }
}

/** reads command line input: instance file name, parameters, run mode, output files */
pub fn read_params(main_args:&ArgMatches) -> Result<RunConfig, KvcsError> {
    let inst_filename = main_args.value_of("instance")
        .ok_or(KvcsError::InvalidParameter { name: "instance", reason: "missing".to_string() })?
        .to_string();
    let d = Params::default();
    let params = Params {
        k:                   parse_arg(main_args, "k", d.k)?,
        time_limit:          parse_arg(main_args, "time", d.time_limit)?,
        heuristic_time:      parse_arg(main_args, "heutime", d.heuristic_time)?,
        exact_time:          parse_arg(main_args, "exacttime", d.exact_time)?,
        clique_time:         parse_arg(main_args, "cliquetime", d.clique_time)?,
        max_iter:            parse_arg(main_args, "iter", d.max_iter)?,
        mu:                  parse_arg(main_args, "mu", d.mu)?,
        nb_trials:           parse_arg(main_args, "R", d.nb_trials)?,
        xi:                  parse_arg(main_args, "xi", d.xi)?,
        imax:                parse_arg(main_args, "imax", d.imax)?,
        construction:        parse_arg(main_args, "consalg", d.construction)?,
        alpha:               parse_arg(main_args, "alpha", d.alpha)?,
        tenure_mult:         parse_arg(main_args, "tenure", d.tenure_mult)?,
        max_nonimpr:         parse_arg(main_args, "imaxits", d.max_nonimpr)?,
        pmin:                parse_arg(main_args, "pmin", d.pmin)?,
        pmax_mult:           parse_arg(main_args, "pmax", d.pmax_mult)?,
        pstep:               parse_arg(main_args, "pstep", d.pstep)?,
        use_exact:           !main_args.is_present("noexact"),
        use_heuristic:       !main_args.is_present("noheu"),
        postprocess:         !main_args.is_present("nopproc"),
        first_phase:         !main_args.is_present("nofstphase"),
        dense_search:        !main_args.is_present("nodensesearch"),
        brooks_pruning:      !main_args.is_present("nobrooks"),
        confirm_criticality: main_args.is_present("confirmcrit"),
        force_confirm:       main_args.is_present("forceconfirm"),
        confirm_time:        parse_arg(main_args, "confirmtime", d.confirm_time)?,
        seed:                parse_arg(main_args, "seed", d.seed)?,
    };
    params.validate()?;
    let mode = if main_args.is_present("justexactcolor") {
        RunMode::ExactColoring
    } else if main_args.is_present("justheuristiccolor") {
        RunMode::HeuristicColoring
    } else if main_args.is_present("justpproc") {
        RunMode::ReductionOnly
    } else {
        RunMode::Search
    };
    Ok(RunConfig {
        inst_filename,
        params,
        mode,
        sol_file: main_args.value_of("solution").map(|s| s.to_string()),
        perf_file: main_args.value_of("perf").map(|s| s.to_string()),
        verbosity: main_args.occurrences_of("verbose"),
    })
}

/// maps the vertices of a preprocessed instance back to the input ones
pub fn remap(vmap:&[VertexId], members:&[VertexId]) -> Vec<VertexId> {
    members.iter().filter_map(|v| vmap.get(*v).cloned()).collect()
}

/// space separated list of vertices
pub fn solution_to_string(solution:&[VertexId]) -> String {
    solution.iter().map(|v| v.to_string()).collect::<Vec<String>>().join(" ")
}

fn create(filename:&str) -> Result<File, KvcsError> {
    File::create(filename).map_err(|source| KvcsError::Io { path: filename.to_string(), source })
}

/// exports the solution (input vertex indices) and the statistics to files
pub fn export_results(
    solution:&[VertexId],
    stats:&Stats,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<(), KvcsError> {
    if let Some(filename) = perf_file {
        let file = create(filename)?;
        serde_json::to_writer(file, stats)
            .map_err(|e| KvcsError::Io { path: filename.to_string(), source: e.into() })?;
    }
    if let Some(filename) = sol_file {
        if !solution.is_empty() {
            let mut file = create(filename)?;
            file.write_all(solution_to_string(solution).as_bytes())
                .map_err(|source| KvcsError::Io { path: filename.to_string(), source })?;
        }
    }
    Ok(())
}
