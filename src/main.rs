use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use swe::parser::InputSource;
use swe::report;
use swe::solver;

/// Find replacements for the symbols in a set of patterns so that every
/// expanded pattern occurs in the target text
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// Problem file; standard input is read when omitted
    input: Option<PathBuf>,
}

/// Entry point of the `swe` CLI.
///
/// Delegates to [`try_main`]. Any error is printed on stderr in detail and
/// reported as `NO` on stdout; the exit status is success either way.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let debug_enabled = std::env::var("SWE_DEBUG").is_ok();
    swe::log::init_logger(debug_enabled);

    let source = InputSource::from_path(cli.input.as_deref());
    log::debug!("reading problem from {}", source.name());

    match try_main(&source) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {}", e.display_detailed());
            print!("{}", report::render_infeasible());
        }
    }

    ExitCode::SUCCESS
}

/// Read, solve and render one problem.
///
/// Returns the text for stdout, or the error that stopped the run before
/// there was a model to search.
fn try_main(source: &InputSource) -> Result<String, solver::SolverError> {
    let result = solver::solve_source(source)?;
    if let solver::SolveOutcome::Infeasible(reason) = &result.outcome {
        log::info!("no solution: {reason}");
    }
    Ok(report::render(&result.outcome))
}
