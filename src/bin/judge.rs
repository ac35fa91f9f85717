//! CLI front-end: reads the four positional JSON files, runs the checker,
//! and prints `cost <N>` or `E: <message>`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use depsolve_judge::{driver, schema};
use log::debug;

#[derive(Parser, Debug)]
#[command(name = "judge", about = "Check a package-management solution")]
struct Cli {
    /// Repository JSON file.
    repository: PathBuf,
    /// Initial-state JSON file.
    initial: PathBuf,
    /// Commands JSON file.
    commands: PathBuf,
    /// Constraints JSON file.
    constraints: PathBuf,
    /// Raise the log level from `warn` to `info`.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(cost) => {
            println!("cost {cost}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("E: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Thin orchestration, kept separate from `main` so it is testable without
/// a process exit.
fn run(cli: &Cli) -> anyhow::Result<u64> {
    debug!(
        "loading repository={:?} initial={:?} commands={:?} constraints={:?}",
        cli.repository, cli.initial, cli.commands, cli.constraints
    );
    let inputs = schema::load_run_inputs(
        &cli.repository,
        &cli.initial,
        &cli.commands,
        &cli.constraints,
    )?;
    driver::judge(
        &inputs.repository,
        &inputs.initial,
        &inputs.commands,
        &inputs.constraints,
    )
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();
}
