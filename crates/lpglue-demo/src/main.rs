mod demos;
mod logging;
mod problems;
mod report;

use clap::{Args, Parser, Subcommand};
use lpglue_highs::{SolverConfig, highs_version};
use report::{OutputFormat, render_output};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Demo programs driving the HiGHS LP/MIP solver"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(flatten)]
    solver: SolverArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the example through the one-shot LP and MIP calls
    Minimal,
    /// Build the example column by column and row by row in a session
    Session,
    /// Exercise options, integrality and both matrix orientations
    Full,
}

#[derive(Args, Debug, Default)]
struct SolverArgs {
    /// Time limit in seconds
    #[arg(long, global = true)]
    time_limit: Option<f64>,

    /// Relative MIP gap tolerance
    #[arg(long, global = true)]
    mip_gap: Option<f64>,

    /// Number of solver threads
    #[arg(long, global = true)]
    threads: Option<u32>,

    /// Enable or disable presolve
    #[arg(long, global = true)]
    presolve: Option<bool>,

    /// Primal and dual feasibility tolerance
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// LP algorithm (simplex, ipm, pdlp or choose)
    #[arg(long, global = true)]
    solver: Option<String>,

    /// Let HiGHS print its own log to the console
    #[arg(long, global = true)]
    log_to_console: bool,
}

impl SolverArgs {
    fn to_config(&self) -> SolverConfig {
        let mut config = SolverConfig::new();
        if let Some(limit) = self.time_limit {
            config = config.with_time_limit(limit);
        }
        if let Some(gap) = self.mip_gap {
            config = config.with_mip_gap(gap);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if let Some(presolve) = self.presolve {
            config = config.with_presolve(presolve);
        }
        if let Some(tolerance) = self.tolerance {
            config = config.with_tolerance(tolerance);
        }
        if let Some(solver) = &self.solver {
            config = config.with_solver(solver.clone());
        }
        if self.log_to_console {
            config = config.with_log_to_console(true);
        }
        config
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging()?;

    let config = cli.solver.to_config();
    let solver_version = highs_version().unwrap_or_else(|| "unknown".to_string());
    debug!(
        component = "demo",
        operation = "start",
        status = "success",
        command = ?cli.command,
        solver = "highs",
        solver_version = %solver_version,
        "Starting demo"
    );

    let reports = match cli.command {
        Command::Minimal => {
            if !config.is_empty() {
                tracing::warn!(
                    component = "demo",
                    operation = "minimal",
                    status = "warn",
                    "One-shot calls take no options; solver flags are ignored"
                );
            }
            demos::minimal()?
        }
        Command::Session => demos::session(&config)?,
        Command::Full => demos::full(&config)?,
    };

    render_output(cli.format, &reports)
}

pub(crate) fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
