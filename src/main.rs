use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ilr_table::ilp::SolverConfig;
use ilr_table::table::{TableConfig, TableGenerator};
use log::error;

/// Generate the feasibility table `ilr_{L}_{D}.txt`.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Bound L on the sum of the five item-type counts.
    #[arg(short = 'l', long, default_value_t = 8, allow_negative_numbers = true)]
    count_bound: i64,

    /// Bound D on each of the three capacities.
    #[arg(short = 'd', long, default_value_t = 1, allow_negative_numbers = true)]
    capacity_bound: i64,

    /// Directory the table is written to.
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Solve `n1` slices in parallel (needs the `parallel` feature).
    #[arg(long)]
    parallel: bool,

    /// Time limit for a single solve, in milliseconds.
    #[arg(long, default_value_t = 60_000)]
    time_limit_ms: i64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = TableConfig::new(cli.count_bound, cli.capacity_bound)
        .with_parallel(cli.parallel)
        .with_solver(SolverConfig::default().with_time_limit_ms(cli.time_limit_ms));

    match TableGenerator::new().generate_in_dir(&config, &cli.output_dir) {
        Ok((path, table)) => {
            println!(
                "{}: {} records, {} feasible",
                path.display(),
                table.len(),
                table.feasible_count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
