//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - resolves configuration (environment, then flags)
//! - runs the requested workflow and prints reports

use clap::Parser;

use crate::cli::{BatchArgs, Command, DemoArgs, SolveArgs, SolverArgs};
use crate::data::{SyntheticSpec, generate_line_problem};
use crate::domain::InversionConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `l1inv` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Solve(args) => handle_solve(args),
        Command::Batch(args) => handle_batch(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn init_logging() {
    // Logs go to stderr so reports on stdout stay pipeable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_solve(args: SolveArgs) -> Result<(), AppError> {
    let config = resolve_config(&args.solver)?;
    let run = pipeline::run_solve(&args.problem, args.export.as_deref(), &config)?;
    println!(
        "{}",
        crate::report::format_solve_summary(&run.problem, &run.outcome, &config)
    );
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = resolve_config(&args.solver)?;
    let items = pipeline::run_batch(&args.problems, &config)?;
    println!("{}", crate::report::format_batch_summary(&items));

    let failed = items.iter().filter(|i| i.result.is_err()).count();
    if failed > 0 {
        return Err(AppError::new(
            4,
            format!("{failed} of {} problems failed.", items.len()),
        ));
    }
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = resolve_config(&args.solver)?;
    let spec = SyntheticSpec {
        n: args.n,
        noise_sd: args.noise,
        outliers: args.outliers,
        outlier_size: args.outlier_size,
        seed: args.seed,
        ..SyntheticSpec::default()
    };
    let synthetic = generate_line_problem(&spec)?;
    let run = pipeline::run_problem(synthetic.problem, &config)?;

    println!(
        "{}",
        crate::report::format_solve_summary(&run.problem, &run.outcome, &config)
    );
    let l1_err = (&run.outcome.model - &synthetic.m_true).norm();
    let ls_err = (&run.outcome.least_squares - &synthetic.m_true).norm();
    println!("True model: [{:.6}, {:.6}]", spec.m_true[0], spec.m_true[1]);
    println!("Outlier rows: {:?}", synthetic.outlier_rows);
    println!("Distance to true model: L1={l1_err:.6} LS={ls_err:.6}");
    Ok(())
}

/// Environment (and `.env`) first, then command-line overrides.
pub fn resolve_config(args: &SolverArgs) -> Result<InversionConfig, AppError> {
    let mut config = InversionConfig::from_env()?;
    if let Some(x) = args.bound_multiplier {
        config.bound_multiplier = x;
    }
    config.validate()?;
    Ok(config)
}
