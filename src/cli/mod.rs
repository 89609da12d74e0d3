//! Command-line parsing for the `l1inv` binary.
//!
//! Argument parsing and command dispatch stay separate from the inversion
//! code; every subcommand maps onto a library call.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "l1inv", version, about = "L1-norm linear inversion via linear programming")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve one problem file and print L1 vs least-squares estimates.
    Solve(SolveArgs),
    /// Solve every problem in a JSON array file (in parallel).
    Batch(BatchArgs),
    /// Generate a noisy straight-line problem with outliers and solve it.
    Demo(DemoArgs),
}

/// Settings shared by all solving commands.
#[derive(Debug, Args, Clone)]
pub struct SolverArgs {
    /// Model bound multiplier (bound = X * max|m_ls|). Overrides L1INV_BOUND_MULTIPLIER.
    #[arg(long)]
    pub bound_multiplier: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct SolveArgs {
    /// Problem JSON: { "g": [[..], ..], "d": [..], "sd": [..] }.
    #[arg(long, value_name = "JSON")]
    pub problem: PathBuf,

    /// Write the result (model, residuals, bound) to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// JSON array of problem objects.
    #[arg(long, value_name = "JSON")]
    pub problems: PathBuf,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 25)]
    pub n: usize,

    /// Number of corrupted observations.
    #[arg(long, default_value_t = 3)]
    pub outliers: usize,

    /// Magnitude added to each corrupted observation.
    #[arg(long, default_value_t = 20.0)]
    pub outlier_size: f64,

    /// Gaussian noise standard deviation.
    #[arg(long, default_value_t = 0.05)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_solve_with_override() {
        let cli = Cli::parse_from([
            "l1inv",
            "solve",
            "--problem",
            "p.json",
            "--bound-multiplier",
            "25",
        ]);
        match cli.command {
            Command::Solve(args) => {
                assert_eq!(args.problem, PathBuf::from("p.json"));
                assert_eq!(args.solver.bound_multiplier, Some(25.0));
                assert!(args.export.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn demo_defaults() {
        let cli = Cli::parse_from(["l1inv", "demo"]);
        match cli.command {
            Command::Demo(args) => {
                assert_eq!(args.n, 25);
                assert_eq!(args.outliers, 3);
                assert_eq!(args.seed, 42);
                assert!(args.solver.bound_multiplier.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
