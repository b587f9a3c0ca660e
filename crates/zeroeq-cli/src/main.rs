//! ZeroEQ CLI - inspect parameters, render response curves and exercise
//! the cross-thread update path of the equalizer core.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "zeroeq")]
#[command(author, version, about = "ZeroEQ equalizer core CLI", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List equalizer parameters with ranges and defaults
    Params(commands::params::ParamsArgs),

    /// Compute the magnitude response of a parameter set
    Curve(commands::curve::CurveArgs),

    /// Hammer the parameter store from several threads and report coalescing
    Simulate(commands::simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so table/CSV/JSON output on stdout stays clean
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
    }
}
