mod check;
mod paths;
mod source;
mod view;

use clap::{Parser, Subcommand};

pub use check::{CheckArgs, OutputFormat};
pub use paths::PathsArgs;
pub use source::{FileConfig, Source, SourceArgs};

#[derive(Parser)]
#[command(
    name = "capcheck",
    version,
    about = "Capability checks for Asset Administration Shell digital twins",
    long_about = "Decides whether a machine, possibly with a tool mounted into it, can perform \
                  a required capability. Asset data is read from an AAS repository, a pair of \
                  AAS registries, or an AAS environment file."
)]
pub struct Cli {
    /// Also print logs to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check required capabilities against a machine
    #[command(
        long_about = "Evaluates one or more required capability containers against a machine and \
                      prints one result per container, including suitable tools and mounting paths."
    )]
    Check(CheckArgs),
    /// List the mounting paths of a tool
    Paths(PathsArgs),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = capcheck_runtime::init_logging("cli", cli.verbose);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Check(args) => rt.block_on(check::run(args)),
        Commands::Paths(args) => rt.block_on(paths::run(args)),
    }
}
