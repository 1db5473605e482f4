//! pipeline-accelerator CLI entry point.
//!
//! Builds the pipeline accelerator stack and synthesizes it into a cloud
//! assembly that CloudFormation tooling can deploy.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod prelude;

/// Declare and synthesize the pipeline accelerator infrastructure
#[derive(Debug, Parser)]
#[command(name = "pipeline-accelerator")]
#[command(version, about = "Declare and synthesize the pipeline accelerator infrastructure", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "pipeline_accelerator=debug,pipeline_accelerator_infra=debug"
        } else {
            "pipeline_accelerator=info,pipeline_accelerator_infra=info"
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Synthesize the stack into a cloud assembly
    Synth(commands::synth::SynthCommand),

    /// Run the AWS Solutions rule checks
    Check(commands::check::CheckCommand),

    /// Show the declared resources
    Describe(commands::describe::DescribeCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.global.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Synth(synth_cmd) => {
            commands::synth::run(synth_cmd, &cli.global)?;
        }
        Commands::Check(check_cmd) => {
            commands::check::run(check_cmd, &cli.global)?;
        }
        Commands::Describe(describe_cmd) => {
            commands::describe::run(describe_cmd, &cli.global)?;
        }
    }

    Ok(())
}
