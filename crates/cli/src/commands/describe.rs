use pipeline_accelerator_infra::describe::format_stack;

use super::build_app;
use crate::config::StackConfig;
use crate::error::Result;
use crate::prelude::*;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rendered CloudFormation template.
    Json,
    /// Human-readable plan of declared resources.
    #[default]
    Pretty,
}

/// Show what the stack declares.
#[derive(Debug, clap::Parser)]
pub struct DescribeCommand {
    #[command(flatten)]
    pub stack: StackConfig,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,
}

pub fn run(command: DescribeCommand, _global: &crate::Global) -> Result<()> {
    let app = build_app(&command.stack)?;

    for stack in app.stacks() {
        match command.format {
            OutputFormat::Json => {
                aprintln!("{}", stack.synth()?.to_json_pretty()?);
            }
            OutputFormat::Pretty => {
                aprintln!("{}", p_c("Declared resources:"));
                for line in format_stack(stack) {
                    aprintln!("  {}", paint_plan_line(&line));
                }
            }
        }
    }

    Ok(())
}
