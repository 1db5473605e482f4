use super::{build_app, enforce_checks};
use crate::config::StackConfig;
use crate::error::Result;
use crate::prelude::*;

/// Run the AWS Solutions rule checks against the stack.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run the AWS Solutions rule checks against the stack.

Errors make the command fail. Warnings are reported but do not fail it.
Use --verbose to print the explanation of each rule.")]
pub struct CheckCommand {
    #[command(flatten)]
    pub stack: StackConfig,
}

pub fn run(command: CheckCommand, global: &crate::Global) -> Result<()> {
    let app = build_app(&command.stack)?;

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Stack:"), command.stack.stack_name);
        aprintln!("{} {}", p_b("Target:"), command.stack.target_display());
        aprintln!();
    }

    enforce_checks(&app, global)?;

    if !global.is_silent() {
        aprintln!("{}", p_g("All rule checks passed."));
    }
    Ok(())
}
