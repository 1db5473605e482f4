use std::path::PathBuf;

use super::{build_app, enforce_checks};
use crate::config::StackConfig;
use crate::error::Result;
use crate::prelude::*;

/// Synthesize the stack into a cloud assembly.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Synthesize the stack into a cloud assembly.

Builds the stack, runs the AWS Solutions rule checks, and writes the
CloudFormation template plus manifest.json into the output directory.
Synthesis is aborted when a rule check reports an error.

Environment variables:
  PIPELINE_ACCELERATOR_STACK    - Stack name (defaults to PipelineAcceleratorStack)
  PIPELINE_ACCELERATOR_ACCOUNT  - Target AWS account (unset by default)
  PIPELINE_ACCELERATOR_REGION   - Target AWS region (unset by default)")]
pub struct SynthCommand {
    #[command(flatten)]
    pub stack: StackConfig,

    /// Directory to write the cloud assembly into.
    #[arg(long, short, default_value = "cdk.out", env = "PIPELINE_ACCELERATOR_OUTPUT")]
    pub output: PathBuf,

    /// Skip the rule checks.
    #[arg(long)]
    pub skip_checks: bool,
}

pub fn run(command: SynthCommand, global: &crate::Global) -> Result<Vec<PathBuf>> {
    let app = build_app(&command.stack)?;

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Stack:"), command.stack.stack_name);
        aprintln!("{} {}", p_b("Target:"), command.stack.target_display());
        aprintln!();
    }

    if command.skip_checks {
        tracing::warn!("rule checks skipped");
    } else {
        enforce_checks(&app, global)?;
    }

    let assembly = app.synth()?;
    let written = assembly.write_to(&command.output)?;

    if !global.is_silent() {
        aprintln!("{}", p_c("Cloud assembly:"));
        for path in &written {
            aprintln!("  {}", path.display());
        }
        aprintln!();
        aprintln!("{}", p_g("Synthesis complete."));
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Global;
    use pipeline_accelerator_infra::Template;

    #[test]
    fn test_synth_writes_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let command = SynthCommand {
            stack: StackConfig {
                stack_name: "TestStack".to_string(),
                account: None,
                region: None,
            },
            output: dir.path().join("cdk.out"),
            skip_checks: false,
        };
        let global = Global {
            silent: true,
            verbose: false,
        };

        let written = run(command, &global).unwrap();

        assert_eq!(written.len(), 2);
        let template: Template = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("cdk.out/TestStack.template.json")).unwrap(),
        )
        .unwrap();
        template
            .resource_count_is("AWS::DynamoDB::Table", 1)
            .unwrap();
    }

    #[test]
    fn test_synth_rejects_invalid_stack_name_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cdk.out");
        let command = SynthCommand {
            stack: StackConfig {
                stack_name: "My Stack".to_string(),
                account: None,
                region: None,
            },
            output: output.clone(),
            skip_checks: true,
        };
        let global = Global {
            silent: true,
            verbose: false,
        };

        assert!(run(command, &global).is_err());
        assert!(!output.exists());
    }
}
