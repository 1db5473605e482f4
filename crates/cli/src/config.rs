//! Stack configuration shared by every command.

use pipeline_accelerator_infra::stacks::DEFAULT_STACK_NAME;
use pipeline_accelerator_infra::{Environment, StackProps};

/// Where and under which name the stack is declared.
///
/// Account and region stay unset unless given, in which case the deploying
/// tool uses its ambient AWS configuration.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct StackConfig {
    /// Stack name.
    #[arg(long, env = "PIPELINE_ACCELERATOR_STACK", default_value = DEFAULT_STACK_NAME)]
    pub stack_name: String,

    /// Target AWS account id.
    #[arg(long, env = "PIPELINE_ACCELERATOR_ACCOUNT")]
    pub account: Option<String>,

    /// Target AWS region.
    #[arg(long, env = "PIPELINE_ACCELERATOR_REGION")]
    pub region: Option<String>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            account: None,
            region: None,
        }
    }
}

impl StackConfig {
    pub fn environment(&self) -> Environment {
        Environment::new(self.account.clone(), self.region.clone())
    }

    pub fn stack_props(&self) -> StackProps {
        StackProps {
            env: self.environment(),
            description: None,
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        let env = self.environment();
        if env.is_agnostic() {
            format!("{} (environment-agnostic)", env.uri())
        } else {
            env.uri()
        }
    }
}
