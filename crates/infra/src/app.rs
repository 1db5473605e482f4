//! The root of the construct tree.

use crate::error::{InfraError, Result};
use crate::stack::Stack;
use crate::template::{CloudAssembly, StackArtifact};

/// Name of the app scope, used in duplicate-id errors.
const APP_SCOPE: &str = "App";

/// A set of stacks synthesized together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct App {
    stacks: Vec<Stack>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fully built stack.
    pub fn add_stack(&mut self, stack: Stack) -> Result<&Stack> {
        if self.stacks.iter().any(|s| s.id() == stack.id()) {
            return Err(InfraError::DuplicateId {
                scope: APP_SCOPE.to_string(),
                id: stack.id().to_string(),
            });
        }
        self.stacks.push(stack);
        let index = self.stacks.len() - 1;
        Ok(&self.stacks[index])
    }

    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    pub fn stack(&self, id: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.id() == id)
    }

    /// Synthesizes every stack into a cloud assembly.
    pub fn synth(&self) -> Result<CloudAssembly> {
        let stacks = self
            .stacks
            .iter()
            .map(|stack| {
                Ok(StackArtifact {
                    stack_name: stack.id().to_string(),
                    environment: stack.environment().clone(),
                    template: stack.synth()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CloudAssembly { stacks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::StackProps;

    #[test]
    fn test_add_stack_rejects_duplicate_ids() {
        let mut app = App::new();
        app.add_stack(Stack::new("TestStack", StackProps::default()).unwrap())
            .unwrap();

        let err = app
            .add_stack(Stack::new("TestStack", StackProps::default()).unwrap())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "There is already a construct with id 'TestStack' in 'App'"
        );
    }

    #[test]
    fn test_synth_produces_one_artifact_per_stack() {
        let mut app = App::new();
        app.add_stack(Stack::new("One", StackProps::default()).unwrap())
            .unwrap();
        app.add_stack(Stack::new("Two", StackProps::default()).unwrap())
            .unwrap();

        let assembly = app.synth().unwrap();

        assert_eq!(assembly.stacks.len(), 2);
        assert!(assembly.stack("One").is_some());
        assert!(assembly.stack("Two").is_some());
        assert!(app.stack("Three").is_none());
    }
}
