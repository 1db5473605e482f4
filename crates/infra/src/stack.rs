//! Deployment units.

use crate::dynamodb::{render_table, Table, TableProps};
use crate::error::{InfraError, Result};
use crate::naming;
use crate::template::Template;

const UNKNOWN_ACCOUNT: &str = "unknown-account";
const UNKNOWN_REGION: &str = "unknown-region";

/// Target account and region of a stack. Unset fields fall back to whatever
/// the deploying tool resolves from its ambient configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub account: Option<String>,
    pub region: Option<String>,
}

impl Environment {
    pub fn new(account: Option<String>, region: Option<String>) -> Self {
        Self { account, region }
    }

    pub fn is_agnostic(&self) -> bool {
        self.account.is_none() && self.region.is_none()
    }

    /// `aws://<account>/<region>`, with placeholders for unset fields.
    pub fn uri(&self) -> String {
        format!(
            "aws://{}/{}",
            self.account.as_deref().unwrap_or(UNKNOWN_ACCOUNT),
            self.region.as_deref().unwrap_or(UNKNOWN_REGION)
        )
    }
}

/// Options for a stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackProps {
    pub env: Environment,
    pub description: Option<String>,
}

/// A named collection of resources synthesized into one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    id: String,
    props: StackProps,
    tables: Vec<Table>,
}

impl Stack {
    /// Creates an empty stack. `id` is also the deployed stack name.
    pub fn new(id: &str, props: StackProps) -> Result<Self> {
        naming::validate_stack_name(id)?;
        Ok(Self {
            id: id.to_string(),
            props,
            tables: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn environment(&self) -> &Environment {
        &self.props.env
    }

    pub fn description(&self) -> Option<&str> {
        self.props.description.as_deref()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id() == id)
    }

    /// Declares a table in this stack and returns it for further configuration.
    pub fn add_table(&mut self, id: &str, props: TableProps) -> Result<&mut Table> {
        if self.tables.iter().any(|t| t.id() == id) {
            return Err(InfraError::DuplicateId {
                scope: self.id.clone(),
                id: id.to_string(),
            });
        }

        let table = Table::new(&self.id, id, props)?;
        self.tables.push(table);
        let index = self.tables.len() - 1;
        Ok(&mut self.tables[index])
    }

    /// Renders the stack into a template.
    pub fn synth(&self) -> Result<Template> {
        let mut template = Template {
            description: self.props.description.clone(),
            ..Template::default()
        };

        for table in &self.tables {
            let resource = render_table(table)?;
            let logical_id = table.logical_id();
            if template.resources.contains_key(&logical_id) {
                return Err(InfraError::DuplicateId {
                    scope: self.id.clone(),
                    id: logical_id,
                });
            }
            template.resources.insert(logical_id, resource);
        }

        tracing::info!(
            stack = %self.id,
            resources = template.resources.len(),
            "synthesized stack"
        );

        Ok(template)
    }
}
