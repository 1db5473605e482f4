//! Rule checks run over a built construct tree.
//!
//! Checks are an explicit step: callers build their stacks, then hand them to
//! [`check_stack`] or [`check_app`] before synthesizing. Nothing here mutates
//! the tree.

mod rules;

pub use rules::{BackupPlanCoverage, ManagedEncryption, PointInTimeRecovery, SolutionsChecks};

use std::fmt;

use crate::app::App;
use crate::dynamodb::Table;
use crate::stack::Stack;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Warning => write!(f, "Warning"),
            Level::Error => write!(f, "Error"),
        }
    }
}

/// A single rule evaluated against a table.
pub trait Rule {
    /// Rule id, unique within its rule pack.
    fn id(&self) -> &'static str;

    fn level(&self) -> Level;

    /// One-line summary of what is wrong when the rule fires.
    fn info(&self) -> &'static str;

    /// Why the rule matters, shown in verbose mode.
    fn explanation(&self) -> &'static str;

    /// Returns true when `table` complies.
    fn check(&self, table: &Table) -> bool;
}

/// A named collection of rules.
pub trait RulePack {
    fn name(&self) -> &'static str;

    fn rules(&self) -> &[Box<dyn Rule>];
}

/// A rule that fired on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule_id: String,
    pub level: Level,
    pub resource_path: String,
    pub info: String,
    pub explanation: String,
}

impl Finding {
    /// Renders the finding; `verbose` appends the explanation.
    pub fn format(&self, verbose: bool) -> String {
        let mut line = format!(
            "[{}] {}: {} {}",
            self.level, self.resource_path, self.rule_id, self.info
        );
        if verbose {
            line.push(' ');
            line.push_str(&self.explanation);
        }
        line
    }
}

/// The findings of one checks run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.level == Level::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.level == Level::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Runs every rule of `pack` against every table of `stack`.
pub fn check_stack(stack: &Stack, pack: &dyn RulePack) -> Report {
    let mut findings = Vec::new();

    for table in stack.tables() {
        for rule in pack.rules() {
            if rule.check(table) {
                continue;
            }

            let rule_id = format!("{}-{}", pack.name(), rule.id());
            if rule.level() == Level::Error {
                tracing::warn!(rule = %rule_id, resource = %table.path(), "rule check failed");
            } else {
                tracing::debug!(rule = %rule_id, resource = %table.path(), "rule check warning");
            }

            findings.push(Finding {
                rule_id,
                level: rule.level(),
                resource_path: table.path(),
                info: rule.info().to_string(),
                explanation: rule.explanation().to_string(),
            });
        }
    }

    Report { findings }
}

/// Runs `pack` against every stack of `app`.
pub fn check_app(app: &App, pack: &dyn RulePack) -> Report {
    let findings = app
        .stacks()
        .iter()
        .flat_map(|stack| check_stack(stack, pack).findings)
        .collect();

    Report { findings }
}
