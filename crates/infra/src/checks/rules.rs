//! The `AwsSolutions` rule pack, restricted to the DynamoDB rules.
//!
//! `DDB3` and `DDB4` mirror the upstream pack. `DDB-SSE` is a local rule with
//! no upstream counterpart.

use super::{Level, Rule, RulePack};
use crate::dynamodb::{Table, TableEncryption};

/// DynamoDB rules of the AWS Solutions pack.
pub struct SolutionsChecks {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for SolutionsChecks {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(PointInTimeRecovery),
                Box::new(BackupPlanCoverage),
                Box::new(ManagedEncryption),
            ],
        }
    }
}

impl RulePack for SolutionsChecks {
    fn name(&self) -> &'static str {
        "AwsSolutions"
    }

    fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}

/// DDB3: point-in-time recovery must be enabled.
pub struct PointInTimeRecovery;

impl Rule for PointInTimeRecovery {
    fn id(&self) -> &'static str {
        "DDB3"
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn info(&self) -> &'static str {
        "The DynamoDB table does not have Point-in-time Recovery enabled."
    }

    fn explanation(&self) -> &'static str {
        "DynamoDB continuous backups represent an additional layer of insurance against \
         accidental loss of data on top of on-demand backups."
    }

    fn check(&self, table: &Table) -> bool {
        table.props().point_in_time_recovery
    }
}

/// DDB4: the table should be part of a backup plan. Backup plans are not
/// modelled here, so this always reports.
pub struct BackupPlanCoverage;

impl Rule for BackupPlanCoverage {
    fn id(&self) -> &'static str {
        "DDB4"
    }

    fn level(&self) -> Level {
        Level::Warning
    }

    fn info(&self) -> &'static str {
        "The DynamoDB table is not in an AWS Backup plan."
    }

    fn explanation(&self) -> &'static str {
        "Backup plans help ensure that data is recoverable after an incident."
    }

    fn check(&self, _table: &Table) -> bool {
        false
    }
}

/// DDB-SSE: the table must be encrypted with a KMS key rather than the
/// AWS-owned default key. Not part of the upstream pack.
pub struct ManagedEncryption;

impl Rule for ManagedEncryption {
    fn id(&self) -> &'static str {
        "DDB-SSE"
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn info(&self) -> &'static str {
        "The DynamoDB table is not encrypted with an AWS managed or customer managed KMS key."
    }

    fn explanation(&self) -> &'static str {
        "KMS keys make access to the encryption key auditable and revocable."
    }

    fn check(&self, table: &Table) -> bool {
        !matches!(table.props().encryption, TableEncryption::Default)
    }
}
