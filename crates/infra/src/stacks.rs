//! The pipeline accelerator stack.
//!
//! Declares the short-URL table: a string partition key `pk`, one global
//! secondary index `sk-index` keyed on the string attribute `sk`, on-demand
//! billing, point-in-time recovery, encryption with the AWS managed key, and
//! deletion together with the stack.

use crate::dynamodb::{
    BillingMode, GsiConfig, KeyAttribute, RemovalPolicy, TableEncryption, TableProps,
};
use crate::error::Result;
use crate::stack::{Stack, StackProps};

/// Default stack id used by the CLI.
pub const DEFAULT_STACK_NAME: &str = "PipelineAcceleratorStack";

pub const SHORT_URL_TABLE_ID: &str = "ShortUrlTable";
pub const PARTITION_KEY: &str = "pk";
pub const SECONDARY_INDEX_NAME: &str = "sk-index";
pub const SECONDARY_INDEX_KEY: &str = "sk";

/// Table props of the short-URL table.
pub fn short_url_table_props() -> TableProps {
    TableProps::new(KeyAttribute::string(PARTITION_KEY))
        .with_billing_mode(BillingMode::PayPerRequest)
        .with_point_in_time_recovery(true)
        .with_removal_policy(RemovalPolicy::Destroy)
        .with_encryption(TableEncryption::AwsManaged)
}

/// Builds the pipeline accelerator stack. Pure: no I/O, nothing registered
/// anywhere; add the result to an [`App`](crate::App) to synthesize it.
pub fn pipeline_accelerator_stack(id: &str, props: StackProps) -> Result<Stack> {
    let mut stack = Stack::new(id, props)?;

    stack
        .add_table(SHORT_URL_TABLE_ID, short_url_table_props())?
        .add_global_secondary_index(GsiConfig::new(
            SECONDARY_INDEX_NAME,
            KeyAttribute::string(SECONDARY_INDEX_KEY),
        ));

    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::checks::{check_stack, SolutionsChecks};
    use crate::dynamodb::TABLE_RESOURCE_TYPE;
    use crate::stack::Environment;
    use crate::template::Template;
    use serde_json::json;

    fn test_stack() -> Stack {
        pipeline_accelerator_stack("TestStack", StackProps::default()).unwrap()
    }

    #[test]
    fn test_dynamodb_table_created() {
        let template = Template::from_stack(&test_stack()).unwrap();
        template
            .has_resource(TABLE_RESOURCE_TYPE, &json!({}))
            .unwrap();
    }

    #[test]
    fn test_exactly_one_table() {
        let template = Template::from_stack(&test_stack()).unwrap();
        template.resource_count_is(TABLE_RESOURCE_TYPE, 1).unwrap();
        assert_eq!(template.resources.len(), 1);
    }

    #[test]
    fn test_single_string_partition_key() {
        let template = Template::from_stack(&test_stack()).unwrap();
        template
            .has_resource_properties(
                TABLE_RESOURCE_TYPE,
                &json!({
                    "KeySchema": [{"AttributeName": "pk", "KeyType": "HASH"}],
                    "AttributeDefinitions": [
                        {"AttributeName": "pk", "AttributeType": "S"},
                        {"AttributeName": "sk", "AttributeType": "S"}
                    ]
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_single_secondary_index_on_sk() {
        let template = Template::from_stack(&test_stack()).unwrap();
        template
            .has_resource_properties(
                TABLE_RESOURCE_TYPE,
                &json!({
                    "GlobalSecondaryIndexes": [{
                        "IndexName": "sk-index",
                        "KeySchema": [{"AttributeName": "sk", "KeyType": "HASH"}],
                        "Projection": {"ProjectionType": "ALL"}
                    }]
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_on_demand_billing_without_capacity() {
        let template = Template::from_stack(&test_stack()).unwrap();
        let (_, table) = template
            .resources_of_type(TABLE_RESOURCE_TYPE)
            .next()
            .unwrap();

        assert_eq!(table.properties["BillingMode"], json!("PAY_PER_REQUEST"));
        assert!(table.properties.get("ProvisionedThroughput").is_none());
        assert!(table.properties["GlobalSecondaryIndexes"][0]
            .get("ProvisionedThroughput")
            .is_none());
    }

    #[test]
    fn test_recovery_and_encryption_enabled() {
        let template = Template::from_stack(&test_stack()).unwrap();
        template
            .has_resource_properties(
                TABLE_RESOURCE_TYPE,
                &json!({
                    "PointInTimeRecoverySpecification": {"PointInTimeRecoveryEnabled": true},
                    "SSESpecification": {"SSEEnabled": true}
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_destroyed_with_stack() {
        let template = Template::from_stack(&test_stack()).unwrap();
        template
            .has_resource(
                TABLE_RESOURCE_TYPE,
                &json!({"DeletionPolicy": "Delete", "UpdateReplacePolicy": "Delete"}),
            )
            .unwrap();
    }

    #[test]
    fn test_passes_solutions_checks() {
        let report = check_stack(&test_stack(), &SolutionsChecks::default());

        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_two_stacks_are_independent() {
        let mut app = App::new();
        app.add_stack(pipeline_accelerator_stack("StackA", StackProps::default()).unwrap())
            .unwrap();
        app.add_stack(
            pipeline_accelerator_stack(
                "StackB",
                StackProps {
                    env: Environment::new(Some("111111111111".into()), Some("eu-west-1".into())),
                    description: None,
                },
            )
            .unwrap(),
        )
        .unwrap();

        let assembly = app.synth().unwrap();
        let a = &assembly.stack("StackA").unwrap().template;
        let b = &assembly.stack("StackB").unwrap().template;

        for template in [a, b] {
            template.resource_count_is(TABLE_RESOURCE_TYPE, 1).unwrap();
            template
                .has_resource_properties(
                    TABLE_RESOURCE_TYPE,
                    &json!({"BillingMode": "PAY_PER_REQUEST"}),
                )
                .unwrap();
        }

        // Same construct path below the stack, so the same logical id.
        assert_eq!(
            a.resources.keys().collect::<Vec<_>>(),
            b.resources.keys().collect::<Vec<_>>()
        );
        let (_, table_a) = a.resources_of_type(TABLE_RESOURCE_TYPE).next().unwrap();
        let (_, table_b) = b.resources_of_type(TABLE_RESOURCE_TYPE).next().unwrap();
        assert_eq!(table_a.metadata["aws:cdk:path"], json!("StackA/ShortUrlTable/Resource"));
        assert_eq!(table_b.metadata["aws:cdk:path"], json!("StackB/ShortUrlTable/Resource"));

        let manifest = assembly.manifest();
        assert_eq!(
            manifest.artifacts["StackA"].environment,
            "aws://unknown-account/unknown-region"
        );
        assert_eq!(
            manifest.artifacts["StackB"].environment,
            "aws://111111111111/eu-west-1"
        );
    }

    #[test]
    fn test_environment_unset_by_default() {
        assert!(test_stack().environment().is_agnostic());
    }
}
