//! Renders a table declaration into a CloudFormation resource (Functional Core).

use std::collections::BTreeMap;

use aws_sdk_dynamodb::types::{
    BillingMode as SdkBillingMode, KeyType, ProjectionType as SdkProjectionType,
    ScalarAttributeType, SseType,
};
use serde::Serialize;

use super::config::{self, BillingMode, KeyAttribute, ProjectionType, TableEncryption};
use super::table::Table;
use crate::error::Result;
use crate::naming;
use crate::template::{TemplateResource, PATH_METADATA_KEY};

/// CloudFormation type of a DynamoDB table.
pub const TABLE_RESOURCE_TYPE: &str = "AWS::DynamoDB::Table";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TableProperties {
    key_schema: Vec<KeySchemaElement>,
    attribute_definitions: Vec<AttributeDefinition>,
    billing_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioned_throughput: Option<ProvisionedThroughput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    point_in_time_recovery_specification: Option<PointInTimeRecoverySpecification>,
    #[serde(rename = "SSESpecification", skip_serializing_if = "Option::is_none")]
    sse_specification: Option<SseSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct KeySchemaElement {
    attribute_name: String,
    key_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeDefinition {
    attribute_name: String,
    attribute_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProvisionedThroughput {
    read_capacity_units: u64,
    write_capacity_units: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct GlobalSecondaryIndex {
    index_name: String,
    key_schema: Vec<KeySchemaElement>,
    projection: Projection,
    #[serde(skip_serializing_if = "Option::is_none")]
    provisioned_throughput: Option<ProvisionedThroughput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Projection {
    projection_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    non_key_attributes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PointInTimeRecoverySpecification {
    point_in_time_recovery_enabled: bool,
}

#[derive(Debug, Serialize)]
struct SseSpecification {
    #[serde(rename = "SSEEnabled")]
    sse_enabled: bool,
    #[serde(rename = "SSEType", skip_serializing_if = "Option::is_none")]
    sse_type: Option<String>,
    #[serde(rename = "KMSMasterKeyId", skip_serializing_if = "Option::is_none")]
    kms_master_key_id: Option<String>,
}

/// Renders `table` into its template resource. Validates the table first.
pub fn render_table(table: &Table) -> Result<TemplateResource> {
    table.validate()?;
    let props = table.props();

    let provisioned_throughput = match props.billing_mode {
        BillingMode::PayPerRequest => None,
        BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } => Some((read_capacity, write_capacity)),
    };
    let throughput = || {
        provisioned_throughput.map(|(read, write)| ProvisionedThroughput {
            read_capacity_units: read,
            write_capacity_units: write,
        })
    };

    let attribute_definitions = table
        .attribute_definitions()?
        .iter()
        .map(|attr| AttributeDefinition {
            attribute_name: attr.name.clone(),
            attribute_type: to_scalar_type(&attr.attribute_type).as_str().to_string(),
        })
        .collect();

    let global_secondary_indexes = table
        .global_secondary_indexes()
        .iter()
        .map(|gsi| GlobalSecondaryIndex {
            index_name: gsi.name.clone(),
            key_schema: key_schema(&gsi.partition_key, gsi.sort_key.as_ref()),
            projection: projection(&gsi.projection),
            provisioned_throughput: throughput(),
        })
        .collect();

    let properties = TableProperties {
        key_schema: key_schema(&props.partition_key, props.sort_key.as_ref()),
        attribute_definitions,
        billing_mode: to_sdk_billing_mode(&props.billing_mode).as_str().to_string(),
        provisioned_throughput: throughput(),
        global_secondary_indexes,
        point_in_time_recovery_specification: props.point_in_time_recovery.then_some(
            PointInTimeRecoverySpecification {
                point_in_time_recovery_enabled: true,
            },
        ),
        sse_specification: sse_specification(&props.encryption),
        table_name: props.table_name.clone(),
    };

    let resource_path = naming::join_path(&[&table.path(), naming::RESOURCE_CHILD_ID]);
    let policy = props.removal_policy.template_value().to_string();

    tracing::debug!(
        path = %resource_path,
        logical_id = %table.logical_id(),
        "rendered table"
    );

    Ok(TemplateResource {
        resource_type: TABLE_RESOURCE_TYPE.to_string(),
        properties: serde_json::to_value(properties)?,
        update_replace_policy: Some(policy.clone()),
        deletion_policy: Some(policy),
        metadata: BTreeMap::from([(
            PATH_METADATA_KEY.to_string(),
            serde_json::Value::String(resource_path),
        )]),
    })
}

fn key_schema(partition_key: &KeyAttribute, sort_key: Option<&KeyAttribute>) -> Vec<KeySchemaElement> {
    let mut schema = vec![KeySchemaElement {
        attribute_name: partition_key.name.clone(),
        key_type: KeyType::Hash.as_str().to_string(),
    }];

    if let Some(sk) = sort_key {
        schema.push(KeySchemaElement {
            attribute_name: sk.name.clone(),
            key_type: KeyType::Range.as_str().to_string(),
        });
    }

    schema
}

fn projection(projection: &ProjectionType) -> Projection {
    match projection {
        ProjectionType::All => Projection {
            projection_type: SdkProjectionType::All.as_str().to_string(),
            non_key_attributes: Vec::new(),
        },
        ProjectionType::KeysOnly => Projection {
            projection_type: SdkProjectionType::KeysOnly.as_str().to_string(),
            non_key_attributes: Vec::new(),
        },
        ProjectionType::Include(attributes) => Projection {
            projection_type: SdkProjectionType::Include.as_str().to_string(),
            non_key_attributes: attributes.clone(),
        },
    }
}

fn sse_specification(encryption: &TableEncryption) -> Option<SseSpecification> {
    match encryption {
        TableEncryption::Default => None,
        TableEncryption::AwsManaged => Some(SseSpecification {
            sse_enabled: true,
            sse_type: None,
            kms_master_key_id: None,
        }),
        TableEncryption::CustomerManaged { kms_key_arn } => Some(SseSpecification {
            sse_enabled: true,
            sse_type: Some(SseType::Kms.as_str().to_string()),
            kms_master_key_id: Some(kms_key_arn.clone()),
        }),
    }
}

fn to_sdk_billing_mode(billing_mode: &BillingMode) -> SdkBillingMode {
    match billing_mode {
        BillingMode::PayPerRequest => SdkBillingMode::PayPerRequest,
        BillingMode::Provisioned { .. } => SdkBillingMode::Provisioned,
    }
}

fn to_scalar_type(attr_type: &config::AttributeType) -> ScalarAttributeType {
    match attr_type {
        config::AttributeType::String => ScalarAttributeType::S,
        config::AttributeType::Number => ScalarAttributeType::N,
        config::AttributeType::Binary => ScalarAttributeType::B,
    }
}
