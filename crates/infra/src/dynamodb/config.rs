//! Table configuration types (Functional Core - pure data).

/// Table schema and options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProps {
    /// Physical table name. Left unset, the provisioning service generates one.
    pub table_name: Option<String>,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub billing_mode: BillingMode,
    pub point_in_time_recovery: bool,
    pub encryption: TableEncryption,
    pub removal_policy: RemovalPolicy,
}

impl TableProps {
    /// Table props keyed by `partition_key`, everything else at its default.
    pub fn new(partition_key: KeyAttribute) -> Self {
        Self {
            table_name: None,
            partition_key,
            sort_key: None,
            billing_mode: BillingMode::default(),
            point_in_time_recovery: false,
            encryption: TableEncryption::default(),
            removal_policy: RemovalPolicy::default(),
        }
    }

    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = Some(name.to_string());
        self
    }

    pub fn with_sort_key(mut self, sort_key: KeyAttribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn with_billing_mode(mut self, billing_mode: BillingMode) -> Self {
        self.billing_mode = billing_mode;
        self
    }

    pub fn with_point_in_time_recovery(mut self, enabled: bool) -> Self {
        self.point_in_time_recovery = enabled;
        self
    }

    pub fn with_encryption(mut self, encryption: TableEncryption) -> Self {
        self.encryption = encryption;
        self
    }

    pub fn with_removal_policy(mut self, removal_policy: RemovalPolicy) -> Self {
        self.removal_policy = removal_policy;
        self
    }
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn new(name: &str, attribute_type: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            attribute_type,
        }
    }

    /// Shorthand for a string-typed key.
    pub fn string(name: &str) -> Self {
        Self::new(name, AttributeType::String)
    }
}

/// DynamoDB scalar attribute types usable in key schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    /// Short type code, as shown in plans and templates.
    pub fn code(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
        }
    }
}

/// Global Secondary Index configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub projection: ProjectionType,
}

impl GsiConfig {
    /// An index projecting all attributes, keyed by `partition_key` only.
    pub fn new(name: &str, partition_key: KeyAttribute) -> Self {
        Self {
            name: name.to_string(),
            partition_key,
            sort_key: None,
            projection: ProjectionType::All,
        }
    }

    pub fn with_sort_key(mut self, sort_key: KeyAttribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn with_projection(mut self, projection: ProjectionType) -> Self {
        self.projection = projection;
        self
    }
}

/// GSI projection type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionType {
    All,
    KeysOnly,
    /// Keys plus the listed non-key attributes.
    Include(Vec<String>),
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
    Provisioned {
        read_capacity: u64,
        write_capacity: u64,
    },
}

impl Default for BillingMode {
    fn default() -> Self {
        BillingMode::Provisioned {
            read_capacity: 5,
            write_capacity: 5,
        }
    }
}

impl BillingMode {
    pub fn label(&self) -> &'static str {
        match self {
            BillingMode::PayPerRequest => "PAY_PER_REQUEST",
            BillingMode::Provisioned { .. } => "PROVISIONED",
        }
    }
}

/// At-rest encryption of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableEncryption {
    /// AWS-owned key. No SSE specification is rendered.
    #[default]
    Default,
    /// AWS managed KMS key (`alias/aws/dynamodb`).
    AwsManaged,
    /// Customer managed KMS key, referenced by ARN.
    CustomerManaged { kms_key_arn: String },
}

impl TableEncryption {
    pub fn label(&self) -> &'static str {
        match self {
            TableEncryption::Default => "DEFAULT",
            TableEncryption::AwsManaged => "AWS_MANAGED",
            TableEncryption::CustomerManaged { .. } => "CUSTOMER_MANAGED",
        }
    }
}

/// What happens to the table when it leaves the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Deleted together with the stack.
    Destroy,
    /// Orphaned in the account.
    #[default]
    Retain,
    /// Backed up, then deleted.
    Snapshot,
}

impl RemovalPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            RemovalPolicy::Destroy => "DESTROY",
            RemovalPolicy::Retain => "RETAIN",
            RemovalPolicy::Snapshot => "SNAPSHOT",
        }
    }

    /// Value of the template's `DeletionPolicy` / `UpdateReplacePolicy`.
    pub fn template_value(&self) -> &'static str {
        match self {
            RemovalPolicy::Destroy => "Delete",
            RemovalPolicy::Retain => "Retain",
            RemovalPolicy::Snapshot => "Snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_props_defaults() {
        let props = TableProps::new(KeyAttribute::string("id"));

        assert_eq!(props.table_name, None);
        assert_eq!(props.sort_key, None);
        assert_eq!(
            props.billing_mode,
            BillingMode::Provisioned {
                read_capacity: 5,
                write_capacity: 5
            }
        );
        assert!(!props.point_in_time_recovery);
        assert_eq!(props.encryption, TableEncryption::Default);
        assert_eq!(props.removal_policy, RemovalPolicy::Retain);
    }

    #[test]
    fn test_table_props_builders() {
        let props = TableProps::new(KeyAttribute::string("id"))
            .with_table_name("urls")
            .with_sort_key(KeyAttribute::new("ts", AttributeType::Number))
            .with_billing_mode(BillingMode::PayPerRequest)
            .with_point_in_time_recovery(true)
            .with_encryption(TableEncryption::AwsManaged)
            .with_removal_policy(RemovalPolicy::Destroy);

        assert_eq!(props.table_name.as_deref(), Some("urls"));
        assert_eq!(props.sort_key.map(|k| k.attribute_type), Some(AttributeType::Number));
        assert_eq!(props.billing_mode.label(), "PAY_PER_REQUEST");
        assert!(props.point_in_time_recovery);
        assert_eq!(props.encryption.label(), "AWS_MANAGED");
        assert_eq!(props.removal_policy.label(), "DESTROY");
    }

    #[test]
    fn test_gsi_defaults_to_all_projection() {
        let gsi = GsiConfig::new("by-owner", KeyAttribute::string("owner"));
        assert_eq!(gsi.projection, ProjectionType::All);
        assert!(gsi.sort_key.is_none());
    }

    #[test]
    fn test_removal_policy_template_values() {
        assert_eq!(RemovalPolicy::Destroy.template_value(), "Delete");
        assert_eq!(RemovalPolicy::Retain.template_value(), "Retain");
        assert_eq!(RemovalPolicy::Snapshot.template_value(), "Snapshot");
    }

    #[test]
    fn test_attribute_type_codes() {
        assert_eq!(AttributeType::String.code(), "S");
        assert_eq!(AttributeType::Number.code(), "N");
        assert_eq!(AttributeType::Binary.code(), "B");
    }
}
