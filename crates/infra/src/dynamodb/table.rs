//! The table construct.

use std::collections::HashSet;

use super::config::{BillingMode, GsiConfig, KeyAttribute, ProjectionType, TableProps};
use crate::error::{InfraError, Result};
use crate::naming;

/// DynamoDB allows at most this many global secondary indexes per table.
pub const MAX_GLOBAL_SECONDARY_INDEXES: usize = 20;

/// A DynamoDB table declared inside a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    stack_id: String,
    id: String,
    props: TableProps,
    gsis: Vec<GsiConfig>,
}

impl Table {
    pub(crate) fn new(stack_id: &str, id: &str, props: TableProps) -> Result<Self> {
        naming::validate_id(id)?;
        Ok(Self {
            stack_id: stack_id.to_string(),
            id: id.to_string(),
            props,
            gsis: Vec::new(),
        })
    }

    /// Construct id within the stack.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Construct path, `<Stack>/<Table>`.
    pub fn path(&self) -> String {
        naming::join_path(&[&self.stack_id, &self.id])
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    pub fn global_secondary_indexes(&self) -> &[GsiConfig] {
        &self.gsis
    }

    /// Adds a global secondary index. Checked when the stack is synthesized.
    pub fn add_global_secondary_index(&mut self, gsi: GsiConfig) -> &mut Self {
        self.gsis.push(gsi);
        self
    }

    /// Logical id of the table resource in the rendered template.
    pub fn logical_id(&self) -> String {
        naming::logical_id(&[&self.id, naming::RESOURCE_CHILD_ID])
    }

    /// Every attribute used by the table and index key schemas, table keys
    /// first, deduplicated by name in declaration order.
    pub fn attribute_definitions(&self) -> Result<Vec<KeyAttribute>> {
        let mut definitions: Vec<KeyAttribute> = Vec::new();

        let keys = std::iter::once(&self.props.partition_key)
            .chain(self.props.sort_key.iter())
            .chain(
                self.gsis
                    .iter()
                    .flat_map(|gsi| std::iter::once(&gsi.partition_key).chain(gsi.sort_key.iter())),
            );

        for key in keys {
            match definitions.iter().find(|d| d.name == key.name) {
                Some(existing) if existing.attribute_type != key.attribute_type => {
                    return Err(self.invalid(format!(
                        "attribute '{}' is declared as both {} and {}",
                        key.name,
                        existing.attribute_type.code(),
                        key.attribute_type.code()
                    )));
                }
                Some(_) => {}
                None => definitions.push(key.clone()),
            }
        }

        Ok(definitions)
    }

    /// Checks the table schema before rendering.
    pub fn validate(&self) -> Result<()> {
        if self.props.partition_key.name.trim().is_empty() {
            return Err(self.invalid("partition key name cannot be empty".to_string()));
        }

        if let Some(sk) = &self.props.sort_key {
            if sk.name == self.props.partition_key.name {
                return Err(self.invalid(format!(
                    "sort key '{}' must differ from the partition key",
                    sk.name
                )));
            }
        }

        if let BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } = self.props.billing_mode
        {
            if read_capacity == 0 || write_capacity == 0 {
                return Err(self.invalid("provisioned capacity must be positive".to_string()));
            }
        }

        if self.gsis.len() > MAX_GLOBAL_SECONDARY_INDEXES {
            return Err(self.invalid(format!(
                "a table can have at most {} global secondary indexes, found {}",
                MAX_GLOBAL_SECONDARY_INDEXES,
                self.gsis.len()
            )));
        }

        let mut index_names = HashSet::new();
        for gsi in &self.gsis {
            if let Err(reason) = naming::validate_index_name(&gsi.name) {
                return Err(self.invalid(format!("index '{}': {}", gsi.name, reason)));
            }
            if !index_names.insert(gsi.name.as_str()) {
                return Err(self.invalid(format!("duplicate index name '{}'", gsi.name)));
            }
            if let ProjectionType::Include(attributes) = &gsi.projection {
                if attributes.is_empty() {
                    return Err(self.invalid(format!(
                        "index '{}' uses an INCLUDE projection without attributes",
                        gsi.name
                    )));
                }
            }
        }

        self.attribute_definitions()?;
        Ok(())
    }

    fn invalid(&self, reason: String) -> InfraError {
        InfraError::InvalidTable {
            table: self.path(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::AttributeType;

    fn table() -> Table {
        Table::new("TestStack", "Urls", TableProps::new(KeyAttribute::string("pk"))).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_id() {
        let result = Table::new("TestStack", "", TableProps::new(KeyAttribute::string("pk")));
        assert!(matches!(result, Err(InfraError::InvalidId { .. })));
    }

    #[test]
    fn test_path_includes_stack() {
        assert_eq!(table().path(), "TestStack/Urls");
    }

    #[test]
    fn test_attribute_definitions_deduplicate_in_order() {
        let mut table = table();
        table
            .add_global_secondary_index(GsiConfig::new("sk-index", KeyAttribute::string("sk")))
            .add_global_secondary_index(
                GsiConfig::new("pk-sk", KeyAttribute::string("pk"))
                    .with_sort_key(KeyAttribute::string("sk")),
            );

        let names: Vec<String> = table
            .attribute_definitions()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["pk", "sk"]);
    }

    #[test]
    fn test_conflicting_attribute_types_rejected() {
        let mut table = table();
        table.add_global_secondary_index(GsiConfig::new(
            "by-pk",
            KeyAttribute::new("pk", AttributeType::Number),
        ));

        let err = table.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid table 'TestStack/Urls': attribute 'pk' is declared as both S and N"
        );
    }

    #[test]
    fn test_duplicate_index_names_rejected() {
        let mut table = table();
        table
            .add_global_secondary_index(GsiConfig::new("sk-index", KeyAttribute::string("sk")))
            .add_global_secondary_index(GsiConfig::new("sk-index", KeyAttribute::string("other")));

        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate index name 'sk-index'"));
    }

    #[test]
    fn test_invalid_index_names_rejected() {
        for name in ["a", "by owner", "idx/1"] {
            let mut table = table();
            table.add_global_secondary_index(GsiConfig::new(name, KeyAttribute::string("sk")));

            let err = table.validate().unwrap_err();
            assert!(
                err.to_string().contains(&format!("index '{name}'")),
                "{err}"
            );
        }
    }

    #[test]
    fn test_too_many_indexes_rejected() {
        let mut table = table();
        for i in 0..=MAX_GLOBAL_SECONDARY_INDEXES {
            let name = format!("gsi{i}");
            table.add_global_secondary_index(GsiConfig::new(&name, KeyAttribute::string(&name)));
        }
        assert!(matches!(
            table.validate(),
            Err(InfraError::InvalidTable { .. })
        ));
    }

    #[test]
    fn test_empty_include_projection_rejected() {
        let mut table = table();
        table.add_global_secondary_index(
            GsiConfig::new("sk-index", KeyAttribute::string("sk"))
                .with_projection(ProjectionType::Include(Vec::new())),
        );
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let table = Table::new(
            "TestStack",
            "Urls",
            TableProps::new(KeyAttribute::string("pk")).with_billing_mode(
                BillingMode::Provisioned {
                    read_capacity: 0,
                    write_capacity: 5,
                },
            ),
        )
        .unwrap();
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_sort_key_must_differ_from_partition_key() {
        let table = Table::new(
            "TestStack",
            "Urls",
            TableProps::new(KeyAttribute::string("pk")).with_sort_key(KeyAttribute::string("pk")),
        )
        .unwrap();
        assert!(table.validate().is_err());
    }
}
