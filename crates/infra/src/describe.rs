//! Pure functions for describing declared resources.

use crate::dynamodb::{BillingMode, ProjectionType, Table};
use crate::stack::Stack;

/// Format a table declaration for display.
pub fn format_table(table: &Table) -> Vec<String> {
    let props = table.props();

    let mut lines = vec![
        format!("+ Table: {} ({})", table.id(), table.logical_id()),
        format!(
            "  Partition key: {} ({})",
            props.partition_key.name,
            props.partition_key.attribute_type.code()
        ),
    ];
    if let Some(sk) = &props.sort_key {
        lines.push(format!("  Sort key: {} ({})", sk.name, sk.attribute_type.code()));
    }
    if let Some(name) = &props.table_name {
        lines.push(format!("  Table name: {}", name));
    }

    for gsi in table.global_secondary_indexes() {
        lines.push(format!("  + GSI: {}", gsi.name));
        lines.push(format!(
            "    Partition key: {} ({})",
            gsi.partition_key.name,
            gsi.partition_key.attribute_type.code()
        ));
        if let Some(sk) = &gsi.sort_key {
            lines.push(format!("    Sort key: {} ({})", sk.name, sk.attribute_type.code()));
        }
        lines.push(format!("    Projection: {}", format_projection(&gsi.projection)));
    }

    lines.push(match props.billing_mode {
        BillingMode::PayPerRequest => "  Billing: PAY_PER_REQUEST".to_string(),
        BillingMode::Provisioned {
            read_capacity,
            write_capacity,
        } => format!(
            "  Billing: PROVISIONED (read: {}, write: {})",
            read_capacity, write_capacity
        ),
    });
    lines.push(format!(
        "  Point-in-time recovery: {}",
        if props.point_in_time_recovery {
            "enabled"
        } else {
            "disabled"
        }
    ));
    lines.push(format!("  Encryption: {}", props.encryption.label()));
    lines.push(format!("  Removal policy: {}", props.removal_policy.label()));
    lines
}

/// Format every declaration of a stack for display.
pub fn format_stack(stack: &Stack) -> Vec<String> {
    let mut lines = vec![format!(
        "= Stack: {} ({})",
        stack.id(),
        stack.environment().uri()
    )];
    if let Some(description) = stack.description() {
        lines.push(format!("  {}", description));
    }
    if stack.tables().is_empty() {
        lines.push("  (no resources)".to_string());
    }
    for table in stack.tables() {
        lines.extend(format_table(table));
    }
    lines
}

fn format_projection(projection: &ProjectionType) -> String {
    match projection {
        ProjectionType::All => "ALL".to_string(),
        ProjectionType::KeysOnly => "KEYS_ONLY".to_string(),
        ProjectionType::Include(attributes) => format!("INCLUDE ({})", attributes.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::{GsiConfig, KeyAttribute, TableProps};
    use crate::stack::StackProps;

    #[test]
    fn test_format_default_table() {
        let mut stack = Stack::new("TestStack", StackProps::default()).unwrap();
        stack
            .add_table("Urls", TableProps::new(KeyAttribute::string("pk")))
            .unwrap()
            .add_global_secondary_index(
                GsiConfig::new("by-owner", KeyAttribute::string("owner"))
                    .with_projection(ProjectionType::Include(vec!["a".into(), "b".into()])),
            );

        let lines = format_table(&stack.tables()[0]);

        assert!(lines[0].starts_with("+ Table: Urls (Urls"));
        assert_eq!(lines[1], "  Partition key: pk (S)");
        assert_eq!(lines[2], "  + GSI: by-owner");
        assert_eq!(lines[3], "    Partition key: owner (S)");
        assert_eq!(lines[4], "    Projection: INCLUDE (a, b)");
        assert_eq!(lines[5], "  Billing: PROVISIONED (read: 5, write: 5)");
        assert_eq!(lines[6], "  Point-in-time recovery: disabled");
        assert_eq!(lines[7], "  Encryption: DEFAULT");
        assert_eq!(lines[8], "  Removal policy: RETAIN");
    }

    #[test]
    fn test_format_empty_stack() {
        let stack = Stack::new("Empty", StackProps::default()).unwrap();
        assert_eq!(
            format_stack(&stack),
            vec![
                "= Stack: Empty (aws://unknown-account/unknown-region)".to_string(),
                "  (no resources)".to_string(),
            ]
        );
    }
}
