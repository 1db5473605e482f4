//! DynamoDB table declarations.

mod config;
mod render;
mod table;

pub use config::{
    AttributeType, BillingMode, GsiConfig, KeyAttribute, ProjectionType, RemovalPolicy,
    TableEncryption, TableProps,
};
pub use render::{render_table, TABLE_RESOURCE_TYPE};
pub use table::{Table, MAX_GLOBAL_SECONDARY_INDEXES};
