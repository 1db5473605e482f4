//! pipeline_accelerator_infra - Declares the pipeline accelerator stack and
//! renders it into CloudFormation.
//!
//! The construct tree is plain data: an [`App`] owns [`Stack`]s, a stack owns
//! DynamoDB [`Table`](dynamodb::Table)s. Building it performs no I/O.
//! [`App::synth`] renders templates, [`checks`] runs rule packs over a built
//! tree, and [`assertions`] inspects rendered templates in tests.

pub mod app;
pub mod assertions;
pub mod checks;
pub mod describe;
pub mod dynamodb;
pub mod error;
pub mod naming;
pub mod stack;
pub mod stacks;
pub mod template;

pub use app::App;
pub use error::{InfraError, Result};
pub use stack::{Environment, Stack, StackProps};
pub use stacks::pipeline_accelerator_stack;
pub use template::{CloudAssembly, Template};
