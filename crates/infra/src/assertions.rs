//! Assertions over synthesized templates, for use in tests.
//!
//! Patterns are JSON values matched "object-like": every key of a pattern
//! object must be present and match in the candidate, extra keys are ignored.
//! Arrays match element-wise and must have the same length. Everything else
//! compares equal.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::error::Result;
use crate::stack::Stack;
use crate::template::{Template, TemplateResource};

/// A failed template assertion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    #[error("Expected {expected} resources of type {resource_type} but found {found}")]
    CountMismatch {
        resource_type: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "Template has {candidates} resources with type {resource_type}, but none match as expected.\n{details}"
    )]
    NoMatch {
        resource_type: String,
        candidates: usize,
        details: String,
    },
}

impl Template {
    /// Synthesizes `stack` for inspection.
    pub fn from_stack(stack: &Stack) -> Result<Template> {
        stack.synth()
    }

    /// Asserts the template holds exactly `count` resources of `resource_type`.
    pub fn resource_count_is(
        &self,
        resource_type: &str,
        count: usize,
    ) -> std::result::Result<(), AssertionError> {
        let found = self.resources_of_type(resource_type).count();
        if found == count {
            Ok(())
        } else {
            Err(AssertionError::CountMismatch {
                resource_type: resource_type.to_string(),
                expected: count,
                found,
            })
        }
    }

    /// Asserts a resource of `resource_type` matches `pattern`, where the
    /// pattern describes the whole resource (`Properties`, `DeletionPolicy`, ...).
    pub fn has_resource(
        &self,
        resource_type: &str,
        pattern: &Value,
    ) -> std::result::Result<(), AssertionError> {
        self.expect_match(resource_type, pattern, resource_value)
    }

    /// Asserts a resource of `resource_type` has properties matching `pattern`.
    pub fn has_resource_properties(
        &self,
        resource_type: &str,
        pattern: &Value,
    ) -> std::result::Result<(), AssertionError> {
        self.expect_match(resource_type, pattern, |r| r.properties.clone())
    }

    /// Resources of `resource_type` matching `pattern`, keyed by logical id.
    pub fn find_resources(
        &self,
        resource_type: &str,
        pattern: &Value,
    ) -> BTreeMap<String, Value> {
        self.resources_of_type(resource_type)
            .map(|(id, r)| (id.clone(), resource_value(r)))
            .filter(|(_, value)| matches_like(pattern, value))
            .collect()
    }

    fn expect_match(
        &self,
        resource_type: &str,
        pattern: &Value,
        project: impl Fn(&TemplateResource) -> Value,
    ) -> std::result::Result<(), AssertionError> {
        let candidates: Vec<(&String, Value)> = self
            .resources_of_type(resource_type)
            .map(|(id, r)| (id, project(r)))
            .collect();

        if candidates
            .iter()
            .any(|(_, value)| matches_like(pattern, value))
        {
            return Ok(());
        }

        let details = candidates
            .iter()
            .map(|(id, value)| {
                format!(
                    "{}: {}",
                    id,
                    serde_json::to_string_pretty(value).unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Err(AssertionError::NoMatch {
            resource_type: resource_type.to_string(),
            candidates: candidates.len(),
            details,
        })
    }
}

fn resource_value(resource: &TemplateResource) -> Value {
    serde_json::to_value(resource).unwrap_or(Value::Null)
}

/// Object-like match of `pattern` against `actual`.
pub fn matches_like(pattern: &Value, actual: &Value) -> bool {
    match (pattern, actual) {
        (Value::Object(expected), Value::Object(actual)) => expected
            .iter()
            .all(|(key, value)| actual.get(key).is_some_and(|a| matches_like(value, a))),
        (Value::Array(expected), Value::Array(actual)) => {
            expected.len() == actual.len()
                && expected
                    .iter()
                    .zip(actual)
                    .all(|(e, a)| matches_like(e, a))
        }
        (expected, actual) => expected == actual,
    }
}
