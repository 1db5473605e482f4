//! Construct ids, paths and template logical ids.
//!
//! Pure functions, no I/O.

use sha2::{Digest, Sha256};

use crate::error::{InfraError, Result};

/// Path separator between construct ids.
pub const PATH_SEPARATOR: &str = "/";

/// Id of the child that carries the actual template resource of a construct.
pub const RESOURCE_CHILD_ID: &str = "Resource";

/// CloudFormation limit on stack name length.
pub const MAX_STACK_NAME_LEN: usize = 128;

/// DynamoDB limits on index name length.
pub const MIN_INDEX_NAME_LEN: usize = 3;
pub const MAX_INDEX_NAME_LEN: usize = 255;

const HASH_LEN: usize = 8;

/// Checks that `id` can be used as a construct id.
pub fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(InfraError::InvalidId {
            id: id.to_string(),
            reason: "ids cannot be empty",
        });
    }
    if id.contains(PATH_SEPARATOR) {
        return Err(InfraError::InvalidId {
            id: id.to_string(),
            reason: "ids cannot contain '/'",
        });
    }
    Ok(())
}

/// Checks that `name` is a deployable stack name: an ASCII letter followed by
/// letters, digits and hyphens, at most 128 characters.
pub fn validate_stack_name(name: &str) -> Result<()> {
    validate_id(name)?;

    let invalid = |reason| InfraError::InvalidId {
        id: name.to_string(),
        reason,
    };

    if name.len() > MAX_STACK_NAME_LEN {
        return Err(invalid("stack names cannot exceed 128 characters"));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid("stack names must start with a letter"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(
            "stack names can only contain letters, digits and hyphens",
        ));
    }
    Ok(())
}

/// Checks that `name` is a valid DynamoDB index name: 3 to 255 characters
/// from `[A-Za-z0-9_.-]`.
pub fn validate_index_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.len() < MIN_INDEX_NAME_LEN || name.len() > MAX_INDEX_NAME_LEN {
        return Err("index names must be between 3 and 255 characters");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err("index names can only contain letters, digits, '_', '.' and '-'");
    }
    Ok(())
}

/// Joins construct ids into a path.
pub fn join_path(components: &[&str]) -> String {
    components.join(PATH_SEPARATOR)
}

/// Computes the logical id of a resource from its path below the stack.
///
/// The human part is the concatenation of the alphanumeric characters of each
/// component, skipping a trailing `Resource`; the suffix is the first eight
/// uppercase hex characters of the SHA-256 of the full path.
pub fn logical_id(components: &[&str]) -> String {
    let digest = Sha256::digest(join_path(components).as_bytes());
    let hash = hex::encode_upper(digest);

    let human_components = match components.split_last() {
        Some((last, rest)) if *last == RESOURCE_CHILD_ID && !rest.is_empty() => rest,
        _ => components,
    };

    let human: String = human_components
        .iter()
        .flat_map(|c| c.chars())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    format!("{}{}", human, &hash[..HASH_LEN])
}
