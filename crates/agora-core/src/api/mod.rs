//! API service layer
//!
//! High-level async functions for agent and review operations, used by the
//! HTTP server. This is the validation boundary and the single place where
//! storage field names are remapped to the client-facing shape (`name` →
//! `title`, snake_case → camelCase, integer ids → decimal strings).

pub mod agents;
pub mod reviews;

use crate::{Error, Result};

/// Reject a missing or empty required field
pub(crate) fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::InvalidInput(format!("{field} is required"))),
    }
}

/// Parse a decimal-string id as transmitted in request bodies and paths
pub(crate) fn parse_id(value: &str, field: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("{field} must be a numeric id")))
}
