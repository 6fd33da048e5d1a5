// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

use thiserror::Error;

/// Failures raised while parsing or evaluating a path expression.
///
/// A lookup that simply matches nothing is not a failure; it resolves to
/// `Value::Null` so that chained lookups short-circuit gracefully. Callers
/// are expected to catch errors per path expression and keep processing
/// other expressions and documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A required argument was absent.
    #[error("missing {0}")]
    InvalidArgument(&'static str),

    /// A segment is structurally invalid for the reference it is applied
    /// to, e.g. a schema-qualified key used after descending away from the
    /// root document, or a malformed predicate.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A numeric array index fell outside the valid range after
    /// negative-index normalization.
    #[error("array index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
}
