// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

use core::fmt;
use core::str::FromStr;

use crate::ast::Segment;
use crate::document::Document;
use crate::errors::PathError;
use crate::evaluator::Evaluator;
use crate::parser::Parser;
use crate::value::Value;

/// A parsed path expression.
///
/// Parsing once and evaluating against many documents is the intended hot
/// path for pipeline callers that apply one configured expression to a
/// stream of documents.
///
/// Evaluation is a pure read-only traversal: it never mutates the
/// document, retains no state between calls, and is safe to run
/// concurrently against the same document from multiple threads.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPath {
    segments: Vec<Segment>,
}

impl DocumentPath {
    /// Parse a slash-delimited path expression. Empty and all-whitespace
    /// expressions are valid and evaluate to `Null`.
    pub fn parse(expr: &str) -> Result<DocumentPath, PathError> {
        Ok(DocumentPath {
            segments: Parser::new(expr).parse()?,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve this expression against a document, producing a single
    /// value, an ordered list of values, or `Null` when nothing matched.
    pub fn evaluate(&self, doc: &Document) -> Result<Value, PathError> {
        Evaluator::new(doc).evaluate(&self.segments)
    }
}

impl FromStr for DocumentPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentPath::parse(s)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                f.write_str("/")?;
            }
            segment.fmt(f)?;
            first = false;
        }
        Ok(())
    }
}

/// Parse and evaluate a path expression against a document in one step.
pub fn evaluate(doc: &Document, path: &str) -> Result<Value, PathError> {
    DocumentPath::parse(path)?.evaluate(doc)
}

/// Entry point for dynamic callers whose document or expression may be
/// absent (e.g. read from an optional pipeline attribute). Absence fails
/// with `InvalidArgument`.
pub fn evaluate_opt(doc: Option<&Document>, path: Option<&str>) -> Result<Value, PathError> {
    let doc = doc.ok_or(PathError::InvalidArgument("document"))?;
    let path = path.ok_or(PathError::InvalidArgument("path"))?;
    evaluate(doc, path)
}
