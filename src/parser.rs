// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

use core::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{CmpOp, Predicate, Segment};
use crate::errors::PathError;
use crate::number::Number;
use crate::value::Value;

// Slashes inside a bracketed filter (e.g. `[mime-type='text/plain']`) are
// part of the filter, not segment delimiters.
fn split_segments(expr: &str) -> Vec<&str> {
    let mut parts = vec![];
    let mut start = 0;
    let mut depth = 0usize;
    for (i, c) in expr.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                parts.push(&expr[start..i]);
                start = i + 1;
            }
            _ => (),
        }
    }
    parts.push(&expr[start..]);
    parts
}

lazy_static! {
    // Colon-qualified property key, e.g. `dc:title` or `file:content`.
    static ref SCHEMA_KEY: Regex =
        Regex::new(r"^[A-Za-z_:][\w\-:]*:[A-Za-z_:][\w\-:]*$").expect("valid regex");

    // Attribute name inside a predicate, e.g. `length` or `mime-type`.
    static ref ATTR_NAME: Regex = Regex::new(r"^[A-Za-z_][\w\-]*$").expect("valid regex");
}

/// Splits a path expression on `/` and classifies each segment.
///
/// Classification priority per segment: schema-qualified key, bracketed
/// predicate, `.`, signed integer, generic name. Empty segments (from
/// leading, trailing or doubled slashes) are skipped.
pub struct Parser<'a> {
    expr: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(expr: &'a str) -> Parser<'a> {
        Parser { expr }
    }

    /// An empty or all-whitespace expression parses to zero segments.
    pub fn parse(&self) -> Result<Vec<Segment>, PathError> {
        let expr = self.expr.trim();
        if expr.is_empty() {
            return Ok(vec![]);
        }

        let mut segments = vec![];
        for part in split_segments(expr) {
            if part.is_empty() {
                continue;
            }
            segments.push(self.classify(part)?);
        }
        Ok(segments)
    }

    fn classify(&self, part: &str) -> Result<Segment, PathError> {
        if SCHEMA_KEY.is_match(part) {
            // The grammar admits stray colons in either token; split on
            // the first one like the original scanner did.
            let (schema, name) = match part.split_once(':') {
                Some(pair) => pair,
                None => return Err(PathError::InvalidPath(format!("bad schema key `{part}`"))),
            };
            return Ok(Segment::SchemaKey {
                schema: schema.to_string(),
                name: name.to_string(),
            });
        }

        if let Some(body) = part.strip_prefix('[') {
            let body = body
                .strip_suffix(']')
                .ok_or_else(|| PathError::InvalidPath(format!("unterminated filter `{part}`")))?;
            return Ok(Segment::Predicate(self.parse_predicate(body, part)?));
        }

        if part == "." {
            return Ok(Segment::This);
        }

        if let Ok(idx) = part.parse::<i64>() {
            return Ok(Segment::Index(idx));
        }

        Ok(Segment::Name(part.to_string()))
    }

    fn parse_predicate(&self, body: &str, part: &str) -> Result<Predicate, PathError> {
        let op_at = body
            .find(['<', '>', '=', '!'])
            .ok_or_else(|| PathError::InvalidPath(format!("no comparison in filter `{part}`")))?;

        let rest = &body[op_at..];
        let (op, op_len) = if rest.starts_with("<=") {
            (CmpOp::Le, 2)
        } else if rest.starts_with(">=") {
            (CmpOp::Ge, 2)
        } else if rest.starts_with("==") {
            (CmpOp::Eq, 2)
        } else if rest.starts_with("!=") {
            (CmpOp::Ne, 2)
        } else if rest.starts_with('<') {
            (CmpOp::Lt, 1)
        } else if rest.starts_with('>') {
            (CmpOp::Gt, 1)
        } else if rest.starts_with('=') {
            (CmpOp::Eq, 1)
        } else {
            return Err(PathError::InvalidPath(format!(
                "bad comparison operator in filter `{part}`"
            )));
        };

        let attr = body[..op_at].trim();
        if !ATTR_NAME.is_match(attr) {
            return Err(PathError::InvalidPath(format!(
                "bad attribute name in filter `{part}`"
            )));
        }

        let literal = self.parse_literal(body[op_at + op_len..].trim(), part)?;
        Ok(Predicate {
            attr: attr.to_string(),
            op,
            literal,
        })
    }

    fn parse_literal(&self, text: &str, part: &str) -> Result<Value, PathError> {
        if text.is_empty() {
            return Err(PathError::InvalidPath(format!(
                "missing literal in filter `{part}`"
            )));
        }
        for quote in ['\'', '"'] {
            if let Some(inner) = text.strip_prefix(quote) {
                let inner = inner.strip_suffix(quote).ok_or_else(|| {
                    PathError::InvalidPath(format!("unterminated string in filter `{part}`"))
                })?;
                return Ok(Value::from(inner));
            }
        }
        match text {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => (),
        }
        if text.starts_with(['-', '+']) || text.starts_with(|c: char| c.is_ascii_digit()) {
            if let Ok(n) = Number::from_str(text) {
                return Ok(Value::from(n));
            }
        }
        // Bare words compare as strings.
        Ok(Value::from(text))
    }
}
