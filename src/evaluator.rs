// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

use core::cmp::Ordering;
use std::sync::Arc;

use log::debug;

use crate::ast::{CmpOp, Predicate, Segment};
use crate::document::Document;
use crate::errors::PathError;
use crate::value::Value;

/// Per-segment match accumulator with lazy scalar-to-list promotion: a
/// single match stays a scalar; the second match promotes the result to an
/// ordered list preserving encounter order.
enum Matches {
    Empty,
    One(Value),
    Many(Vec<Value>),
}

impl Matches {
    fn push(&mut self, v: Value) {
        *self = match std::mem::replace(self, Matches::Empty) {
            Matches::Empty => Matches::One(v),
            Matches::One(first) => Matches::Many(vec![first, v]),
            Matches::Many(mut list) => {
                list.push(v);
                Matches::Many(list)
            }
        };
    }

    fn into_value(self) -> Value {
        match self {
            Matches::Empty => Value::Null,
            Matches::One(v) => v,
            Matches::Many(list) => Value::from(list),
        }
    }
}

/// Where the current reference sits relative to the root document.
/// Schema-qualified keys are legal only in the first two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    RootProperties,
    Descended,
}

/// Resolves a parsed path expression against one document. Ephemeral;
/// created per evaluation, reads only from the borrowed document.
pub(crate) struct Evaluator<'a> {
    doc: &'a Document,
}

impl<'a> Evaluator<'a> {
    pub fn new(doc: &'a Document) -> Evaluator<'a> {
        Evaluator { doc }
    }

    pub fn evaluate(&self, segments: &[Segment]) -> Result<Value, PathError> {
        // An empty expression is a valid query for nothing.
        if segments.is_empty() {
            return Ok(Value::Null);
        }

        let mut context = Context::Root;
        let mut current = Value::Document(Arc::new(self.doc.clone()));
        for segment in segments {
            if current.is_null() {
                break;
            }
            (current, context) = self.step(current, context, segment)?;
            debug!("segment `{segment}` resolved to {current}");
        }
        Ok(current)
    }

    fn step(
        &self,
        current: Value,
        context: Context,
        segment: &Segment,
    ) -> Result<(Value, Context), PathError> {
        match segment {
            Segment::This => Ok((current, context)),

            Segment::SchemaKey { schema, name } => {
                if context == Context::Descended {
                    return Err(PathError::InvalidPath(format!(
                        "schema reference `{schema}:{name}` in a non-referenceable context"
                    )));
                }
                let value = self.doc.property_value(&format!("{schema}:{name}"));
                Ok((value, Context::Descended))
            }

            Segment::Index(idx) => match &current {
                Value::Array(elements) => {
                    Ok((index_array(elements, *idx)?, Context::Descended))
                }
                // Against anything else the digits are just a name, e.g. a
                // map keyed by "2".
                _ => Ok((lookup_name(&current, &idx.to_string()), Context::Descended)),
            },

            Segment::Predicate(predicate) => match &current {
                Value::Array(elements) => {
                    let mut matches = Matches::Empty;
                    for element in elements.iter() {
                        if predicate_matches(element, predicate) {
                            matches.push(element.clone());
                        }
                    }
                    Ok((matches.into_value(), Context::Descended))
                }
                _ => Err(PathError::InvalidPath(format!(
                    "filter {predicate} applied to a non-array reference"
                ))),
            },

            Segment::Name(name) => {
                // `properties` on the root document keeps the reference in
                // schema-referenceable territory.
                let next = if context == Context::Root && name == "properties" {
                    Context::RootProperties
                } else {
                    Context::Descended
                };
                match &current {
                    // Coordinate lookup: resolve the name against every
                    // element, accumulating matches in encounter order.
                    Value::Array(elements) => {
                        let mut matches = Matches::Empty;
                        for element in elements.iter() {
                            let value = lookup_name(element, name);
                            if !value.is_null() {
                                matches.push(value);
                            }
                        }
                        Ok((matches.into_value(), next))
                    }
                    _ => Ok((lookup_name(&current, name), next)),
                }
            }
        }
    }
}

/// 1-based array access; a negative index counts from the end, `-1` being
/// the last element.
fn index_array(elements: &[Value], idx: i64) -> Result<Value, PathError> {
    let len = elements.len();
    let pos = if idx < 0 { len as i64 + idx + 1 } else { idx };
    if pos < 1 || pos > len as i64 {
        return Err(PathError::IndexOutOfRange { index: idx, len });
    }
    Ok(elements[(pos - 1) as usize].clone())
}

/// Single-reference named child lookup: map key, then the closed set of
/// bean attributes on documents and file descriptors. Scalars have no
/// children.
fn lookup_name(value: &Value, name: &str) -> Value {
    match value {
        Value::Object(map) => match map.get(name) {
            Some(v) => v.clone(),
            None => Value::Null,
        },
        Value::Document(doc) => doc.attribute(name).unwrap_or(Value::Null),
        Value::Blob(blob) => blob.attribute(name).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn predicate_matches(element: &Value, predicate: &Predicate) -> bool {
    let attr = lookup_name(element, &predicate.attr);
    compare(predicate.op, &attr, &predicate.literal)
}

// Numbers compare numerically across int/float, strings lexicographically,
// booleans by equality only. Type mismatches are false, never errors, so a
// filter over a heterogeneous array degrades to a non-match per element.
fn compare(op: CmpOp, left: &Value, right: &Value) -> bool {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.as_ref().cmp(b.as_ref())),
        (Value::Bool(a), Value::Bool(b)) if matches!(op, CmpOp::Eq | CmpOp::Ne) => {
            Some(a.cmp(b))
        }
        _ => None,
    };
    match ordering {
        Some(o) => match op {
            CmpOp::Lt => o == Ordering::Less,
            CmpOp::Le => o != Ordering::Greater,
            CmpOp::Eq => o == Ordering::Equal,
            CmpOp::Ge => o != Ordering::Less,
            CmpOp::Gt => o == Ordering::Greater,
            CmpOp::Ne => o != Ordering::Equal,
        },
        None => false,
    }
}
