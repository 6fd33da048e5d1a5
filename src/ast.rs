// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

use core::fmt;

use crate::value::Value;

/// Comparison operator inside a bracketed predicate.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CmpOp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "=",
            CmpOp::Ge => ">=",
            CmpOp::Gt => ">",
            CmpOp::Ne => "!=",
        };
        f.write_str(s)
    }
}

/// A bracketed filter such as `[length>1000]`: keep the elements whose
/// named attribute compares true against the literal.
#[derive(Debug, PartialEq, Clone)]
pub struct Predicate {
    pub attr: String,
    pub op: CmpOp,
    pub literal: Value,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{}{}]", self.attr, self.op, self.literal)
    }
}

/// One `/`-delimited unit of a path expression.
///
/// Classification is context-free; the evaluator decides what an `Index`
/// or `Name` means for the reference it is applied to.
#[derive(Debug, PartialEq, Clone)]
pub enum Segment {
    /// `.` — the current reference itself.
    This,
    /// A colon-qualified property key, e.g. `dc:title`. Valid only against
    /// the root document or its property mapping.
    SchemaKey { schema: String, name: String },
    /// A signed integer. 1-based against arrays; negative counts from the
    /// end with `-1` addressing the last element.
    Index(i64),
    /// A bracketed filter over the elements of an array.
    Predicate(Predicate),
    /// A generic named child: map key, bean attribute, or a per-element
    /// lookup when the current reference is an array.
    Name(String),
}

impl Segment {
    /// The qualified `schema:name` property key for schema segments.
    pub fn qualified_key(&self) -> Option<String> {
        match self {
            Segment::SchemaKey { schema, name } => Some(format!("{schema}:{name}")),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::This => f.write_str("."),
            Segment::SchemaKey { schema, name } => write!(f, "{schema}:{name}"),
            Segment::Index(i) => write!(f, "{i}"),
            Segment::Predicate(p) => p.fmt(f),
            Segment::Name(n) => f.write_str(n),
        }
    }
}
