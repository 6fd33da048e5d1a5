// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

mod ast;
mod document;
mod engine;
mod errors;
mod evaluator;
mod number;
mod parser;
mod value;

pub use document::{Blob, Document};
pub use engine::{evaluate, evaluate_opt, DocumentPath};
pub use errors::PathError;
pub use number::Number;
pub use value::Value;

/// Items in `unstable` are likely to change.
pub mod unstable {
    pub use crate::ast::*;
    pub use crate::parser::*;
}
