// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A repository document: identity and lifecycle metadata plus a property
/// mapping keyed by qualified `schema:name` strings.
///
/// Documents are produced by the repository client and are never mutated
/// during path evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Document {
        Document {
            id: id.into(),
            name: name.into(),
            ..Document::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Document> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_str(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Document {
        self.path = path.into();
        self
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Document {
        self.doc_type = doc_type.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Document {
        self.state = state.into();
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Document {
        self.locked = locked;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Document {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Look up a property by its qualified `schema:name` key.
    /// Missing properties are `Null`, not an error.
    pub fn property_value(&self, key: &str) -> Value {
        match self.properties.get(key) {
            Some(v) => v.clone(),
            None => Value::Null,
        }
    }

    /// Bean-style attribute lookup. The attribute set is closed; anything
    /// else resolves to `None`. `title` aliases `name` because the
    /// repository client backs a document's name with its title.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id.as_str())),
            "name" | "title" => Some(Value::from(self.name.as_str())),
            "path" => Some(Value::from(self.path.as_str())),
            "type" => Some(Value::from(self.doc_type.as_str())),
            "state" => Some(Value::from(self.state.as_str())),
            "locked" => Some(Value::Bool(self.locked)),
            "properties" => Some(Value::from(self.properties.clone())),
            _ => None,
        }
    }
}

/// A file descriptor attached to a document property (name, mime type,
/// content digest and length in bytes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub name: String,
    #[serde(rename = "mime-type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub length: u64,
}

impl Blob {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        digest: impl Into<String>,
        length: u64,
    ) -> Blob {
        Blob {
            name: name.into(),
            mime_type: mime_type.into(),
            digest: digest.into(),
            length,
        }
    }

    // `mimeType` is accepted alongside the wire name because the upstream
    // bean getter is spelled that way.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "mime-type" | "mimeType" => Some(Value::from(self.mime_type.as_str())),
            "digest" => Some(Value::from(self.digest.as_str())),
            "length" => Some(Value::from(self.length)),
            _ => None,
        }
    }
}
