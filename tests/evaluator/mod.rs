// Copyright (c) the docpath contributors.
// Licensed under the MIT License.

#![cfg(test)]

use std::collections::BTreeMap;

use anyhow::Result;
use docpath::{evaluate, evaluate_opt, Blob, Document, DocumentPath, PathError, Value};

fn files() -> Vec<Value> {
    vec![
        Value::from(Blob::new("a", "text/plain", "abc", 123)),
        Value::from(Blob::new("b", "text/html", "def", 456)),
        Value::from(Blob::new("c", "application/pdf", "ghi", 789)),
        Value::from(Blob::new("d", "application/octet-stream", "jkl", 101112)),
        Value::from(Blob::new("e", "video/mp4", "mno", 131415)),
    ]
}

fn sample_document() -> Document {
    let pair = Value::from(BTreeMap::from([(
        "key".to_string(),
        Value::from("three"),
    )]));
    let nested = Value::from(vec![
        Value::from(4),
        Value::from("four"),
        Value::from(4.0),
        Value::from(4.0),
    ]);
    Document::new("3b02b7a3-9318-4296-ba0b-4ef0f1b979e0", "test.doc")
        .with_path("/default-domain/workspaces/test.doc")
        .with_type("File")
        .with_state("project")
        .with_property("sample:string", "test")
        .with_property("sample:bool", true)
        .with_property("sample:int", 42)
        .with_property("sample:float", 2.7)
        .with_property("sample:double", std::f64::consts::PI)
        .with_property(
            "sample:array",
            vec![Value::from("one"), Value::from(2), pair, nested],
        )
        .with_property("files:files", files())
}

#[test]
fn document_paths() -> Result<()> {
    let doc = sample_document();
    assert_eq!(evaluate(&doc, "")?, Value::Null);
    assert_eq!(evaluate(&doc, " \t\n")?, Value::Null);
    assert_eq!(evaluate(&doc, ".")?, Value::from(doc.clone()));
    assert_eq!(evaluate(&doc, "id")?, Value::from(doc.id.as_str()));
    assert_eq!(evaluate(&doc, "name")?, Value::from("test.doc"));
    assert_eq!(evaluate(&doc, "title")?, Value::from("test.doc"));
    assert_eq!(
        evaluate(&doc, "path")?,
        Value::from("/default-domain/workspaces/test.doc")
    );
    assert_eq!(evaluate(&doc, "type")?, Value::from("File"));
    assert_eq!(evaluate(&doc, "locked")?, Value::Bool(false));
    assert_eq!(evaluate(&doc, "state")?, Value::from("project"));
    assert_eq!(evaluate(&doc, "invalid")?, Value::Null);
    Ok(())
}

#[test]
fn missing_arguments() {
    let doc = sample_document();
    assert_eq!(
        evaluate_opt(None, Some("id")),
        Err(PathError::InvalidArgument("document"))
    );
    assert_eq!(
        evaluate_opt(Some(&doc), None),
        Err(PathError::InvalidArgument("path"))
    );
    assert_eq!(evaluate_opt(Some(&doc), Some("")), Ok(Value::Null));
}

#[test]
fn properties_paths() -> Result<()> {
    let doc = sample_document();
    assert_eq!(evaluate(&doc, "sample:string")?, Value::from("test"));
    assert_eq!(evaluate(&doc, "sample:bool")?, Value::Bool(true));
    assert_eq!(evaluate(&doc, "sample:int")?, Value::from(42));
    assert_eq!(evaluate(&doc, "sample:float")?, Value::from(2.7));
    assert_eq!(
        evaluate(&doc, "sample:double")?,
        Value::from(std::f64::consts::PI)
    );
    assert_eq!(evaluate(&doc, "properties/sample:int")?, Value::from(42));
    assert_eq!(evaluate(&doc, "missing:value")?, Value::Null);
    // A lookup past a missing property short-circuits to null.
    assert_eq!(evaluate(&doc, "missing:value/name")?, Value::Null);
    Ok(())
}

#[test]
fn array_paths() -> Result<()> {
    let doc = sample_document();
    assert_eq!(evaluate(&doc, "sample:array/1")?, Value::from("one"));
    assert_eq!(evaluate(&doc, "sample:array/2")?, Value::from(2));
    assert_eq!(evaluate(&doc, "sample:array/3/key")?, Value::from("three"));
    assert_eq!(
        evaluate(&doc, "sample:array/4")?,
        Value::from(vec![
            Value::from(4),
            Value::from("four"),
            Value::from(4.0),
            Value::from(4.0),
        ])
    );
    assert_eq!(evaluate(&doc, "sample:array/4/2")?, Value::from("four"));
    Ok(())
}

#[test]
fn negative_indices() -> Result<()> {
    let doc = sample_document();
    // -1 addresses the last element, -len the first.
    assert_eq!(
        evaluate(&doc, "sample:array/-1")?,
        evaluate(&doc, "sample:array/4")?
    );
    assert_eq!(
        evaluate(&doc, "sample:array/-4")?,
        evaluate(&doc, "sample:array/1")?
    );
    assert_eq!(
        evaluate(&doc, "files:files/-2/name")?,
        Value::from("d")
    );
    Ok(())
}

#[test]
fn index_out_of_range() {
    let doc = sample_document();
    for path in ["sample:array/0", "sample:array/5", "sample:array/-5"] {
        assert_eq!(
            evaluate(&doc, path),
            Err(PathError::IndexOutOfRange {
                index: path.rsplit('/').next().unwrap().parse().unwrap(),
                len: 4
            }),
            "{path}"
        );
    }
}

#[test]
fn schema_key_in_nested_context() {
    let doc = sample_document();
    for path in ["properties/sample:int/test:int", "sample:int/nested:int"] {
        assert!(
            matches!(evaluate(&doc, path), Err(PathError::InvalidPath(_))),
            "{path}"
        );
    }
    // `properties` straight off the root is still referenceable.
    assert_eq!(
        evaluate(&doc, "properties/sample:int").unwrap(),
        Value::from(42)
    );
}

#[test]
fn filters() -> Result<()> {
    let doc = sample_document();
    assert_eq!(evaluate(&doc, "files:files")?, Value::from(files()));

    // Two survivors, original order preserved.
    assert_eq!(
        evaluate(&doc, "files:files/[length>1000]")?,
        Value::from(vec![
            Value::from(Blob::new("d", "application/octet-stream", "jkl", 101112)),
            Value::from(Blob::new("e", "video/mp4", "mno", 131415)),
        ])
    );

    // A single survivor is a scalar, not a one-element list.
    assert_eq!(
        evaluate(&doc, "files:files/[length>110000]")?,
        Value::from(Blob::new("e", "video/mp4", "mno", 131415))
    );

    // No survivors is null, not an error.
    assert_eq!(evaluate(&doc, "files:files/[length>999999]")?, Value::Null);
    Ok(())
}

#[test]
fn filter_operators() -> Result<()> {
    let doc = sample_document();
    assert_eq!(
        evaluate(&doc, "files:files/[mime-type='text/plain']/name")?,
        Value::from("a")
    );
    assert_eq!(
        evaluate(&doc, "files:files/[length<=456]/name")?,
        Value::from(vec![Value::from("a"), Value::from("b")])
    );
    assert_eq!(
        evaluate(&doc, "files:files/[name!='a']/length")?,
        Value::from(vec![
            Value::from(456u64),
            Value::from(789u64),
            Value::from(101112u64),
            Value::from(131415u64),
        ])
    );
    assert_eq!(
        evaluate(&doc, "files:files/[digest=\"mno\"]/name")?,
        Value::from("e")
    );
    Ok(())
}

#[test]
fn filter_on_non_array() {
    let doc = sample_document();
    assert!(matches!(
        evaluate(&doc, "sample:int/[length>1]"),
        Err(PathError::InvalidPath(_))
    ));
}

#[test]
fn coordinate_lookup_promotes_lazily() -> Result<()> {
    let doc = sample_document();
    // Five matches: an ordered list.
    assert_eq!(
        evaluate(&doc, "files:files/name")?,
        Value::from(vec![
            Value::from("a"),
            Value::from("b"),
            Value::from("c"),
            Value::from("d"),
            Value::from("e"),
        ])
    );
    // Exactly one match stays a scalar.
    assert_eq!(
        evaluate(&doc, "files:files/[length>110000]/name")?,
        Value::from("e")
    );
    // Only one element of the mixed array has a `key` child.
    assert_eq!(evaluate(&doc, "sample:array/key")?, Value::from("three"));
    // No element has this child.
    assert_eq!(evaluate(&doc, "sample:array/bogus")?, Value::Null);
    Ok(())
}

#[test]
fn nested_documents() -> Result<()> {
    let parent = Document::new("parent-id", "workspace")
        .with_type("Workspace")
        .with_property("dc:title", "Workspace");
    let doc = sample_document().with_property("rel:parent", Value::from(parent.clone()));
    assert_eq!(evaluate(&doc, "rel:parent")?, Value::from(parent));
    assert_eq!(evaluate(&doc, "rel:parent/name")?, Value::from("workspace"));
    assert_eq!(evaluate(&doc, "rel:parent/type")?, Value::from("Workspace"));
    // Schema keys remain illegal below a nested document; only the root's
    // property mapping is referenceable.
    assert!(matches!(
        evaluate(&doc, "rel:parent/dc:title"),
        Err(PathError::InvalidPath(_))
    ));
    Ok(())
}

#[test]
fn self_segments() -> Result<()> {
    let doc = sample_document();
    assert_eq!(evaluate(&doc, "./sample:int")?, Value::from(42));
    assert_eq!(evaluate(&doc, "././name")?, Value::from("test.doc"));
    Ok(())
}

#[test]
fn empty_segments_are_skipped() -> Result<()> {
    let doc = sample_document();
    assert_eq!(evaluate(&doc, "/sample:int")?, Value::from(42));
    assert_eq!(evaluate(&doc, "sample:array//2")?, Value::from(2));
    assert_eq!(evaluate(&doc, "files:files/1/name/")?, Value::from("a"));
    Ok(())
}

#[test]
fn parse_once_evaluate_many() -> Result<()> {
    let path = DocumentPath::parse("files:files/[length>1000]/name")?;
    let doc = sample_document();
    let first = path.evaluate(&doc)?;
    let second = path.evaluate(&doc)?;
    assert_eq!(first, second);
    assert_eq!(
        first,
        Value::from(vec![Value::from("d"), Value::from("e")])
    );

    let other = Document::new("other", "empty.doc");
    assert_eq!(path.evaluate(&other)?, Value::Null);
    Ok(())
}

#[test]
fn idempotent_evaluation() -> Result<()> {
    let doc = sample_document();
    for path in ["", ".", "sample:array/-1", "files:files/name"] {
        assert_eq!(evaluate(&doc, path)?, evaluate(&doc, path)?, "{path}");
    }
    Ok(())
}
