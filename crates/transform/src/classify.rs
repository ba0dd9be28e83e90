//! Field shape classification
//!
//! Every key/value pair of a payload is classified into a [`FieldShape`]
//! before anything is written, so the transform dispatches on an exhaustive
//! match instead of probing properties ad hoc.

use nestwrite_core::{is_object, Payload};
use serde_json::Value;

use crate::conventions::WriteConventions;

/// What a payload field looks like to the transformer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// Key is an audit field; always dropped.
    AuditField,
    /// Value is null; always dropped.
    NullOmitted,
    /// String, number or boolean; passed through.
    Scalar(&'a Value),
    /// List with no objects in it (tag codes, ids); passed through.
    ScalarList(&'a [Value]),
    /// List mixing objects with non-objects; passed through untouched.
    MixedList(&'a [Value]),
    /// List of objects (or empty); a to-many relation.
    ToManyCandidate(&'a [Value]),
    /// Object whose only key is a non-null id; a connect reference.
    ConnectStub(&'a Value),
    /// Object that already has `create` and/or `update` buckets.
    PrebuiltEnvelope(&'a Payload),
    /// Any other object; a to-one relation to create or update.
    ToOneCandidate(&'a Payload),
}

impl FieldShape<'_> {
    /// Short name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            FieldShape::AuditField => "audit",
            FieldShape::NullOmitted => "null",
            FieldShape::Scalar(_) => "scalar",
            FieldShape::ScalarList(_) => "scalar_list",
            FieldShape::MixedList(_) => "mixed_list",
            FieldShape::ToManyCandidate(_) => "to_many",
            FieldShape::ConnectStub(_) => "connect",
            FieldShape::PrebuiltEnvelope(_) => "envelope",
            FieldShape::ToOneCandidate(_) => "to_one",
        }
    }
}

/// Classify one payload field.
pub fn classify<'a>(key: &str, value: &'a Value, conventions: &WriteConventions) -> FieldShape<'a> {
    if conventions.is_audit(key) {
        return FieldShape::AuditField;
    }
    match value {
        Value::Null => FieldShape::NullOmitted,
        Value::Array(items) => classify_list(items),
        Value::Object(obj) => classify_object(obj, conventions),
        scalar => FieldShape::Scalar(scalar),
    }
}

fn classify_list(items: &[Value]) -> FieldShape<'_> {
    let objects = items.iter().filter(|v| is_object(v)).count();
    if objects == items.len() {
        FieldShape::ToManyCandidate(items)
    } else if objects == 0 {
        FieldShape::ScalarList(items)
    } else {
        FieldShape::MixedList(items)
    }
}

fn classify_object<'a>(obj: &'a Payload, conventions: &WriteConventions) -> FieldShape<'a> {
    if is_envelope(obj, conventions) {
        return FieldShape::PrebuiltEnvelope(obj);
    }
    if obj.len() == 1 {
        // `{id: null}` has no id; it falls through to a create that cleans to `{}`.
        if let Some(id) = conventions.id_of(obj) {
            return FieldShape::ConnectStub(id);
        }
    }
    FieldShape::ToOneCandidate(obj)
}

/// Does the object already carry nested-write buckets?
pub fn is_envelope(obj: &Payload, conventions: &WriteConventions) -> bool {
    obj.contains_key(&conventions.keys.create) || obj.contains_key(&conventions.keys.update)
}
