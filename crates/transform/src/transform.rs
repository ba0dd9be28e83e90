//! The nested-write transform
//!
//! Converts a form payload into a nested-write payload:
//!
//! | Input field                         | Output                                         |
//! |-------------------------------------|------------------------------------------------|
//! | audit field, `null`                 | omitted                                        |
//! | scalar, scalar-only or mixed list   | unchanged                                      |
//! | `{id}`                              | `{id}` (connect reference)                     |
//! | object with id                      | `{update: <cleaned, no id>}`                   |
//! | object without id                   | `{create: <cleaned>}`                          |
//! | list of objects                     | `{create: [...], update: [{where, data}]}`     |
//! | object with `create`/`update` keys  | buckets re-cleaned, not re-wrapped             |
//!
//! Empty results (empty lists, objects that clean to `{}`) are omitted.
//! The transform is total: it never fails and never panics.

use nestwrite_core::{payload_from_value, Payload, Result};
use serde_json::Value;

use crate::classify::{classify, FieldShape};
use crate::clean::{clean_body, clean_object, IdPolicy};
use crate::conventions::WriteConventions;
use crate::report::{FieldOutcome, TransformReport};

/// Applies the transform under a fixed set of conventions.
///
/// Holds no state besides its conventions, so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    conventions: WriteConventions,
}

impl Transformer {
    /// Create a transformer with the given conventions.
    pub fn new(conventions: WriteConventions) -> Self {
        Self { conventions }
    }

    /// The conventions in use.
    pub fn conventions(&self) -> &WriteConventions {
        &self.conventions
    }

    /// Transform a payload.
    pub fn transform(&self, payload: &Payload) -> Payload {
        self.transform_with_report(payload).0
    }

    /// Transform a payload given as an arbitrary JSON value.
    ///
    /// Fails only if the value is not an object.
    pub fn transform_value(&self, value: Value) -> Result<Payload> {
        Ok(self.transform(&payload_from_value(value)?))
    }

    /// Transform a payload and report what happened to each field.
    pub fn transform_with_report(&self, payload: &Payload) -> (Payload, TransformReport) {
        let mut out = Payload::new();
        let mut report = TransformReport::default();

        for (key, value) in payload {
            let shape = classify(key, value, &self.conventions);
            let (written, outcome) = self.shape_field(key, shape);
            if let Some(written) = written {
                out.insert(key.clone(), written);
            }
            report.record(key, outcome);
        }

        self.collapse_connects(&mut out);
        (out, report)
    }

    fn shape_field(&self, key: &str, shape: FieldShape<'_>) -> (Option<Value>, FieldOutcome) {
        let keys = &self.conventions.keys;
        let shape_name = shape.name();
        match shape {
            FieldShape::AuditField => (None, FieldOutcome::OmittedAudit),
            FieldShape::NullOmitted => (None, FieldOutcome::OmittedNull),
            FieldShape::Scalar(v) => (Some(v.clone()), FieldOutcome::Passed),
            FieldShape::ScalarList(items) => {
                (Some(Value::Array(items.to_vec())), FieldOutcome::Passed)
            }
            FieldShape::MixedList(items) => {
                tracing::warn!(
                    field = %key,
                    shape = shape_name,
                    len = items.len(),
                    "List mixes objects and non-objects, passing through unchanged"
                );
                (
                    Some(Value::Array(items.to_vec())),
                    FieldOutcome::PassedThroughMixedList,
                )
            }
            FieldShape::ToManyCandidate(items) => {
                let (create, update) = self.split_many(items);
                let outcome = FieldOutcome::Many {
                    created: create.len(),
                    updated: update.len(),
                };
                tracing::debug!(
                    field = %key,
                    shape = shape_name,
                    created = create.len(),
                    updated = update.len(),
                    "Shaped to-many relation"
                );
                match self.buckets(create, update) {
                    Some(v) => (Some(v), outcome),
                    None => (None, FieldOutcome::OmittedEmpty),
                }
            }
            FieldShape::ConnectStub(id) => {
                let wrapped = single(&keys.connect, self.conventions.id_ref(id.clone()));
                (Some(wrapped), FieldOutcome::Connected)
            }
            FieldShape::PrebuiltEnvelope(envelope) => match self.reclean_envelope(envelope) {
                Some(v) => (Some(v), FieldOutcome::Reenveloped),
                None => (None, FieldOutcome::OmittedEmpty),
            },
            FieldShape::ToOneCandidate(obj) => {
                let (action, outcome) = if self.conventions.has_id(obj) {
                    (&keys.update, FieldOutcome::Updated)
                } else {
                    (&keys.create, FieldOutcome::Created)
                };
                let cleaned = clean_object(obj, &self.conventions, IdPolicy::Strip);
                if cleaned.is_empty() {
                    return (None, FieldOutcome::OmittedEmpty);
                }
                tracing::debug!(
                    field = %key,
                    shape = shape_name,
                    action = %action,
                    "Shaped to-one relation"
                );
                (Some(single(action, Value::Object(cleaned))), outcome)
            }
        }
    }

    /// Partition list items into create bodies and `{where, data}` updates.
    fn split_many(&self, items: &[Value]) -> (Vec<Value>, Vec<Value>) {
        let mut create = Vec::new();
        let mut update = Vec::new();
        for item in items {
            match item {
                Value::Object(obj) => match self.conventions.id_of(obj) {
                    Some(id) => update.push(self.update_item(id.clone(), obj)),
                    None => create.push(Value::Object(clean_object(
                        obj,
                        &self.conventions,
                        IdPolicy::Strip,
                    ))),
                },
                // Not reachable for a to-many candidate; keep the item as-is.
                other => create.push(other.clone()),
            }
        }
        (create, update)
    }

    fn update_item(&self, id: Value, obj: &Payload) -> Value {
        let keys = &self.conventions.keys;
        let mut item = Payload::new();
        item.insert(keys.where_key.clone(), self.conventions.id_ref(id));
        item.insert(
            keys.data.clone(),
            Value::Object(clean_object(obj, &self.conventions, IdPolicy::Strip)),
        );
        Value::Object(item)
    }

    /// Build `{update, create}` from non-empty buckets, or `None` if both are empty.
    fn buckets(&self, create: Vec<Value>, update: Vec<Value>) -> Option<Value> {
        let keys = &self.conventions.keys;
        let mut out = Payload::new();
        if !update.is_empty() {
            out.insert(keys.update.clone(), Value::Array(update));
        }
        if !create.is_empty() {
            out.insert(keys.create.clone(), Value::Array(create));
        }
        (!out.is_empty()).then_some(Value::Object(out))
    }

    /// Re-clean a caller-built `{create, update}` envelope without re-wrapping it.
    fn reclean_envelope(&self, envelope: &Payload) -> Option<Value> {
        let keys = &self.conventions.keys;
        let mut out = Payload::new();

        if let Some(bucket) = envelope.get(&keys.update) {
            if let Some(v) = self.reclean_bucket(bucket, true) {
                out.insert(keys.update.clone(), v);
            }
        }
        if let Some(bucket) = envelope.get(&keys.create) {
            if let Some(v) = self.reclean_bucket(bucket, false) {
                out.insert(keys.create.clone(), v);
            }
        }

        (!out.is_empty()).then_some(Value::Object(out))
    }

    fn reclean_bucket(&self, bucket: &Value, is_update: bool) -> Option<Value> {
        let cleaned = match bucket {
            Value::Null => return None,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(obj) if is_update => self.reclean_update_item(obj),
                        other => clean_body(other, &self.conventions),
                    })
                    .collect(),
            ),
            other => clean_body(other, &self.conventions),
        };
        let empty = match &cleaned {
            Value::Array(items) => items.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            _ => false,
        };
        (!empty).then_some(cleaned)
    }

    fn reclean_update_item(&self, obj: &Payload) -> Value {
        let keys = &self.conventions.keys;
        if let Some(filter) = obj.get(&keys.where_key) {
            let mut item = Payload::new();
            item.insert(keys.where_key.clone(), filter.clone());
            if let Some(data) = obj.get(&keys.data) {
                item.insert(keys.data.clone(), clean_body(data, &self.conventions));
            }
            return Value::Object(item);
        }
        match self.conventions.id_of(obj) {
            Some(id) => self.update_item(id.clone(), obj),
            None => Value::Object(clean_object(obj, &self.conventions, IdPolicy::Strip)),
        }
    }

    /// Flatten every top-level `{connect: {id}}` to the bare `{id}` reference.
    fn collapse_connects(&self, out: &mut Payload) {
        let connect = &self.conventions.keys.connect;
        for value in out.values_mut() {
            let inner = match value {
                Value::Object(wrapper) if wrapper.len() == 1 => match wrapper.get(connect) {
                    Some(Value::Object(target))
                        if target.len() == 1 && target.contains_key(&self.conventions.id_key) =>
                    {
                        Value::Object(target.clone())
                    }
                    _ => continue,
                },
                _ => continue,
            };
            *value = inner;
        }
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Payload::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Transform a payload under the default (Prisma) conventions.
///
/// # Examples
///
/// ```
/// use nestwrite_transform::transform;
/// use serde_json::json;
///
/// let payload = json!({"name": "Widget", "salaryRule": {"id": "sr1"}, "createdAt": "2024-01-01"});
/// let out = transform(payload.as_object().unwrap());
/// assert_eq!(serde_json::Value::Object(out), json!({"name": "Widget", "salaryRule": {"id": "sr1"}}));
/// ```
pub fn transform(payload: &Payload) -> Payload {
    Transformer::default().transform(payload)
}

/// Transform a payload under custom conventions.
pub fn transform_with(payload: &Payload, conventions: &WriteConventions) -> Payload {
    Transformer::new(conventions.clone()).transform(payload)
}
