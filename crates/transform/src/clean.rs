//! Payload cleaning
//!
//! Cleaning drops audit fields and null entries. It walks into nested objects
//! (including objects inside lists) but never reshapes them: a nested relation
//! inside a cleaned body is written as-is.

use nestwrite_core::Payload;
use serde_json::Value;

use crate::conventions::WriteConventions;

/// Whether to drop the object's own id while cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Leave the id in place.
    Keep,
    /// Remove the id (create bodies, update `data`).
    Strip,
}

/// Clean one object.
///
/// `policy` applies only to the top level; ids of nested objects are kept so
/// references inside the body survive.
pub fn clean_object(obj: &Payload, conventions: &WriteConventions, policy: IdPolicy) -> Payload {
    obj.iter()
        .filter(|(key, value)| {
            !value.is_null()
                && !conventions.is_audit(key)
                && !(policy == IdPolicy::Strip && **key == conventions.id_key)
        })
        .map(|(key, value)| (key.clone(), clean_value(value, conventions)))
        .collect()
}

fn clean_value(value: &Value, conventions: &WriteConventions) -> Value {
    match value {
        Value::Object(obj) => Value::Object(clean_object(obj, conventions, IdPolicy::Keep)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(obj) => {
                        Value::Object(clean_object(obj, conventions, IdPolicy::Keep))
                    }
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Clean a value that is expected to be an object, stripping its id.
///
/// Non-object values are returned unchanged.
pub fn clean_body(value: &Value, conventions: &WriteConventions) -> Value {
    match value {
        Value::Object(obj) => Value::Object(clean_object(obj, conventions, IdPolicy::Strip)),
        other => other.clone(),
    }
}
