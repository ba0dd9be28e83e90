//! Shared helpers for the conformance suite.

use serde_json::Value;

/// Run the default transform over a JSON literal and return the result as a value.
pub fn shape(input: Value) -> Value {
    let payload = input.as_object().expect("test payload must be an object");
    Value::Object(nestwrite::transform(payload))
}

/// Run a transformer over a JSON literal.
pub fn shape_with(transformer: &nestwrite::Transformer, input: Value) -> Value {
    let payload = input.as_object().expect("test payload must be an object");
    Value::Object(transformer.transform(payload))
}
