//! Mutation requests
//!
//! Builds the HTTP request a form submission turns into: POST to the entity
//! endpoint for new rows, PATCH to `<endpoint>/<id>` for existing ones, with
//! the transformed payload as body and the tenant header set. Requests are
//! plain values; sending them is up to the caller.

use std::collections::BTreeMap;

use nestwrite_core::{value_kind, Payload};
use nestwrite_transform::Transformer;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::entity::EntitySchema;
use crate::error::{SchemaError, SchemaResult};

/// HTTP method of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Create
    Post,
    /// Update
    Patch,
    /// Delete
    Delete,
}

/// A built mutation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute or root-relative URL
    pub url: String,
    /// Request headers
    pub headers: BTreeMap<String, String>,
    /// JSON body, absent for deletes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

fn id_segment(entity: &str, id: &Value) -> SchemaResult<String> {
    match id {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SchemaError::UnsupportedId {
            entity: entity.to_string(),
            found: value_kind(other),
        }),
    }
}

fn base_headers(config: &ClientConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(tenant) = &config.tenant_code {
        headers.insert(config.tenant_header.clone(), tenant.clone());
    }
    headers
}

impl MutationRequest {
    /// Build the create or update request for a submitted payload.
    ///
    /// A payload with a top-level id becomes a PATCH against that row, with
    /// the id moved from the body into the URL; anything else is a POST.
    pub fn for_payload(
        schema: &EntitySchema,
        payload: &Payload,
        config: &ClientConfig,
        transformer: &Transformer,
    ) -> SchemaResult<Self> {
        if schema.meta.endpoint.trim().is_empty() {
            return Err(SchemaError::EmptyEndpoint {
                entity: schema.name.clone(),
            });
        }

        let conventions = transformer.conventions();
        let (method, url, body) = match conventions.id_of(payload) {
            Some(id) => {
                let segment = id_segment(&schema.name, id)?;
                let mut rest = payload.clone();
                rest.remove(&conventions.id_key);
                let url = config.url_for(&schema.meta.endpoint, Some(&segment))?;
                (Method::Patch, url, transformer.transform(&rest))
            }
            None => (
                Method::Post,
                config.url_for(&schema.meta.endpoint, None)?,
                transformer.transform(payload),
            ),
        };

        let mut headers = base_headers(config);
        headers.insert("content-type".to_string(), "application/json".to_string());

        tracing::debug!(entity = %schema.name, method = ?method, url = %url, "Built mutation request");

        Ok(Self {
            method,
            url,
            headers,
            body: Some(Value::Object(body)),
        })
    }

    /// Build the delete request for a row.
    pub fn delete(schema: &EntitySchema, id: &Value, config: &ClientConfig) -> SchemaResult<Self> {
        if !schema.meta.allow_delete {
            return Err(SchemaError::DeleteNotPermitted {
                entity: schema.name.clone(),
            });
        }
        let segment = id_segment(&schema.name, id)?;
        let url = config.url_for(&schema.meta.endpoint, Some(&segment))?;
        Ok(Self {
            method: Method::Delete,
            url,
            headers: base_headers(config),
            body: None,
        })
    }
}
