//! Naming conventions for nested writes
//!
//! Which keys are audit fields, which key carries a row identifier, and what
//! the nested-write operation keys are called. The defaults match the
//! Prisma dialect (`connect` / `create` / `update`, `where` + `data`).
//!
//! Conventions can be loaded from the `[conventions]` table of a TOML file:
//!
//! ```toml
//! [conventions]
//! audit_fields = ["insertedAt", "modifiedAt"]
//! id_key = "uuid"
//!
//! [conventions.keys]
//! connect = "link"
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use nestwrite_core::{Payload, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Audit fields stripped by default.
pub const DEFAULT_AUDIT_FIELDS: [&str; 4] = ["createdAt", "updatedAt", "createdBy", "updatedBy"];

/// Default identifier key.
pub const DEFAULT_ID_KEY: &str = "id";

/// Names of the nested-write operation keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationKeys {
    /// Create-new-row bucket
    pub create: String,
    /// Update-existing-row bucket
    pub update: String,
    /// Link-existing-row wrapper
    pub connect: String,
    /// Row filter inside a to-many update item
    #[serde(rename = "where")]
    pub where_key: String,
    /// Field values inside a to-many update item
    pub data: String,
}

impl Default for OperationKeys {
    fn default() -> Self {
        Self {
            create: "create".to_string(),
            update: "update".to_string(),
            connect: "connect".to_string(),
            where_key: "where".to_string(),
            data: "data".to_string(),
        }
    }
}

/// Injectable conventions used by the transformer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteConventions {
    /// Keys that are never written back (the store manages them).
    pub audit_fields: BTreeSet<String>,
    /// Key whose presence marks an existing row.
    pub id_key: String,
    /// Operation key names.
    pub keys: OperationKeys,
}

impl Default for WriteConventions {
    fn default() -> Self {
        Self {
            audit_fields: DEFAULT_AUDIT_FIELDS.iter().map(|s| s.to_string()).collect(),
            id_key: DEFAULT_ID_KEY.to_string(),
            keys: OperationKeys::default(),
        }
    }
}

#[derive(Deserialize)]
struct ConventionsFile {
    #[serde(default)]
    conventions: WriteConventions,
}

impl WriteConventions {
    /// Replace the audit-field set.
    pub fn with_audit_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audit_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the identifier key.
    pub fn with_id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = key.into();
        self
    }

    /// Replace the operation key names.
    pub fn with_keys(mut self, keys: OperationKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Parse the `[conventions]` table of a TOML document.
    ///
    /// Other tables are ignored and a missing table yields the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConventionsFile = toml::from_str(s)?;
        Ok(file.conventions)
    }

    /// Read conventions from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Is `key` an audit field?
    pub fn is_audit(&self, key: &str) -> bool {
        self.audit_fields.contains(key)
    }

    /// The row identifier of an object, if present and not null.
    pub fn id_of<'a>(&self, obj: &'a Payload) -> Option<&'a Value> {
        obj.get(&self.id_key).filter(|v| !v.is_null())
    }

    /// Does the object carry a row identifier?
    pub fn has_id(&self, obj: &Payload) -> bool {
        self.id_of(obj).is_some()
    }

    /// Build a `{<id_key>: id}` object.
    pub fn id_ref(&self, id: Value) -> Value {
        let mut map = Payload::new();
        map.insert(self.id_key.clone(), id);
        Value::Object(map)
    }
}
