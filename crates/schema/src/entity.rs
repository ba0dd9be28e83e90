//! Entity schemas
//!
//! An [`EntitySchema`] pairs type-level metadata (endpoint, dialog titles,
//! form sections, delete permission) with the ordered list of its fields.
//! Schemas are written as camelCase JSON:
//!
//! ```json
//! {
//!   "name": "salaryStructureRule",
//!   "meta": {
//!     "endpoint": "api/hr/salaryStructureRules",
//!     "createTitle": "New rule",
//!     "editTitle": "Edit rule",
//!     "sections": [{"key": "general", "title": "General"}],
//!     "allowDelete": true
//!   },
//!   "fields": [
//!     {"name": "name", "form": {"label": "Name", "section": "general", "required": true},
//!      "table": {"header": "Name", "accessor": "name"}}
//!   ]
//! }
//! ```

use std::collections::HashSet;

use nestwrite_core::{Payload, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDef, TableColumnMeta};

/// Key of the section holding form fields that name none.
pub const DEFAULT_SECTION: &str = "default";

/// A form section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMeta {
    /// Key referenced by fields
    pub key: String,
    /// Heading shown in the form
    pub title: String,
}

/// Type-level metadata of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMeta {
    /// REST endpoint, relative to the API base URL
    pub endpoint: String,
    /// Create dialog title
    #[serde(default)]
    pub create_title: String,
    /// Edit dialog title
    #[serde(default)]
    pub edit_title: String,
    /// Form sections in display order
    #[serde(default)]
    pub sections: Vec<SectionMeta>,
    /// Whether rows may be deleted
    #[serde(default)]
    pub allow_delete: bool,
}

/// An entity type with its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity name
    pub name: String,
    /// Type-level metadata
    pub meta: SchemaMeta,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// A section with the form fields placed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection<'a> {
    /// Section key
    pub key: &'a str,
    /// Section heading (empty for the default section)
    pub title: &'a str,
    /// Fields in declaration order
    pub fields: Vec<&'a FieldDef>,
}

impl EntitySchema {
    /// Parse a schema from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a schema from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check the schema is internally consistent.
    pub fn validate(&self) -> SchemaResult<()> {
        let entity = || self.name.clone();

        if self.meta.endpoint.trim().is_empty() {
            return Err(SchemaError::EmptyEndpoint { entity: entity() });
        }

        let mut sections = HashSet::new();
        for section in &self.meta.sections {
            if !sections.insert(section.key.as_str()) {
                return Err(SchemaError::DuplicateSection {
                    entity: entity(),
                    section: section.key.clone(),
                });
            }
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    entity: entity(),
                    field: field.name.clone(),
                });
            }
            let Some(form) = &field.meta.form else {
                continue;
            };
            if let Some(section) = &form.section {
                if !sections.contains(section.as_str()) {
                    return Err(SchemaError::UnknownSection {
                        entity: entity(),
                        field: field.name.clone(),
                        section: section.clone(),
                    });
                }
            }
            if form.widget.needs_options() && form.options.is_none() {
                return Err(SchemaError::MissingOptionSource {
                    entity: entity(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Declared sections in order with their form fields, followed by the
    /// default section when some form field names no section.
    pub fn form_sections(&self) -> Vec<FormSection<'_>> {
        let mut out: Vec<FormSection<'_>> = self
            .meta
            .sections
            .iter()
            .map(|s| FormSection {
                key: &s.key,
                title: &s.title,
                fields: self.form_fields_in(Some(s.key.as_str())),
            })
            .collect();

        let unsectioned = self.form_fields_in(None);
        if !unsectioned.is_empty() {
            out.push(FormSection {
                key: DEFAULT_SECTION,
                title: "",
                fields: unsectioned,
            });
        }
        out
    }

    fn form_fields_in(&self, section: Option<&str>) -> Vec<&FieldDef> {
        self.fields
            .iter()
            .filter(|f| {
                f.meta
                    .form
                    .as_ref()
                    .is_some_and(|form| form.section.as_deref() == section)
            })
            .collect()
    }

    /// Fields shown as table columns, in order.
    pub fn table_columns(&self) -> Vec<(&FieldDef, &TableColumnMeta)> {
        self.fields
            .iter()
            .filter_map(|f| f.meta.table.as_ref().map(|t| (f, t)))
            .collect()
    }

    /// Cell values of one entity row, paired with their column headers.
    pub fn row_cells<'a>(&'a self, entity: &'a Value) -> Vec<(&'a str, Option<&'a Value>)> {
        self.table_columns()
            .into_iter()
            .map(|(_, col)| (col.header.as_str(), col.accessor.resolve(entity)))
            .collect()
    }

    /// Required form fields that are missing or null in a payload.
    pub fn missing_required(&self, payload: &Payload) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .filter(|f| payload.get(&f.name).map_or(true, Value::is_null))
            .map(|f| f.name.as_str())
            .collect()
    }
}
