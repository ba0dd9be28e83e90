//! Schema metadata contract for nestwrite
//!
//! Entities are described by an [`EntitySchema`]: type-level metadata
//! (endpoint, dialog titles, sections, delete permission) plus per-field
//! form and table metadata. The transform does not read any of this; the
//! application uses it to lay out forms and tables and to address the
//! [`MutationRequest`] a transformed payload is sent with.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod entity;
pub mod error;
pub mod field;
pub mod request;

pub use config::{ClientConfig, DEFAULT_TENANT_HEADER};
pub use entity::{EntitySchema, FormSection, SchemaMeta, SectionMeta, DEFAULT_SECTION};
pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldLevelMeta, FormFieldMeta, InputWidget, OptionSource, TableColumnMeta};
pub use request::{Method, MutationRequest};
