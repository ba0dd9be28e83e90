//! Public types for the nestwrite facade.
//!
//! This module re-exports types from the member crates with a flat public interface.

// ============================================================================
// Payload vocabulary
// ============================================================================

pub use nestwrite_core::{JsonPath, PathSegment, Payload};

// Errors
pub use nestwrite_core::{Error, Result};

// ============================================================================
// Transform
// ============================================================================

pub use nestwrite_transform::{
    FieldOutcome, FieldReport, FieldShape, OperationKeys, TransformReport, Transformer,
    WriteConventions,
};

// ============================================================================
// Schema metadata and requests
// ============================================================================

pub use nestwrite_schema::{
    ClientConfig, EntitySchema, FieldDef, FieldLevelMeta, FormFieldMeta, FormSection,
    InputWidget, Method, MutationRequest, OptionSource, SchemaError, SchemaMeta, SectionMeta,
    TableColumnMeta,
};
